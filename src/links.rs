use crate::config::DEFAULT_SITE_URL;
use crate::markup::{link_to, link_with_title};
use crate::types::{Bill, Committee, Contribution, Member};

/// Builds absolute URLs and anchors for pages on the site
#[derive(Debug, Clone)]
pub struct Links {
    site_url: String,
}

impl Links {
    pub fn new(site_url: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn bill_uri(&self, bill: &Bill) -> String {
        format!("{}/bills/{}", self.site_url, bill.url)
    }

    pub fn committee_url(&self, committee: &Committee) -> String {
        format!("{}/committees/{}", self.site_url, committee.url)
    }

    pub fn mp_url(&self, member: &Member) -> String {
        format!("{}/mps/{}", self.site_url, member.id_name)
    }

    pub fn link_to_committee(&self, committee: &Committee) -> String {
        link_to(&committee.full_committee_name, &self.committee_url(committee))
    }

    pub fn link_to_mp(&self, member: &Member) -> String {
        link_to(&member.full_name, &self.mp_url(member))
    }

    /// Link `text` to the contribution's place in the transcript. Text is
    /// returned as is when the contribution has no anchor.
    pub fn link_to_contribution(&self, text: &str, contribution: Option<&Contribution>) -> String {
        match contribution.and_then(|c| c.url.as_deref()) {
            Some(url) => link_with_title(text, url, "Go to the debate transcript"),
            None => text.to_string(),
        }
    }
}

impl Default for Links {
    fn default() -> Self {
        Self::new(DEFAULT_SITE_URL)
    }
}
