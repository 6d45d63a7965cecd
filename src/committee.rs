//! Linking committee mentions in narrative text, and recording the committee
//! a bill was referred to when a vote on the referral passed.

use crate::error::Result;
use crate::links::Links;
use crate::markup::link_to;
use crate::types::{Bill, Committee, Vote};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Lookup of committees by the name used in transcripts
pub trait CommitteeDirectory {
    fn from_name(&self, name: &str) -> Option<&Committee>;
}

/// The committees known to the site
#[derive(Debug, Clone, Default)]
pub struct Committees {
    committees: Vec<Committee>,
}

impl Committees {
    pub fn new(committees: Vec<Committee>) -> Self {
        Self { committees }
    }

    /// Load a JSON array of committees
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let committees: Vec<Committee> = serde_json::from_str(&contents)?;
        debug!(count = committees.len(), path = %path.display(), "loaded committees");
        Ok(Self::new(committees))
    }

    pub fn len(&self) -> usize {
        self.committees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committees.is_empty()
    }
}

impl CommitteeDirectory for Committees {
    fn from_name(&self, name: &str) -> Option<&Committee> {
        let wanted = normalize_name(name);
        if wanted.is_empty() {
            return None;
        }
        self.committees
            .iter()
            .find(|c| normalize_name(&c.full_committee_name) == wanted)
    }
}

/// Lowercased, whitespace-collapsed form of a committee name with any leading
/// "the" and trailing "committee" dropped, commas ignored and "&" read as "and".
fn normalize_name(name: &str) -> String {
    let lowered = name.to_lowercase().replace(',', " ").replace('&', " and ");
    let mut words: Vec<&str> = lowered.split_whitespace().collect();
    if words.first() == Some(&"the") {
        words.remove(0);
    }
    if words.last() == Some(&"committee") {
        words.pop();
    }
    words.join(" ")
}

fn committee_mention_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\bthe ((?:\p{Lu}[\p{L}'’-]*(?:,\s+|\s+(?:(?:and|of|the|&)\s+)?))+Committee)\b")
            .expect("valid committee mention regex")
    })
}

/// Narrative text after committee linking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitteeMention {
    pub text: String,
    /// Committee found from a mention in the text rather than from the bill's
    /// own referral. Candidate for [`assign_committee_if_passed`].
    pub committee: Option<Committee>,
}

impl CommitteeMention {
    fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            committee: None,
        }
    }
}

/// Link the first committee mentioned in `text`.
///
/// The bill's referred committee is preferred when its full name appears.
/// Otherwise a "the ... Committee" phrase is looked up in the directory.
pub fn resolve_committee_mention(
    text: &str,
    bill: Option<&Bill>,
    links: &Links,
    directory: &dyn CommitteeDirectory,
) -> CommitteeMention {
    let Some(bill) = bill else {
        return CommitteeMention::unchanged(text);
    };

    if let Some(committee) = &bill.referred_to_committee {
        let name = committee.full_committee_name.as_str();
        if !name.is_empty() && text.contains(name) {
            let link = link_to(name, &links.committee_url(committee));
            return CommitteeMention {
                text: text.replacen(name, &link, 1),
                committee: None,
            };
        }
    }

    let Some(captures) = committee_mention_regex().captures(text) else {
        return CommitteeMention::unchanged(text);
    };
    let name = &captures[1];

    let Some(committee) = directory.from_name(name) else {
        debug!(name, "committee mention did not resolve");
        return CommitteeMention::unchanged(text);
    };

    let link = link_to(name, &links.committee_url(committee));
    CommitteeMention {
        text: text.replacen(name, &link, 1),
        committee: Some(committee.clone()),
    }
}

/// Record `committee` as the bill's referred committee when any of the votes
/// passed (some casts, more ayes than noes).
///
/// Returns whether the bill changed; assigning the committee the bill already
/// has is a no-op.
pub fn assign_committee_if_passed(
    bill: &mut Bill,
    committee: &Committee,
    votes: &[Option<Vote>],
) -> bool {
    let passed = votes
        .iter()
        .flatten()
        .any(|vote| vote.votes_count() > 0 && vote.ayes_count > vote.noes_count);
    if !passed {
        return false;
    }

    if bill.referred_to_committee.as_ref() == Some(committee) {
        return false;
    }

    info!(
        bill = %bill.url,
        committee = %committee.full_committee_name,
        "assigning referred committee from vote"
    );
    bill.referred_to_committee = Some(committee.clone());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BillType, Member, VoteKind};

    fn committee(id: u32, name: &str, url: &str) -> Committee {
        Committee {
            id,
            full_committee_name: name.to_string(),
            url: url.to_string(),
        }
    }

    fn directory() -> Committees {
        Committees::new(vec![
            committee(1, "Finance and Expenditure Committee", "finance_and_expenditure"),
            committee(2, "Health Committee", "health"),
            committee(3, "Māori Affairs Committee", "maori_affairs"),
            committee(4, "Foreign Affairs, Defence and Trade Committee", "foreign_affairs_defence_and_trade"),
        ])
    }

    fn bill() -> Bill {
        Bill {
            id: 9,
            url: "taxation_bill".to_string(),
            full_name: "Taxation Bill".to_string(),
            description: None,
            current: true,
            bill_type: BillType::Government,
            member_in_charge: Member {
                full_name: "Jane Doe".to_string(),
                id_name: "jane_doe".to_string(),
            },
            party_in_charge: None,
            referred_to_committee: None,
            reported_by_committee: false,
            nzl_events: None,
            submission_dates: Vec::new(),
        }
    }

    fn vote(ayes: u32, noes: u32) -> Option<Vote> {
        Some(Vote {
            question: "q".to_string(),
            result: "r".to_string(),
            contribution: None,
            ayes_count: ayes,
            noes_count: noes,
            abstentions_count: 0,
            kind: VoteKind::Personal,
        })
    }

    #[test]
    fn test_directory_lookup_is_fuzzy() {
        let committees = directory();
        assert_eq!(committees.from_name("Finance and Expenditure Committee").unwrap().id, 1);
        assert_eq!(committees.from_name("the finance & expenditure committee").unwrap().id, 1);
        assert_eq!(committees.from_name("Health").unwrap().id, 2);
        assert!(committees.from_name("Justice and Electoral Committee").is_none());
        assert!(committees.from_name("Committee").is_none());
    }

    #[test]
    fn test_no_bill_leaves_text() {
        let links = Links::new("https://example.org");
        let text = "referred to the Health Committee";
        let mention = resolve_committee_mention(text, None, &links, &directory());
        assert_eq!(mention.text, text);
        assert!(mention.committee.is_none());
    }

    #[test]
    fn test_links_mentioned_committee() {
        let links = Links::new("https://example.org");
        let text = "That the bill be referred to the Finance and Expenditure Committee.";
        let mention = resolve_committee_mention(text, Some(&bill()), &links, &directory());
        assert_eq!(
            mention.text,
            "That the bill be referred to the <a href=\"https://example.org/committees/finance_and_expenditure\">Finance and Expenditure Committee</a>."
        );
        assert_eq!(mention.committee.unwrap().id, 1);
    }

    #[test]
    fn test_committee_name_with_comma() {
        let links = Links::new("https://example.org");
        let text = "That the bill be referred to the Foreign Affairs, Defence and Trade Committee.";
        let mention = resolve_committee_mention(text, Some(&bill()), &links, &directory());
        assert_eq!(
            mention.text,
            "That the bill be referred to the <a href=\"https://example.org/committees/foreign_affairs_defence_and_trade\">Foreign Affairs, Defence and Trade Committee</a>."
        );
        assert_eq!(mention.committee.unwrap().id, 4);
        assert_eq!(directory().from_name("Foreign Affairs Defence and Trade").unwrap().id, 4);
    }

    #[test]
    fn test_non_ascii_committee_name() {
        let links = Links::new("https://example.org");
        let text = "referred to the Māori Affairs Committee";
        let mention = resolve_committee_mention(text, Some(&bill()), &links, &directory());
        assert_eq!(mention.committee.unwrap().id, 3);
    }

    #[test]
    fn test_referred_committee_is_preferred_and_not_a_candidate() {
        let links = Links::new("https://example.org");
        let mut b = bill();
        b.referred_to_committee = Some(committee(2, "Health Committee", "health"));
        let text = "Report of the Health Committee presented. See the Finance and Expenditure Committee.";
        let mention = resolve_committee_mention(text, Some(&b), &links, &directory());
        assert!(mention
            .text
            .starts_with("Report of the <a href=\"https://example.org/committees/health\">Health Committee</a>"));
        assert!(mention.text.ends_with("See the Finance and Expenditure Committee."));
        assert!(mention.committee.is_none());
    }

    #[test]
    fn test_unknown_committee_leaves_text() {
        let links = Links::new("https://example.org");
        let text = "referred to the Justice and Electoral Committee";
        let mention = resolve_committee_mention(text, Some(&bill()), &links, &directory());
        assert_eq!(mention.text, text);
        assert!(mention.committee.is_none());
    }

    #[test]
    fn test_assign_requires_passing_vote() {
        let finance = committee(1, "Finance and Expenditure Committee", "finance_and_expenditure");
        let mut b = bill();

        assert!(!assign_committee_if_passed(&mut b, &finance, &[vote(50, 60)]));
        assert!(!assign_committee_if_passed(&mut b, &finance, &[vote(0, 0), None]));
        assert!(b.referred_to_committee.is_none());

        assert!(assign_committee_if_passed(&mut b, &finance, &[vote(50, 60), vote(61, 59)]));
        assert_eq!(b.referred_to_committee.as_ref(), Some(&finance));
    }

    #[test]
    fn test_assign_is_idempotent() {
        let finance = committee(1, "Finance and Expenditure Committee", "finance_and_expenditure");
        let mut b = bill();
        assert!(assign_committee_if_passed(&mut b, &finance, &[vote(61, 59)]));
        assert!(!assign_committee_if_passed(&mut b, &finance, &[vote(61, 59)]));
        assert_eq!(b.referred_to_committee, Some(finance));
    }
}
