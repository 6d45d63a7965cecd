//! Chooses how an event is narrated and assembles its summary.

use crate::atom::{bill_event_atom_id, bill_event_url};
use crate::committee::{assign_committee_if_passed, resolve_committee_mention, CommitteeDirectory, CommitteeMention};
use crate::config::{Config, DEFAULT_TAG_AUTHORITY};
use crate::details::{
    bill_event_description, bill_meta_description, bill_type_label, committee_details,
    committee_report_details, event_dates, introduction, party_name, split_bill_details,
    submission_alert, vote_question,
};
use crate::error::Result;
use crate::links::Links;
use crate::narrative::{contribution_narrative, vote_narrative, PARAGRAPH_BREAK};
use crate::store::BillStore;
use crate::types::{Bill, BillEvent, Cast, Committee, EventSummary};
use crate::votes::summarize_casts;
use chrono::{NaiveDate, Utc};
use tracing::debug;

/// Canned results for events that were dropped from the order paper
const DISCHARGED: [(&str, &str); 4] = [
    (
        "Committee of the whole House: Order of the day for committal discharged",
        "Order of the day for committal discharged.",
    ),
    (
        "Consideration of report: Order of the day for consideration of report discharged",
        "Order of the day for consideration of report discharged.",
    ),
    (
        "Second reading: Order of the day for second reading discharged",
        "Order of the day for second reading discharged.",
    ),
    (
        "First reading: Order of the day for first reading discharged",
        "Order of the day for first reading discharged.",
    ),
];

/// Result text for an event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Narrative {
    pub text: String,
    /// Committee found in a vote narrative, to be recorded on the bill if the
    /// vote passed
    pub committee: Option<Committee>,
}

impl Narrative {
    fn plain(text: String) -> Self {
        Self {
            text,
            committee: None,
        }
    }
}

impl From<CommitteeMention> for Narrative {
    fn from(mention: CommitteeMention) -> Self {
        Self {
            text: mention.text,
            committee: mention.committee,
        }
    }
}

/// Narrates bill events
pub struct Narrator<'a> {
    links: Links,
    tag_authority: String,
    committees: &'a dyn CommitteeDirectory,
    today: NaiveDate,
}

impl<'a> Narrator<'a> {
    pub fn new(links: Links, committees: &'a dyn CommitteeDirectory) -> Self {
        Self {
            links,
            tag_authority: DEFAULT_TAG_AUTHORITY.to_string(),
            committees,
            today: Utc::now().date_naive(),
        }
    }

    pub fn from_config(config: &Config, committees: &'a dyn CommitteeDirectory) -> Self {
        Self {
            links: Links::new(config.site_url.clone()),
            tag_authority: config.tag_authority.clone(),
            committees,
            today: Utc::now().date_naive(),
        }
    }

    /// Date against which submission deadlines are checked
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn links(&self) -> &Links {
        &self.links
    }

    /// Vote results and closing procedure, committees linked
    pub fn result_from_vote(&self, event: &BillEvent, bill: &Bill) -> CommitteeMention {
        let text = vote_narrative(event, &self.links);
        resolve_committee_mention(&text, Some(bill), &self.links, self.committees)
    }

    /// Outcome read from the debate transcript, committees linked. Never offers
    /// a committee for assignment.
    pub fn result_from_contributions(&self, event: &BillEvent, bill: &Bill) -> String {
        let text = contribution_narrative(event, &self.links);
        resolve_committee_mention(&text, Some(bill), &self.links, self.committees).text
    }

    /// The result shown for an event. Empty when there is nothing to say yet.
    pub fn result_summary(&self, event: &BillEvent, bill: &Bill) -> Narrative {
        if !event.has_debates() && !event.has_votes() {
            debug!(event = %event.name, "narrating from event name");
            Narrative::plain(self.result_from_name(event, bill))
        } else if event.has_votes() {
            debug!(event = %event.name, votes = event.votes.len(), "narrating from votes");
            let mut narrative = Narrative::from(self.result_from_vote(event, bill));
            if event.was_split_at_third_reading() {
                let details = split_bill_details(bill);
                if !details.is_empty() {
                    narrative.text.push_str("<br/><br/>");
                    narrative.text.push_str(&details);
                }
            }
            narrative
        } else {
            debug!(event = %event.name, "narrating from contributions");
            Narrative::plain(self.result_from_contributions(event, bill))
        }
    }

    fn result_from_name(&self, event: &BillEvent, bill: &Bill) -> String {
        let name = event.name.as_str();
        if name.to_lowercase().contains("introduction") {
            return introduction(bill, &self.links);
        }
        match name {
            "Submissions Due" => committee_details(bill, &self.links),
            "SC Reports" => committee_report_details(bill, &self.links),
            "Third Reading" if event.was_split_at_third_reading() => split_bill_details(bill),
            _ => DISCHARGED
                .iter()
                .find(|(label, _)| *label == name)
                .map(|(_, result)| result.to_string())
                .unwrap_or_default(),
        }
    }

    /// Summarize an event and record any committee referral its votes imply.
    ///
    /// The bill is updated in place and, when it changed and a store is given,
    /// saved. Unresolvable sources fail before anything is written.
    pub fn summarize(
        &self,
        event: &BillEvent,
        bill: &mut Bill,
        store: Option<&dyn BillStore>,
    ) -> Result<EventSummary> {
        let atom_id = bill_event_atom_id(&self.tag_authority, event, bill)?;
        let url = bill_event_url(&self.links, event, bill)?;
        let description = bill_event_description(event, bill, &self.links)?;

        let narrative = self.result_summary(event, bill);
        if let Some(committee) = &narrative.committee {
            if assign_committee_if_passed(bill, committee, &event.votes) {
                if let Some(store) = store {
                    store.save_bill(bill)?;
                }
            }
        }

        Ok(EventSummary {
            bill: bill.url.clone(),
            bill_name: bill.full_name.clone(),
            bill_description: bill_meta_description(bill),
            bill_type: bill_type_label(bill).to_string(),
            party: party_name(bill),
            submission_alert: submission_alert(bill, self.today),
            event: event.name.clone(),
            date: event.date,
            atom_id,
            url,
            description,
            dates: event_dates(event),
            question: event
                .votes
                .iter()
                .map(|vote| vote_question(vote.as_ref()))
                .collect::<Vec<_>>()
                .join(PARAGRAPH_BREAK),
            result: narrative.text,
            ayes: summarize_casts(Cast::Ayes, event),
            noes: summarize_casts(Cast::Noes, event),
            abstentions: summarize_casts(Cast::Abstentions, event),
        })
    }
}
