use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A parliamentary select committee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Committee {
    pub id: u32,
    pub full_committee_name: String,
    /// Slug used in the committee page URL
    pub url: String,
}

/// Member of parliament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub full_name: String,
    /// Slug used in the member page URL
    pub id_name: String,
}

/// Political party
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Party {
    pub short: String,
    #[serde(default)]
    pub name: String,
}

/// Bill type as recorded by parliament
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillType {
    Government,
    Member,
    Local,
    Private,
}

impl BillType {
    pub fn label(&self) -> &'static str {
        match self {
            BillType::Government => "Government bill",
            BillType::Member => "Member's bill",
            BillType::Local => "Local bill",
            BillType::Private => "Private bill",
        }
    }
}

/// Bill version published on the legislation register
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NzlEvent {
    pub id: u32,
    pub version_stage: String,
    pub publication_date: NaiveDate,
    pub link: String,
    #[serde(default)]
    pub version_committee: Option<String>,
}

/// Call for public submissions on a bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionDate {
    pub date: NaiveDate,
    /// Query fragment appended to the parliament submissions page
    pub parliament_url: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: u32,
    /// Slug used in the bill page URL
    pub url: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_current")]
    pub current: bool,
    pub bill_type: BillType,
    pub member_in_charge: Member,
    #[serde(default)]
    pub party_in_charge: Option<Party>,
    #[serde(default)]
    pub referred_to_committee: Option<Committee>,
    #[serde(default)]
    pub reported_by_committee: bool,
    #[serde(default)]
    pub nzl_events: Option<Vec<NzlEvent>>,
    #[serde(default)]
    pub submission_dates: Vec<SubmissionDate>,
}

fn default_current() -> bool {
    true
}

impl Bill {
    pub fn is_before_committee(&self) -> bool {
        self.referred_to_committee.is_some() && !self.reported_by_committee
    }

    pub fn was_reported_by_committee(&self) -> bool {
        self.referred_to_committee.is_some() && self.reported_by_committee
    }

    /// Most recently published register event whose stage is one of `stages`
    pub fn latest_nzl_event(&self, stages: &[&str]) -> Option<&NzlEvent> {
        self.nzl_events
            .as_deref()?
            .iter()
            .filter(|e| stages.contains(&e.version_stage.as_str()))
            .max_by_key(|e| e.publication_date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionKind {
    Speech,
    Procedural,
}

/// One entry of a debate transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub text: String,
    pub kind: ContributionKind,
    /// Anchor of this contribution in the published transcript
    #[serde(default)]
    pub url: Option<String>,
}

impl Contribution {
    pub fn speech(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ContributionKind::Speech,
            url: None,
        }
    }

    pub fn procedural(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ContributionKind::Procedural,
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn is_speech(&self) -> bool {
        self.kind == ContributionKind::Speech
    }

    pub fn is_procedural(&self) -> bool {
        self.kind == ContributionKind::Procedural
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debate {
    pub id: u32,
    pub date: NaiveDate,
    /// Canonical URL of the published transcript
    pub url: String,
    /// Chronological order
    #[serde(default)]
    pub contributions: Vec<Contribution>,
}

/// The three ways a vote can be cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cast {
    Ayes,
    Noes,
    Abstentions,
}

impl Cast {
    pub const ALL: [Cast; 3] = [Cast::Ayes, Cast::Noes, Cast::Abstentions];

    pub fn label(&self) -> &'static str {
        match self {
            Cast::Ayes => "Ayes",
            Cast::Noes => "Noes",
            Cast::Abstentions => "Abstentions",
        }
    }
}

/// A party's casts in a party vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyCasts {
    pub party: Party,
    #[serde(default)]
    pub ayes: u32,
    #[serde(default)]
    pub noes: u32,
    #[serde(default)]
    pub abstentions: u32,
}

impl PartyCasts {
    pub fn count(&self, cast: Cast) -> u32 {
        match cast {
            Cast::Ayes => self.ayes,
            Cast::Noes => self.noes,
            Cast::Abstentions => self.abstentions,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VoteKind {
    /// Conscience vote recorded per member
    #[default]
    Personal,
    /// Whipped vote recorded per party
    Party { casts: Vec<PartyCasts> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub question: String,
    pub result: String,
    /// The contribution that put the question
    #[serde(default)]
    pub contribution: Option<Contribution>,
    #[serde(default)]
    pub ayes_count: u32,
    #[serde(default)]
    pub noes_count: u32,
    #[serde(default)]
    pub abstentions_count: u32,
    #[serde(default)]
    pub kind: VoteKind,
}

impl Vote {
    pub fn count(&self, cast: Cast) -> u32 {
        match cast {
            Cast::Ayes => self.ayes_count,
            Cast::Noes => self.noes_count,
            Cast::Abstentions => self.abstentions_count,
        }
    }

    /// Total number of casts
    pub fn votes_count(&self) -> u32 {
        self.ayes_count
            .saturating_add(self.noes_count)
            .saturating_add(self.abstentions_count)
    }

    pub fn is_party_vote(&self) -> bool {
        matches!(self.kind, VoteKind::Party { .. })
    }

    /// Parties with a non-zero count for `cast`, in recorded order.
    /// Empty for personal votes.
    pub fn by_party(&self, cast: Cast) -> Vec<(&Party, u32)> {
        match &self.kind {
            VoteKind::Personal => Vec::new(),
            VoteKind::Party { casts } => casts
                .iter()
                .map(|c| (&c.party, c.count(cast)))
                .filter(|(_, n)| *n > 0)
                .collect(),
        }
    }
}

/// What published a bill event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventSource {
    /// A version on the legislation register, by `NzlEvent` id
    NzlEvent { id: u32 },
    /// A debate transcript, by `Debate` id
    Debate { id: u32 },
    /// A sub-debate within a sitting day's transcript, by `Debate` id
    SubDebate { id: u32 },
    /// A source kind this crate does not know how to describe
    Other { kind: String },
}

/// An event source resolved against the loaded records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedSource<'a> {
    /// No source: the event was announced by parliament
    Parliament,
    Legislation(&'a NzlEvent),
    Debate(&'a Debate),
    SubDebate(&'a Debate),
    Other(&'a str),
}

/// A dated milestone in a bill's passage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillEvent {
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub source: Option<EventSource>,
    #[serde(default)]
    pub debates: Vec<Debate>,
    /// Null entries are votes whose record could not be loaded
    #[serde(default)]
    pub votes: Vec<Option<Vote>>,
    #[serde(default)]
    pub split_at_third_reading: bool,
}

impl BillEvent {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
            source: None,
            debates: Vec::new(),
            votes: Vec::new(),
            split_at_third_reading: false,
        }
    }

    pub fn has_debates(&self) -> bool {
        !self.debates.is_empty()
    }

    pub fn has_votes(&self) -> bool {
        !self.votes.is_empty()
    }

    pub fn was_split_at_third_reading(&self) -> bool {
        self.split_at_third_reading
    }

    /// Votes that were loaded, in event order
    pub fn present_votes(&self) -> impl Iterator<Item = &Vote> {
        self.votes.iter().flatten()
    }

    /// Look the event's source up among the bill's register events and the
    /// event's own debates
    pub fn resolve_source<'a>(&'a self, bill: &'a Bill) -> Result<ResolvedSource<'a>> {
        match &self.source {
            None => Ok(ResolvedSource::Parliament),
            Some(EventSource::NzlEvent { id }) => bill
                .nzl_events
                .as_deref()
                .and_then(|events| events.iter().find(|e| e.id == *id))
                .map(ResolvedSource::Legislation)
                .ok_or_else(|| Error::missing("nzl_event", id)),
            Some(EventSource::Debate { id }) => self
                .debate(*id)
                .map(ResolvedSource::Debate)
                .ok_or_else(|| Error::missing("debate", id)),
            Some(EventSource::SubDebate { id }) => self
                .debate(*id)
                .map(ResolvedSource::SubDebate)
                .ok_or_else(|| Error::missing("sub_debate", id)),
            Some(EventSource::Other { kind }) => Ok(ResolvedSource::Other(kind)),
        }
    }

    fn debate(&self, id: u32) -> Option<&Debate> {
        self.debates.iter().find(|d| d.id == id)
    }
}

/// A bill together with its events, as stored in one data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillDossier {
    pub bill: Bill,
    #[serde(default)]
    pub events: Vec<BillEvent>,
}

/// Everything rendered for one bill event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    /// Bill URL slug
    pub bill: String,
    pub bill_name: String,
    /// First sentence of the bill's description
    pub bill_description: String,
    /// Short bill type label for listings
    pub bill_type: String,
    pub party: String,
    /// Link to an open call for submissions, empty once it has closed
    pub submission_alert: String,
    pub event: String,
    pub date: NaiveDate,
    pub atom_id: String,
    pub url: String,
    pub description: String,
    pub dates: String,
    pub question: String,
    pub result: String,
    pub ayes: String,
    pub noes: String,
    pub abstentions: String,
}
