//! Narrative summaries for bill events.
//!
//! Given a bill event with its debates and votes this library infers what
//! happened from the closing contributions of the transcript, tallies the
//! votes, links committee mentions and derives stable feed identifiers.

pub mod atom;
pub mod committee;
pub mod config;
pub mod details;
pub mod dispatch;
pub mod error;
pub mod feed;
pub mod links;
pub mod markup;
pub mod narrative;
pub mod procedural;
pub mod processor;
pub mod store;
pub mod types;
pub mod votes;

pub use atom::{bill_event_atom_id, bill_event_url};
pub use committee::{
    assign_committee_if_passed, resolve_committee_mention, CommitteeDirectory, CommitteeMention,
    Committees,
};
pub use config::{Config, ConfigBuilder, FileConfig, SortOrder};
pub use dispatch::{Narrative, Narrator};
pub use error::{Error, Result};
pub use links::Links;
pub use markup::strip_markup;
pub use procedural::{bill_reading_match, motion_agreed};
pub use processor::NarrativeProcessor;
pub use store::{BillStore, JsonBillStore, MemoryBillStore};
pub use types::{
    Bill, BillDossier, BillEvent, BillType, Cast, Committee, Contribution, ContributionKind,
    Debate, EventSource, EventSummary, Member, NzlEvent, Party, PartyCasts, Vote, VoteKind,
};
pub use votes::summarize_casts;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{Config, ConfigBuilder, FileConfig, SortOrder};
    pub use crate::dispatch::Narrator;
    pub use crate::error::{Error, Result};
    pub use crate::processor::NarrativeProcessor;
    pub use crate::types::{Bill, BillDossier, BillEvent, EventSummary};
    pub use futures::StreamExt;
}
