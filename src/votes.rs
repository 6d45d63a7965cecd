//! Per-cast vote tallies shown beside each bill event.

use crate::types::{BillEvent, Cast, Party, Vote};

const VOTE_SEPARATOR: &str = "<br /><br />";

/// Summarize one kind of cast across the event's votes.
///
/// A single party vote is broken down per party; anything else is listed as
/// one raw count per vote, `-` standing in for zero or a missing vote.
pub fn summarize_casts(cast: Cast, event: &BillEvent) -> String {
    if !event.has_votes() {
        return String::new();
    }

    if let [Some(vote)] = event.votes.as_slice() {
        if vote.is_party_vote() {
            return party_vote_summary(cast, vote);
        }
    }

    event
        .votes
        .iter()
        .map(|vote| match vote {
            Some(v) if v.count(cast) != 0 => v.count(cast).to_string(),
            _ => "-".to_string(),
        })
        .collect::<Vec<_>>()
        .join(VOTE_SEPARATOR)
}

fn party_vote_summary(cast: Cast, vote: &Vote) -> String {
    let total = vote.count(cast);
    if total == 0 {
        return "-".to_string();
    }

    let parties: Vec<String> = vote
        .by_party(cast)
        .into_iter()
        .map(|(party, count)| format!("<small>{}</small>", party_cast_text(party, count)))
        .collect();

    format!("{} {}<br/> {}", cast.label(), total, parties.join("<br/>"))
}

fn party_cast_text(party: &Party, count: u32) -> String {
    format!("{} {}", party.short, count)
}

pub fn vote_ayes(event: &BillEvent) -> String {
    summarize_casts(Cast::Ayes, event)
}

pub fn vote_noes(event: &BillEvent) -> String {
    summarize_casts(Cast::Noes, event)
}

pub fn vote_abstentions(event: &BillEvent) -> String {
    summarize_casts(Cast::Abstentions, event)
}
