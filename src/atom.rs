//! Stable identifiers and URLs for bill events in feeds.

use crate::error::Result;
use crate::links::Links;
use crate::types::{Bill, BillEvent, ResolvedSource};

fn make_atom_id_tag(authority: &str, event: &BillEvent, bill: &Bill, part: &str) -> String {
    format!(
        "tag:{},{}:{}/{}{}",
        authority,
        event.date,
        bill.url,
        part,
        event.name.to_lowercase().replace(' ', "_")
    )
}

/// Tag URI identifying the event in a feed.
///
/// Parliament and legislation register events get a tag built from the date,
/// bill and event name; debate events reuse the transcript URL.
pub fn bill_event_atom_id(authority: &str, event: &BillEvent, bill: &Bill) -> Result<String> {
    let id = match event.resolve_source(bill)? {
        ResolvedSource::Parliament => make_atom_id_tag(authority, event, bill, "parliament/"),
        ResolvedSource::Legislation(_) => make_atom_id_tag(authority, event, bill, "legislation/"),
        ResolvedSource::Debate(debate) | ResolvedSource::SubDebate(debate) => debate.url.clone(),
        ResolvedSource::Other(_) => make_atom_id_tag(authority, event, bill, ""),
    };
    Ok(id)
}

/// Where a reader goes to read about the event
pub fn bill_event_url(links: &Links, event: &BillEvent, bill: &Bill) -> Result<String> {
    let url = match event.resolve_source(bill)? {
        ResolvedSource::Parliament | ResolvedSource::Other(_) => links.bill_uri(bill),
        ResolvedSource::Legislation(nzl_event) => nzl_event.link.clone(),
        ResolvedSource::Debate(debate) | ResolvedSource::SubDebate(debate) => debate.url.clone(),
    };
    Ok(url)
}
