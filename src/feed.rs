use crate::types::EventSummary;
use chrono::{DateTime, Utc};
use rss::{ChannelBuilder, ItemBuilder};
use std::collections::HashSet;

/// Feed item title: "{bill name}: {event name}"
pub fn item_title(summary: &EventSummary) -> String {
    format!("{}: {}", summary.bill_name, summary.event)
}

/// Event description followed by its result and any open call for
/// submissions
pub fn item_description(summary: &EventSummary) -> String {
    let mut description = summary.description.clone();
    for extra in [&summary.result, &summary.submission_alert] {
        if !extra.is_empty() {
            description.push_str(&format!("<p>{}</p>", extra));
        }
    }
    description
}

/// Event date at midnight UTC
fn publication_date(summary: &EventSummary) -> Option<DateTime<Utc>> {
    summary
        .date
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}

/// Convert event summaries to an RSS feed. Items are keyed by atom id and a
/// repeated id is only emitted once.
pub fn summaries_to_rss(
    summaries: &[EventSummary],
    title: &str,
    description: &str,
    link: &str,
    language: &str,
    built_at: DateTime<Utc>,
) -> String {
    let mut items = Vec::new();
    let mut seen_guids = HashSet::new();

    for summary in summaries {
        if !seen_guids.insert(summary.atom_id.as_str()) {
            continue;
        }

        let mut item_builder = ItemBuilder::default();
        item_builder.title(item_title(summary));
        item_builder.description(item_description(summary));
        item_builder.link(summary.url.clone());

        if let Some(pub_date) = publication_date(summary) {
            item_builder.pub_date(pub_date.to_rfc2822());
        }

        item_builder.guid(rss::Guid {
            value: summary.atom_id.clone(),
            permalink: false,
        });

        items.push(item_builder.build());
    }

    let channel = ChannelBuilder::default()
        .title(title)
        .link(link)
        .description(description)
        .language(Some(language.to_string()))
        .last_build_date(Some(built_at.to_rfc2822()))
        .items(items)
        .build();

    channel.to_string()
}
