//! One-line texts about a bill and its events: member in charge, committee
//! status, published versions, event descriptions.

use crate::atom::bill_event_url;
use crate::error::Result;
use crate::links::Links;
use crate::markup::link_to;
use crate::types::{Bill, BillEvent, ResolvedSource, Vote};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

const REPORTED_STAGES: [&str; 2] = ["reported", "wip version updated"];

pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

fn is_was(bill: &Bill) -> &'static str {
    if bill.current {
        "is"
    } else {
        "was"
    }
}

pub fn mp_in_charge(bill: &Bill, links: &Links) -> String {
    format!(
        "{} {} the member in charge of this {}.",
        links.link_to_mp(&bill.member_in_charge),
        is_was(bill),
        bill.bill_type.label()
    )
}

/// Member in charge, plus the introduced version when it has been published
pub fn introduction(bill: &Bill, links: &Links) -> String {
    let mut intro = mp_in_charge(bill, links);
    if let Some(event) = bill.latest_nzl_event(&["introduction"]) {
        intro.push_str(&format!(
            "<br/><br/>{} at introduction at the NZ Legislation website.",
            link_to("View the bill", &event.link)
        ));
    }
    intro
}

fn reported_version_sentence(bill: &Bill) -> Option<String> {
    let event = bill.latest_nzl_event(&REPORTED_STAGES)?;
    Some(format!(
        "{} as reported from the {} at the New Zealand Legislation website.",
        link_to("View the bill", &event.link),
        event.version_committee.as_deref().unwrap_or("select committee")
    ))
}

/// Link to the version reported back from committee, for bills split at third reading
pub fn split_bill_details(bill: &Bill) -> String {
    reported_version_sentence(bill).unwrap_or_default()
}

pub fn committee_report_details(bill: &Bill, links: &Links) -> String {
    let mut details = String::new();
    if bill.was_reported_by_committee() {
        if let Some(committee) = &bill.referred_to_committee {
            details = format!("The {} reported on this bill.", links.link_to_committee(committee));
        }
    }
    if let Some(sentence) = reported_version_sentence(bill) {
        details.push(' ');
        details.push_str(&sentence);
    }
    details
}

pub fn committee_details(bill: &Bill, links: &Links) -> String {
    match &bill.referred_to_committee {
        Some(committee) if bill.is_before_committee() => format!(
            "The {} is considering this bill.",
            links.link_to_committee(committee)
        ),
        _ => String::new(),
    }
}

fn meta_bill_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?im)^(This|The) bill").expect("valid meta description regex"))
}

/// First sentence of the description with "This bill" replaced by the bill's name
pub fn bill_meta_description(bill: &Bill) -> String {
    let description = bill.description.as_deref().unwrap_or("");
    if description.trim().is_empty() {
        return bill.full_name.clone();
    }
    let first = description.split('.').next().unwrap_or("");
    let replacement = format!("The {}", bill.full_name);
    let sentence = meta_bill_regex().replace_all(first, regex::NoExpand(&replacement));
    format!("{}.", sentence)
}

/// Description of an event for listings and feeds, worded by what published it
pub fn bill_event_description(event: &BillEvent, bill: &Bill, links: &Links) -> Result<String> {
    let url = bill_event_url(links, event, bill)?;
    let date = format_date(event.date);
    let description = match event.resolve_source(bill)? {
        ResolvedSource::SubDebate(_) => {
            let link_text = format!("{} debate on {}", event.name.to_lowercase(), date);
            format!("The bill's {} has been published.", link_to(&link_text, &url))
        }
        ResolvedSource::Legislation(_) => format!(
            "The bill as {} published at legislation.govt.nz.",
            link_to(&event.name.replacen("introduction", "introduced", 1), &url)
        ),
        ResolvedSource::Parliament | ResolvedSource::Debate(_) | ResolvedSource::Other(_) => {
            notification_description(&bill.full_name, &event.name, &date, &url)
        }
    };
    Ok(description)
}

fn notification_description(bill_name: &str, event_name: &str, date: &str, url: &str) -> String {
    let bill_link = link_to(bill_name, url);
    match event_name.to_lowercase().replacen(' ', "_", 1).as_str() {
        "introduction" => format!("<p>{}: The {} was introduced to parliament.</p>", date, bill_link),
        "submissions_due" => format!(
            "<p>Public submissions are due by {} for the {}.</p>",
            date, bill_link
        ),
        "first_reading" | "second_reading" | "third_reading" => format!(
            "<p>{}: The {} had a {} debate.</p><p>More details will be available after Parliament publishes the debate transcript.</p>",
            date,
            bill_link,
            event_name.to_lowercase()
        ),
        "sc_reports" | "in_committee" => format!(
            "<p>The select committee report due on {} for the {}.</p>",
            date, bill_link
        ),
        _ => format!("<p>{} on {}.</p>", link_to(event_name, url), date),
    }
}

/// Link to an open call for submissions, or empty once it has closed
pub fn submission_alert(bill: &Bill, today: NaiveDate) -> String {
    match bill.submission_dates.first() {
        Some(submission) if today <= submission.date => {
            let url = format!(
                "http://www.parliament.nz/en-NZ/SC/SubmCalled{}",
                submission.parliament_url
            );
            let details = submission
                .details
                .strip_suffix('.')
                .unwrap_or(&submission.details);
            format!("{} (link to external Parliament website).", link_to(details, &url))
        }
        _ => String::new(),
    }
}

/// Date of the event, or the linked dates of its debates, latest first
pub fn event_dates(event: &BillEvent) -> String {
    match event.debates.as_slice() {
        [] => format_date(event.date),
        [debate] => format_date(debate.date),
        debates => debates
            .iter()
            .rev()
            .map(|debate| {
                let mut date = format_date(debate.date);
                let resumed = debate
                    .contributions
                    .first()
                    .map(|c| c.text.contains("Debate resumed"))
                    .unwrap_or(false);
                if resumed {
                    date.push_str(" (resumed)");
                }
                link_to(&date, &debate.url)
            })
            .collect::<Vec<_>>()
            .join(",<br />"),
    }
}

pub fn bill_type_label(bill: &Bill) -> &'static str {
    match bill.bill_type.label().trim_end_matches(" bill") {
        "Government" => "Govt.",
        "Member's" => "Member",
        "Local" => "Local",
        _ => "Private",
    }
}

pub fn party_name(bill: &Bill) -> String {
    let party = match &bill.party_in_charge {
        Some(party) => party.short.clone(),
        None => format!("no party {}", bill.member_in_charge.full_name),
    };
    if party == "Progressive" {
        "Progres-<br/>sive".to_string()
    } else {
        party
    }
}

pub fn vote_question(vote: Option<&Vote>) -> &str {
    vote.map(|v| v.question.as_str()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BillType, Committee, Contribution, Debate, EventSource, Member, NzlEvent, Party, SubmissionDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn links() -> Links {
        Links::new("http://theyworkforyou.co.nz")
    }

    fn nzl(id: u32, stage: &str, published: NaiveDate, link: &str, committee: Option<&str>) -> NzlEvent {
        NzlEvent {
            id,
            version_stage: stage.to_string(),
            publication_date: published,
            link: link.to_string(),
            version_committee: committee.map(str::to_string),
        }
    }

    fn bill() -> Bill {
        Bill {
            id: 1,
            url: "electoral_finance".to_string(),
            full_name: "Electoral Finance Bill".to_string(),
            description: Some("This bill regulates election spending. It also repeals things.".to_string()),
            current: true,
            bill_type: BillType::Government,
            member_in_charge: Member {
                full_name: "Mark Burton".to_string(),
                id_name: "mark_burton".to_string(),
            },
            party_in_charge: Some(Party {
                short: "Labour".to_string(),
                name: "New Zealand Labour Party".to_string(),
            }),
            referred_to_committee: Some(Committee {
                id: 5,
                full_committee_name: "Justice and Electoral Committee".to_string(),
                url: "justice_and_electoral".to_string(),
            }),
            reported_by_committee: false,
            nzl_events: Some(vec![
                nzl(1, "introduction", date(2007, 7, 20), "http://legislation.govt.nz/v1", None),
                nzl(2, "reported", date(2007, 11, 12), "http://legislation.govt.nz/v2", Some("Justice and Electoral Committee")),
                nzl(3, "wip version updated", date(2007, 12, 1), "http://legislation.govt.nz/v3", Some("Justice and Electoral Committee")),
            ]),
            submission_dates: vec![SubmissionDate {
                date: date(2007, 9, 1),
                parliament_url: "?bill=electoral".to_string(),
                details: "Make a submission on the Electoral Finance Bill.".to_string(),
            }],
        }
    }

    #[test]
    fn test_introduction_links_latest_introduced_version() {
        assert_eq!(
            introduction(&bill(), &links()),
            "<a href=\"http://theyworkforyou.co.nz/mps/mark_burton\">Mark Burton</a> is the member in charge of this Government bill.\
             <br/><br/><a href=\"http://legislation.govt.nz/v1\">View the bill</a> at introduction at the NZ Legislation website."
        );
    }

    #[test]
    fn test_introduction_without_register_events() {
        let mut b = bill();
        b.nzl_events = None;
        b.current = false;
        assert!(introduction(&b, &links()).ends_with("was the member in charge of this Government bill."));
    }

    #[test]
    fn test_committee_details() {
        assert_eq!(
            committee_details(&bill(), &links()),
            "The <a href=\"http://theyworkforyou.co.nz/committees/justice_and_electoral\">Justice and Electoral Committee</a> is considering this bill."
        );
        let mut reported = bill();
        reported.reported_by_committee = true;
        assert_eq!(committee_details(&reported, &links()), "");
    }

    #[test]
    fn test_committee_report_details() {
        let mut b = bill();
        b.reported_by_committee = true;
        let details = committee_report_details(&b, &links());
        assert!(details.starts_with("The <a href=\"http://theyworkforyou.co.nz/committees/justice_and_electoral\">"));
        assert!(details.ends_with(
            " <a href=\"http://legislation.govt.nz/v3\">View the bill</a> as reported from the Justice and Electoral Committee at the New Zealand Legislation website."
        ));
    }

    #[test]
    fn test_split_bill_details_uses_latest_reported_version() {
        insta::assert_snapshot!(
            split_bill_details(&bill()),
            @r#"<a href="http://legislation.govt.nz/v3">View the bill</a> as reported from the Justice and Electoral Committee at the New Zealand Legislation website."#
        );
        let mut b = bill();
        b.nzl_events = Some(Vec::new());
        assert_eq!(split_bill_details(&b), "");
    }

    #[test]
    fn test_meta_description() {
        assert_eq!(
            bill_meta_description(&bill()),
            "The Electoral Finance Bill regulates election spending."
        );
        let mut b = bill();
        b.description = Some("  ".to_string());
        assert_eq!(bill_meta_description(&b), "Electoral Finance Bill");
    }

    #[test]
    fn test_notification_descriptions() {
        let b = bill();
        let mut event = BillEvent::new("Submissions Due", date(2007, 9, 1));
        assert_eq!(
            bill_event_description(&event, &b, &links()).unwrap(),
            "<p>Public submissions are due by 1 September 2007 for the <a href=\"http://theyworkforyou.co.nz/bills/electoral_finance\">Electoral Finance Bill</a>.</p>"
        );

        event.name = "SC Reports".to_string();
        assert!(bill_event_description(&event, &b, &links())
            .unwrap()
            .starts_with("<p>The select committee report due on 1 September 2007 for the "));

        event.name = "Royal Assent".to_string();
        assert_eq!(
            bill_event_description(&event, &b, &links()).unwrap(),
            "<p><a href=\"http://theyworkforyou.co.nz/bills/electoral_finance\">Royal Assent</a> on 1 September 2007.</p>"
        );
    }

    #[test]
    fn test_source_descriptions() {
        let b = bill();
        let mut event = BillEvent::new("Second Reading", date(2007, 11, 20));
        event.debates.push(Debate {
            id: 8,
            date: date(2007, 11, 20),
            url: "http://theyworkforyou.co.nz/debates/2007/nov/20/electoral".to_string(),
            contributions: Vec::new(),
        });
        event.source = Some(EventSource::SubDebate { id: 8 });
        assert_eq!(
            bill_event_description(&event, &b, &links()).unwrap(),
            "The bill's <a href=\"http://theyworkforyou.co.nz/debates/2007/nov/20/electoral\">second reading debate on 20 November 2007</a> has been published."
        );

        let mut published = BillEvent::new("introduction", date(2007, 7, 20));
        published.source = Some(EventSource::NzlEvent { id: 1 });
        assert_eq!(
            bill_event_description(&published, &b, &links()).unwrap(),
            "The bill as <a href=\"http://legislation.govt.nz/v1\">introduced</a> published at legislation.govt.nz."
        );
    }

    #[test]
    fn test_submission_alert() {
        let b = bill();
        assert_eq!(
            submission_alert(&b, date(2007, 8, 1)),
            "<a href=\"http://www.parliament.nz/en-NZ/SC/SubmCalled?bill=electoral\">Make a submission on the Electoral Finance Bill</a> (link to external Parliament website)."
        );
        assert_eq!(submission_alert(&b, date(2007, 9, 2)), "");
    }

    #[test]
    fn test_event_dates() {
        let mut event = BillEvent::new("Second Reading", date(2007, 11, 20));
        assert_eq!(event_dates(&event), "20 November 2007");

        for (id, day, first) in [(1, 13, "Speech"), (2, 20, "<p>Debate resumed from 13 November.</p>")] {
            event.debates.push(Debate {
                id,
                date: date(2007, 11, day),
                url: format!("http://theyworkforyou.co.nz/debates/{}", id),
                contributions: vec![Contribution::speech(first)],
            });
        }
        assert_eq!(
            event_dates(&event),
            "<a href=\"http://theyworkforyou.co.nz/debates/2\">20 November 2007 (resumed)</a>,<br />\
             <a href=\"http://theyworkforyou.co.nz/debates/1\">13 November 2007</a>"
        );
    }

    #[test]
    fn test_labels() {
        let mut b = bill();
        assert_eq!(bill_type_label(&b), "Govt.");
        b.bill_type = BillType::Member;
        assert_eq!(bill_type_label(&b), "Member");
        assert_eq!(party_name(&b), "Labour");
        b.party_in_charge = None;
        assert_eq!(party_name(&b), "no party Mark Burton");
        b.party_in_charge = Some(Party {
            short: "Progressive".to_string(),
            name: String::new(),
        });
        assert_eq!(party_name(&b), "Progres-<br/>sive");
    }
}
