//! Outcome narratives inferred from vote results and debate transcripts.
//!
//! Transcripts carry no outcome field. The outcome is read off the closing
//! contributions: a "Motion agreed to." with the motion taken from the speech
//! before it, or the run of procedural statements that ends the debate.
//! Committee linking is applied by the caller.

use crate::links::Links;
use crate::markup::strip_markup;
use crate::procedural::{ends_walk, is_bill_reading, is_dropped_interlude, motion_agreed, that_clause};
use crate::types::{BillEvent, Contribution};

pub(crate) const PARAGRAPH_BREAK: &str = "<br /><br />";
const CLAUSE_BREAK: &str = ":<br />";

/// The contribution `n` places before the most recent one
fn from_end(contributions: &[Contribution], n: usize) -> Option<&Contribution> {
    contributions.len().checked_sub(n + 1).map(|i| &contributions[i])
}

/// "Motion agreed to:<br />" followed by the motion put in the speech before it
fn motion_agreed_clause(motion: &Contribution, preceding: Option<&Contribution>) -> String {
    let stripped = strip_markup(&motion.text);
    let mut result = format!(
        "{}{}",
        stripped.strip_suffix('.').unwrap_or(&stripped),
        CLAUSE_BREAK
    );
    if let Some(clause) = preceding
        .filter(|c| c.is_speech())
        .and_then(|c| that_clause(&c.text))
    {
        result.push_str(&strip_markup(clause));
    }
    result
}

/// What the closing contributions of a voted debate add to the vote result
fn closing_procedure(contributions: &[Contribution]) -> Option<String> {
    let last = from_end(contributions, 0)?;
    let previous = from_end(contributions, 1);

    if last.is_procedural() {
        if motion_agreed(&last.text) {
            Some(motion_agreed_clause(last, previous))
        } else if is_bill_reading(&last.text) {
            Some(strip_markup(&last.text))
        } else {
            // Renders like a reading. Kept as its own branch until the wording
            // for other closing procedures is settled.
            Some(strip_markup(&last.text))
        }
    } else {
        previous
            .filter(|c| c.is_procedural())
            .map(|c| strip_markup(&c.text))
    }
}

/// Narrative for an event with votes: each vote's result, readings linked to
/// the contribution that put the question, then the closing procedure when
/// there is a single vote.
pub fn vote_narrative(event: &BillEvent, links: &Links) -> String {
    let mut result = event
        .present_votes()
        .map(|vote| {
            if is_bill_reading(&vote.result) {
                links.link_to_contribution(&vote.result, vote.contribution.as_ref())
            } else {
                vote.result.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(PARAGRAPH_BREAK);

    if event.votes.len() == 1 {
        let closing = event
            .debates
            .first()
            .and_then(|debate| closing_procedure(&debate.contributions));
        if let Some(closing) = closing {
            result.push_str(PARAGRAPH_BREAK);
            result.push_str(&closing);
        }
    }

    result
}

/// Narrative for a debated event without votes, read backwards from the most
/// recent contribution of the first debate.
pub fn contribution_narrative(event: &BillEvent, links: &Links) -> String {
    let Some(debate) = event.debates.first() else {
        return String::new();
    };
    let contributions = debate.contributions.as_slice();
    let Some(latest) = from_end(contributions, 0) else {
        return String::new();
    };

    if motion_agreed(&latest.text) {
        let mut result = motion_agreed_clause(latest, from_end(contributions, 1));

        if let Some(reading) = from_end(contributions, 2)
            .filter(|c| c.is_procedural() && c.text.contains("Bill read"))
        {
            result = format!("{}{}{}", strip_markup(&reading.text), PARAGRAPH_BREAK, result);
        }

        if let Some(stem) = result.strip_suffix(CLAUSE_BREAK) {
            result = format!("{}.", stem);
        }
        result
    } else {
        closing_statements(contributions, links)
    }
}

/// The unbroken run of procedural statements at the end of a debate, in
/// transcript order. Readings are linked to the transcript; waiata and
/// suspensions are left out.
fn closing_statements(contributions: &[Contribution], links: &Links) -> String {
    let mut recorded = Vec::new();

    for statement in contributions.iter().rev() {
        if !statement.is_procedural() || ends_walk(&statement.text) {
            break;
        }
        let text = strip_markup(&statement.text);
        if is_bill_reading(&text) {
            recorded.push(links.link_to_contribution(&text, Some(statement)));
        } else if !is_dropped_interlude(&statement.text) {
            recorded.push(text);
        }
    }

    recorded.reverse();
    recorded.join(PARAGRAPH_BREAK)
}
