//! Recognition of the procedural phrases that end or bound a debate.

use crate::markup::strip_markup;
use regex::Regex;
use std::sync::OnceLock;

pub const MOTION_AGREED: &str = "Motion agreed to.";

fn bill_reading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)bills? read a (first|second|third) time\.?").expect("valid bill reading regex")
    })
}

fn that_clause_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"That the .*").expect("valid motion clause regex"))
}

/// True when the text, once normalized, is exactly "Motion agreed to."
pub fn motion_agreed(text: &str) -> bool {
    strip_markup(text) == MOTION_AGREED
}

/// The "Bill read a first|second|third time" phrase in the normalized text
pub fn bill_reading_match(text: &str) -> Option<String> {
    let stripped = strip_markup(text);
    bill_reading_regex()
        .find(&stripped)
        .map(|m| m.as_str().to_string())
}

pub fn is_bill_reading(text: &str) -> bool {
    bill_reading_match(text).is_some()
}

/// The motion put to the House, from "That the" to the end of the line
pub fn that_clause(text: &str) -> Option<&str> {
    that_clause_regex().find(text).map(|m| m.as_str())
}

/// Interludes left out of a procedural summary
pub fn is_dropped_interlude(raw: &str) -> bool {
    raw.contains("Waiata") || raw.contains("Sitting suspended")
}

/// Contributions at which a backward walk through a debate stops: the House
/// resuming after committee, or committee-stage clause text.
pub fn ends_walk(raw: &str) -> bool {
    if raw.contains("House resumed") {
        return true;
    }
    let stripped = strip_markup(raw);
    let trimmed = stripped.trim();
    trimmed.starts_with("Clause") || trimmed.starts_with("[An interpretation")
}
