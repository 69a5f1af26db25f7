//! Typed rating extraction from free-text replies.
//!
//! Two parsing contracts: the first-round stress check accepts a digit 0–5 or
//! its spelled-out form; the helpfulness rating accepts 0–10. Both return a
//! sum type instead of an optional so callers must handle the no-score case
//! explicitly.

use once_cell::sync::Lazy;
use regex::Regex;

static STRESS_CHECK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b([0-5]|zero|one|two|three|four|five)\b").expect("valid stress-check regex")
});

static HELPFULNESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([0-9]|10)\b").expect("valid helpfulness regex"));

/// Outcome of running a rating parser over a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedRating {
    /// A rating was found.
    Score(u8),
    /// Nothing in the message matched the contract.
    NoScore,
}

impl ParsedRating {
    /// Returns the score if one was found.
    pub fn score(&self) -> Option<u8> {
        match self {
            ParsedRating::Score(s) => Some(*s),
            ParsedRating::NoScore => None,
        }
    }
}

/// Parses the first-round 0–5 stress check.
///
/// Accepts a digit or the spelled-out words zero through five,
/// case-insensitively. The first match wins.
pub fn parse_stress_check(message: &str) -> ParsedRating {
    let Some(caps) = STRESS_CHECK_RE.captures(message) else {
        return ParsedRating::NoScore;
    };
    let token = caps[1].to_lowercase();
    let score = match token.as_str() {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        digit => digit.parse().unwrap_or(0),
    };
    ParsedRating::Score(score)
}

/// Parses the 0–10 helpfulness rating.
pub fn parse_helpfulness(message: &str) -> ParsedRating {
    match HELPFULNESS_RE.captures(message) {
        Some(caps) => ParsedRating::Score(caps[1].parse().unwrap_or(0)),
        None => ParsedRating::NoScore,
    }
}
