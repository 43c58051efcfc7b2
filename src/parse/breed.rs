use regex::Regex;
use std::sync::LazyLock;

/// A breed pick as read from the model: a catalog position plus the reason line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub index: usize,
    pub reason: String,
}

type Strategy = fn(&str) -> Option<Recommendation>;

/// Tried in order. First hit wins.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("two-line", two_line_reply),
    ("first-number", first_number_with_reason),
];

static TWO_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\n(.+)$").expect("two-line pattern is valid"));

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("number pattern is valid"));

/// Read a breed index and reason out of the text model's reply.
///
/// Returns `None` when no strategy finds a usable pair. Catalog bounds are
/// not checked here.
pub fn parse_recommendation(text: &str) -> Option<Recommendation> {
    if text.trim().is_empty() {
        return None;
    }

    STRATEGIES.iter().find_map(|(name, strategy)| {
        let found = strategy(text);
        if let Some(rec) = &found {
            tracing::debug!(strategy = name, index = rec.index, "parsed breed recommendation");
        }
        found
    })
}

/// The format the prompt asks for: digits, newline, one reason line, nothing else.
fn two_line_reply(text: &str) -> Option<Recommendation> {
    let caps = TWO_LINES.captures(text.trim())?;
    let index = caps[1].parse().ok()?;
    Some(Recommendation {
        index,
        reason: caps[2].to_string(),
    })
}

/// Chatty replies: take the first number anywhere, and the first non-numeric
/// line as the reason, preferring lines after a line holding only that number.
fn first_number_with_reason(text: &str) -> Option<Recommendation> {
    let digits = FIRST_NUMBER.find(text)?.as_str();
    let index = digits.parse().ok()?;

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() < 2 {
        return None;
    }

    let is_reason = |line: &&str| *line != digits && !line.chars().all(|c| c.is_ascii_digit());
    let after_number = lines
        .iter()
        .position(|line| *line == digits)
        .map(|pos| &lines[pos + 1..])
        .unwrap_or(&[]);

    let reason = after_number
        .iter()
        .copied()
        .find(is_reason)
        .or_else(|| lines.iter().copied().find(is_reason))?;

    Some(Recommendation {
        index,
        reason: reason.to_string(),
    })
}
