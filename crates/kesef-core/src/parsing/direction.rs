use crate::rules::schema::TranslationDef;
use regex::Regex;
use std::sync::LazyLock;

/// A Hebrew letter directly followed by a Latin letter. Only shows up when
/// mixed-script text has been reversed by a naive extractor.
static HEBREW_THEN_LATIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[א-ת][a-zA-Z]").expect("valid regex"));

pub fn is_hebrew(c: char) -> bool {
    ('\u{0590}'..='\u{05FF}').contains(&c)
}

pub fn contains_hebrew(text: &str) -> bool {
    text.chars().any(is_hebrew)
}

/// Decide whether `text` looks like right-to-left text stored in reverse.
///
/// `markers` are reversed suffixes such as "י-", matched at the end of the
/// trimmed text. Reversed runs that start with a marker are left to the
/// translation table.
pub fn looks_reversed(text: &str, markers: &[String]) -> bool {
    if !contains_hebrew(text) {
        return false;
    }
    let trimmed = text.trim();
    let marker_hit = markers
        .iter()
        .filter(|m| !m.is_empty())
        .any(|m| trimmed.ends_with(m.as_str()));

    marker_hit || HEBREW_THEN_LATIN.is_match(trimmed)
}

/// Reverse `text` character by character when it looks reversed.
/// Best effort only; this is not a bidi algorithm.
pub fn repair(text: &str, markers: &[String]) -> String {
    if looks_reversed(text, markers) {
        text.chars().rev().collect()
    } else {
        text.to_string()
    }
}

/// Map a known garbled description to its readable form.
///
/// Exact match over the table first, then the first key contained in the
/// text, in table order. Unmatched text passes through trimmed.
pub fn translate(text: &str, table: &[TranslationDef]) -> String {
    let cleaned = text.trim();

    if let Some(t) = table.iter().find(|t| t.raw == cleaned) {
        return t.readable.clone();
    }

    table
        .iter()
        .find(|t| !t.raw.is_empty() && cleaned.contains(t.raw.as_str()))
        .map(|t| t.readable.clone())
        .unwrap_or_else(|| cleaned.to_string())
}
