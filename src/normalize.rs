//! Digit and whitespace normalization shared by every pipeline stage.

use regex::Regex;
use std::sync::LazyLock;

static RE_BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Map Extended Arabic-Indic (U+06F0–U+06F9) and Arabic-Indic
/// (U+0660–U+0669) digits to ASCII. Everything else is untouched.
pub fn normalize_digits(s: &str) -> String {
    s.chars().map(ascii_digit).collect()
}

fn ascii_digit(c: char) -> char {
    let offset = match c {
        '\u{06F0}'..='\u{06F9}' => c as u32 - 0x06F0,
        '\u{0660}'..='\u{0669}' => c as u32 - 0x0660,
        _ => return c,
    };
    char::from_digit(offset, 10).unwrap_or(c)
}

/// Parse a numeral written in any of the accepted digit alphabets.
pub fn parse_number(s: &str) -> Option<u32> {
    let ascii = normalize_digits(s.trim());
    if ascii.is_empty() || !ascii.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    ascii.parse().ok()
}

/// Unify line endings, collapse 3+ newlines to 2 and trim.
pub fn clean_text(s: &str) -> String {
    let unified = unify_line_endings(s);
    RE_BLANK_RUN.replace_all(&unified, "\n\n").trim().to_string()
}

pub fn unify_line_endings(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Comparison form: cleaned, whitespace collapsed, lowercased.
pub fn compare_key(s: &str) -> String {
    RE_WHITESPACE
        .replace_all(&clean_text(s), " ")
        .trim()
        .to_lowercase()
}
