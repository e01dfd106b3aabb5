//! Arabic-line and translation-span extraction from one verse section.
//!
//! Recognizers are tried in a fixed order and every match keeps the
//! exact span it consumed, so the commentary pass can strip it later.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::{clean_text, compare_key};

/// Residual marker labels that never count as verse text.
static RE_MARKER_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ayat|aayat|surah|surat").unwrap());

static RE_LATIN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]").unwrap());

/// Minimum Arabic-block characters for a line to count as verse text.
const MIN_ARABIC_CHARS: usize = 6;

/// Translation recognizers in precedence order.
static TRANSLATION_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![
        // "..." or “...” on one line
        ("quoted", Regex::new(r#"["“]([^"\n”]{15,})["”]"#).unwrap()),
        // _..._ emphasis on one line
        ("underscored", Regex::new(r"_([^_\n]{15,})_").unwrap()),
    ]
});

/// A translation candidate and the raw span it was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSpan {
    pub text: String,
    pub raw: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub arabic_lines: Vec<String>,
    pub translations: Vec<TranslationSpan>,
}

impl Classification {
    pub fn translation_texts(&self) -> impl Iterator<Item = &str> {
        self.translations.iter().map(|t| t.text.as_str())
    }

    pub fn translation_spans(&self) -> impl Iterator<Item = &str> {
        self.translations.iter().map(|t| t.raw.as_str())
    }
}

pub fn classify(section: &str) -> Classification {
    let arabic_lines = extract_arabic_lines(section);
    // Quotes only count as translation beside verse text.
    let translations = if arabic_lines.is_empty() {
        Vec::new()
    } else {
        extract_translations(section)
    };
    Classification {
        arabic_lines,
        translations,
    }
}

fn is_arabic(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

/// A line made of verse text only: no Latin letters and enough Arabic.
pub fn is_primary_arabic_line(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() || RE_LATIN.is_match(line) {
        return false;
    }
    line.chars().filter(|&c| is_arabic(c)).count() >= MIN_ARABIC_CHARS
}

fn is_line_decoration(c: char) -> bool {
    matches!(c, '*' | '_' | ' ' | '-' | '•' | '▪' | '\u{FE0F}' | '\t')
}

pub fn extract_arabic_lines(section: &str) -> Vec<String> {
    section
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && !RE_MARKER_LABEL.is_match(line))
        .filter(|line| is_primary_arabic_line(line))
        .map(|line| line.trim_matches(is_line_decoration).to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Quoted then underscored spans of 15+ chars, first occurrence per
/// normalized text. Unmarked lines are never translations.
pub fn extract_translations(section: &str) -> Vec<TranslationSpan> {
    let mut seen = HashSet::new();
    let mut spans = Vec::new();

    for (_, pattern) in TRANSLATION_PATTERNS.iter() {
        for caps in pattern.captures_iter(section) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let text = clean_text(inner.as_str());
            if text.is_empty() || !seen.insert(compare_key(&text)) {
                continue;
            }
            spans.push(TranslationSpan {
                text,
                raw: whole.as_str().to_string(),
            });
        }
    }

    spans
}
