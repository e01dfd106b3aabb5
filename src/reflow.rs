//! Commentary cleanup: strip the consumed verse spans and re-join
//! soft-wrapped lines into paragraphs.

use regex::Regex;
use std::sync::LazyLock;

use crate::classify::Classification;
use crate::normalize::clean_text;

// A line opening a new paragraph: emoji bullets, dashes, "1." lists.
static RE_BULLET_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[🔸🔹🔺🔻🔅🔆📖📚♦️❇️⭐🌸🌼🌷•▪\-]|\d+\.)").unwrap()
});

// Book markers, {notes} and fully bracketed lines stand alone.
static RE_PROTECTED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:📖|📚|\{.*\}|[\[(].*[\])]\s*$)").unwrap());

static RE_SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:[.!?۔؟:;*]["'”’)\]}]*|[)\]}][.!?۔؟:;]?)$"#).unwrap()
});

// Cross-post navigation hints, never content.
static RE_CONTINUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:to\s*be\s*continued|description\s*part\s*\d+|part\s*\d+\s*description|in\s*shaa?\s*allah.*next\s*post)\b",
    )
    .unwrap()
});

pub fn is_continuation_marker(line: &str) -> bool {
    RE_CONTINUATION.is_match(line)
}

/// Commentary of a section: the section minus the verse text and
/// translation spans attributed to its verses, reflowed.
///
/// At most `verse_count` Arabic lines and translation spans are removed,
/// once each, so later quotations stay in the commentary.
pub fn build_commentary(section: &str, found: &Classification, verse_count: usize) -> String {
    let mut text = section.to_string();

    for line in found.arabic_lines.iter().take(verse_count) {
        text = text.replacen(line.as_str(), "", 1);
    }

    if !found.arabic_lines.is_empty() {
        for span in found.translation_spans().take(verse_count) {
            text = text.replacen(span, "", 1);
        }
    }

    reflow(&text)
}

/// Re-join wrapped lines into paragraphs separated by one blank line.
///
/// A paragraph ends on a blank line, after terminal punctuation, or
/// before a bullet/protected line. Continuation markers are dropped and
/// end the paragraph.
pub fn reflow(text: &str) -> String {
    reflow_lines(text, true)
}

/// [`reflow`] for text that was already reflowed once: continuation
/// markers were removed line by line then, and a joined paragraph must
/// not be re-tested as a whole.
pub fn reflow_paragraphs(text: &str) -> String {
    reflow_lines(text, false)
}

fn reflow_lines(text: &str, drop_continuations: bool) -> String {
    let text = clean_text(text);
    if text.is_empty() {
        return String::new();
    }

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Option<String> = None;

    for raw in text.split('\n') {
        let line = raw.trim();

        if line.is_empty() || (drop_continuations && is_continuation_marker(line)) {
            paragraphs.extend(current.take());
            continue;
        }

        current = Some(match current.take() {
            None => line.to_string(),
            Some(prev) if starts_new_paragraph(&prev, line) => {
                paragraphs.push(prev);
                line.to_string()
            }
            Some(prev) => format!("{prev} {line}"),
        });
    }
    paragraphs.extend(current);

    clean_text(&paragraphs.join("\n\n"))
}

fn starts_new_paragraph(prev: &str, line: &str) -> bool {
    RE_BULLET_START.is_match(line)
        || RE_PROTECTED_LINE.is_match(line)
        || RE_SENTENCE_END.is_match(prev.trim_end())
}
