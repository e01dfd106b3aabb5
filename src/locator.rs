//! Verse-marker detection and per-verse sectioning of a post.

use regex::Regex;
use std::sync::LazyLock;

use crate::context::ChapterContext;
use crate::normalize::{clean_text, parse_number};
use crate::quran;

// Trailing `*`/`_` is consumed only when it closes the line; on a
// longer line it opens the translation span.
//
// Marker forms seen in the channel:
//   Ayat No: 5
//   *Aayat no. ۱۲*
//   🔹 Ayat No 10-12
//   Aayat No:- 255 –257
static RE_AYAH_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)A(?:a)?y(?:a)?t?\s*(?:No\.?|no\.?)\s*[:#-]*\s*(?P<start>[0-9\x{06F0}-\x{06F9}\x{0660}-\x{0669}]+)(?:[ \t]*[-\x{2013}][ \t]*(?P<end>[0-9\x{06F0}-\x{06F9}\x{0660}-\x{0669}]+))?[ \t]*[~:.)\]]*(?:[*_]+[ \t]*$)?"
    ).unwrap()
});

/// Widest verse range one marker may expand to (end - start).
const MAX_RANGE_SPAN: u32 = 10;

/// A header-valid marker occurrence, before any verse-number validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Byte offset of the marker start.
    pub start: usize,
    /// Byte offset just past the marker.
    pub end: usize,
    pub first: Option<u32>,
    pub last: Option<u32>,
}

/// Text governed by one accepted marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Never empty, ascending.
    pub verse_numbers: Vec<u16>,
    pub raw_text: String,
}

/// Find every marker that stands at the head of its line: nothing but
/// decoration (no ASCII letter or digit) may precede it on that line.
pub fn find_markers(text: &str) -> Vec<Marker> {
    RE_AYAH_MARKER
        .captures_iter(text)
        .filter_map(|caps| {
            let m = caps.get(0)?;
            if !is_line_head(text, m.start()) {
                return None;
            }
            Some(Marker {
                start: m.start(),
                end: m.end(),
                first: caps.name("start").and_then(|n| parse_number(n.as_str())),
                last: caps.name("end").and_then(|n| parse_number(n.as_str())),
            })
        })
        .collect()
}

fn is_line_head(text: &str, pos: usize) -> bool {
    let line_start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    !text[line_start..pos]
        .chars()
        .any(|c| c.is_ascii_alphanumeric())
}

/// Verse numbers a marker stands for, validated against the surah bound.
fn verse_numbers(marker: &Marker, max_ayah: u16) -> Option<Vec<u16>> {
    let max = u32::from(max_ayah);
    let first = marker.first.filter(|n| (1..=max).contains(n))?;

    let last = marker
        .last
        .filter(|&end| first <= end && end <= max && end - first <= MAX_RANGE_SPAN)
        .unwrap_or(first);

    // first..=last is within 1..=max_ayah, so the narrowing cannot fail.
    Some((first..=last).filter_map(|n| u16::try_from(n).ok()).collect())
}

/// Split `text` into sections using precomputed `markers`.
///
/// Every header-valid marker bounds the previous section, even one whose
/// verse number is then rejected for the surah.
pub fn build_sections(surah: u16, text: &str, markers: &[Marker]) -> Vec<Section> {
    let Some(max_ayah) = quran::max_ayah(surah) else {
        return Vec::new();
    };

    let mut sections = Vec::new();
    for (idx, marker) in markers.iter().enumerate() {
        let Some(verse_numbers) = verse_numbers(marker, max_ayah) else {
            continue;
        };

        let body_start = marker.end;
        let body_end = markers.get(idx + 1).map_or(text.len(), |next| next.start);
        if body_end <= body_start {
            continue;
        }

        let raw_text = clean_text(&text[body_start..body_end]);
        if raw_text.is_empty() {
            continue;
        }

        sections.push(Section {
            verse_numbers,
            raw_text,
        });
    }
    sections
}

/// Sections of a post under the current context.
///
/// `None` when there is no surah yet or the post has no marker at all;
/// `Some` may still be empty when every marker was rejected.
pub fn locate_sections(ctx: &ChapterContext, text: &str) -> Option<Vec<Section>> {
    let surah = ctx.number?;
    let markers = find_markers(text);
    if markers.is_empty() {
        return None;
    }
    Some(build_sections(surah, text, &markers))
}
