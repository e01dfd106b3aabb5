//! Reconciliation of candidate records sharing a `(surah, ayah)` key.
//!
//! A merge always builds a fresh record; neither input is modified.

use ayah_types::VerseRecord;

use crate::normalize::{clean_text, compare_key};
use crate::reflow::reflow_paragraphs;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn longer(a: String, b: String) -> String {
    if char_len(&a) >= char_len(&b) { a } else { b }
}

/// Outcome of comparing two non-empty texts by normalized content.
enum Overlap {
    Same,
    FirstContainsSecond,
    SecondContainsFirst,
    Disjoint,
}

fn overlap(a: &str, b: &str) -> Overlap {
    let (a, b) = (compare_key(a), compare_key(b));
    if a == b {
        Overlap::Same
    } else if b.contains(&a) {
        Overlap::SecondContainsFirst
    } else if a.contains(&b) {
        Overlap::FirstContainsSecond
    } else {
        Overlap::Disjoint
    }
}

/// Prefer the richer of two variants of one field: the non-empty one,
/// then the one containing the other, then the longer.
pub fn pick_richer(first: &str, second: &str) -> String {
    let (a, b) = (clean_text(first), clean_text(second));
    if a.is_empty() {
        return b;
    }
    if b.is_empty() {
        return a;
    }
    match overlap(&a, &b) {
        Overlap::SecondContainsFirst => b,
        Overlap::FirstContainsSecond => a,
        Overlap::Same | Overlap::Disjoint => longer(a, b),
    }
}

/// Combine two commentaries, `first` being the earlier one.
///
/// Disjoint commentaries from different posts are concatenated; from
/// the same post they are competing parses and only the longer is kept.
pub fn append_unique(first: &str, second: &str, same_source: bool) -> String {
    let (a, b) = (reflow_paragraphs(first), reflow_paragraphs(second));
    if a.is_empty() {
        return b;
    }
    if b.is_empty() {
        return a;
    }
    match overlap(&a, &b) {
        Overlap::SecondContainsFirst => b,
        Overlap::FirstContainsSecond => a,
        Overlap::Same => longer(a, b),
        Overlap::Disjoint if same_source => longer(a, b),
        Overlap::Disjoint => reflow_paragraphs(&format!("{a}\n\n{b}")),
    }
}

/// Merge `candidate` into `existing`, returning the replacement record.
pub fn merge_records(existing: &VerseRecord, candidate: &VerseRecord) -> VerseRecord {
    let same_source = matches!(
        (existing.source_post_id, candidate.source_post_id),
        (Some(a), Some(b)) if a == b
    );

    let tafseer = if same_source {
        append_unique(&existing.tafseer, &candidate.tafseer, true)
    } else {
        let candidate_is_earlier = matches!(
            (existing.source_post_id, candidate.source_post_id),
            (Some(e), Some(c)) if c < e
        );
        let (earlier, later) = if candidate_is_earlier {
            (candidate, existing)
        } else {
            (existing, candidate)
        };
        append_unique(&earlier.tafseer, &later.tafseer, false)
    };

    let source_post_id = match (existing.source_post_id, candidate.source_post_id) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };

    VerseRecord {
        surah_number: existing.surah_number,
        surah_name: first_non_empty(&existing.surah_name, &candidate.surah_name),
        juz_number: if existing.juz_number != 0 {
            existing.juz_number
        } else {
            candidate.juz_number
        },
        ayah_number: existing.ayah_number,
        arabic_text: pick_richer(&existing.arabic_text, &candidate.arabic_text),
        translation: pick_richer(&existing.translation, &candidate.translation),
        tafseer,
        source_post_id,
    }
}

fn first_non_empty(a: &str, b: &str) -> String {
    if a.is_empty() { b } else { a }.to_string()
}
