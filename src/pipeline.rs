//! The extraction fold: posts in archive order → keyed verse records.
//!
//! State is threaded explicitly through [`step`]; nothing is global.

use std::collections::BTreeMap;

use ayah_types::{Report, VerseRecord};
use tracing::{debug, info};

use crate::archive::{Archive, Post};
use crate::classify::classify;
use crate::context::{ChapterContext, update_context};
use crate::locator::{Section, locate_sections};
use crate::merge::merge_records;
use crate::normalize::unify_line_endings;
use crate::quran;
use crate::reflow::build_commentary;
use crate::report::build_report;

/// Message counters feeding the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub messages_scanned: usize,
    pub messages_with_ayah_blocks: usize,
}

/// Everything carried from one post to the next.
#[derive(Debug, Clone, Default)]
pub struct FoldState {
    pub context: ChapterContext,
    pub records: BTreeMap<(u16, u16), VerseRecord>,
    pub stats: ScanStats,
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub rows: Vec<VerseRecord>,
    pub report: Report,
}

/// Run the whole pipeline over an archive.
pub fn extract(archive: &Archive) -> Extraction {
    let state = archive.messages().fold(FoldState::default(), step);

    let mut rows: Vec<VerseRecord> = state.records.into_values().collect();
    rows.sort_by_key(VerseRecord::sort_key);
    let report = build_report(&rows, state.stats);

    info!(
        rows = rows.len(),
        messages = state.stats.messages_scanned,
        with_blocks = state.stats.messages_with_ayah_blocks,
        "extraction finished"
    );

    Extraction { rows, report }
}

/// Fold one message post into the state.
pub fn step(mut state: FoldState, post: &Post) -> FoldState {
    state.stats.messages_scanned += 1;

    let text = post.flat_text();
    if text.is_empty() {
        return state;
    }
    let text = unify_line_endings(&text);

    state.context = update_context(state.context, &text);
    let Some(surah) = state.context.number else {
        return state;
    };
    let Some(sections) = locate_sections(&state.context, &text) else {
        return state;
    };
    state.stats.messages_with_ayah_blocks += 1;
    debug!(post = ?post.id, surah, sections = sections.len(), "parsed post");

    let surah_name = state
        .context
        .display_name()
        .unwrap_or_else(|| format!("Surah {surah}"));

    for section in &sections {
        for candidate in section_candidates(surah, &surah_name, section, post.id) {
            state.records = fold_candidate(state.records, candidate);
        }
    }

    state
}

/// One candidate per verse of the section. The i-th verse takes the
/// i-th Arabic line and translation, when that many were found.
pub fn section_candidates(
    surah: u16,
    surah_name: &str,
    section: &Section,
    source_post_id: Option<i64>,
) -> Vec<VerseRecord> {
    let found = classify(&section.raw_text);
    let tafseer = build_commentary(&section.raw_text, &found, section.verse_numbers.len());
    let translations: Vec<&str> = found.translation_texts().collect();

    section
        .verse_numbers
        .iter()
        .enumerate()
        .map(|(i, &ayah)| VerseRecord {
            surah_number: surah,
            surah_name: surah_name.to_string(),
            juz_number: quran::juz_for(surah, ayah),
            ayah_number: ayah,
            arabic_text: found.arabic_lines.get(i).cloned().unwrap_or_default(),
            translation: translations.get(i).map(|t| t.to_string()).unwrap_or_default(),
            tafseer: tafseer.clone(),
            source_post_id,
        })
        .collect()
}

/// Insert a new key directly; replace an existing one with the merge.
pub fn fold_candidate(
    mut records: BTreeMap<(u16, u16), VerseRecord>,
    candidate: VerseRecord,
) -> BTreeMap<(u16, u16), VerseRecord> {
    let merged = match records.get(&candidate.key()) {
        Some(existing) => merge_records(existing, &candidate),
        None => candidate,
    };
    records.insert(merged.key(), merged);
    records
}
