#![allow(dead_code)]
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── Verse record ─────────────────────────────────────────────────────────

/// One verse of the reconstructed dataset, keyed by `(surah_number, ayah_number)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    #[serde(default)]
    pub surah_number: u16,
    #[serde(default)]
    pub surah_name: String,
    /// Derived from `(surah_number, ayah_number)` against the juz table.
    #[serde(default)]
    pub juz_number: u8,
    #[serde(default)]
    pub ayah_number: u16,
    #[serde(default)]
    pub arabic_text: String,
    #[serde(default)]
    pub translation: String,
    /// Commentary, reflowed paragraphs joined by a blank line.
    #[serde(default)]
    pub tafseer: String,
    /// Earliest post that contributed to this record.
    #[serde(default)]
    pub source_post_id: Option<i64>,
}

impl VerseRecord {
    pub fn key(&self) -> (u16, u16) {
        (self.surah_number, self.ayah_number)
    }

    /// Sort key used for every dataset ordering.
    pub fn sort_key(&self) -> (u16, u16, i64) {
        (
            self.surah_number,
            self.ayah_number,
            self.source_post_id.unwrap_or(0),
        )
    }
}

// ── Extraction report ────────────────────────────────────────────────────

/// Completeness of one surah against its verse bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurahSummary {
    pub count: usize,
    pub min_ayah: u16,
    pub max_ayah: u16,
    pub missing_count: usize,
    /// First 20 missing verse numbers, ascending.
    pub first_missing_preview: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub rows_written: usize,
    pub surah_count: usize,
    pub surah_min: Option<u16>,
    pub surah_max: Option<u16>,
    pub messages_scanned: usize,
    pub messages_with_ayah_blocks: usize,
    pub surah_summary: BTreeMap<u16, SurahSummary>,
}

// ── Dataset validation ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetValidation {
    pub total: usize,
    pub invalid_required: usize,
    pub missing_arabic: usize,
    pub missing_translation: usize,
    pub missing_tafseer: usize,
    pub duplicate_keys: usize,
    pub unique_keys: usize,
    pub warnings: Vec<String>,
}

impl DatasetValidation {
    /// One-line `key=value` rendering for terminal output.
    pub fn summarize(&self) -> String {
        format!(
            "total={}, unique={}, invalid={}, missingArabic={}, missingTranslation={}, missingTafseer={}, duplicates={}",
            self.total,
            self.unique_keys,
            self.invalid_required,
            self.missing_arabic,
            self.missing_translation,
            self.missing_tafseer,
            self.duplicate_keys
        )
    }

    pub fn is_clean(&self) -> bool {
        self.invalid_required == 0 && self.duplicate_keys == 0
    }
}

// ── Translation audit ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSample {
    pub surah_number: u16,
    pub ayah_number: u16,
    pub source_post_id: Option<i64>,
}

/// Rows whose translation is empty but whose commentary still holds
/// a span that looks like one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationAudit {
    pub rows: usize,
    pub empty_translation: usize,
    pub recoverable: usize,
    pub visible_translation: usize,
    pub samples: Vec<AuditSample>,
}
