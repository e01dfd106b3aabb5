//! Diagnostics over a finished dataset. Nothing here modifies rows.

use std::collections::HashSet;

use ayah_types::{AuditSample, DatasetValidation, TranslationAudit, VerseRecord};

use crate::classify::extract_translations;
use crate::quran;

const MAX_AUDIT_SAMPLES: usize = 80;

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn has_valid_coordinates(row: &VerseRecord) -> bool {
    quran::is_valid_ayah(row.surah_number, row.ayah_number)
}

// ── Validation ───────────────────────────────────────────────────────

pub fn validate_rows(rows: &[VerseRecord]) -> DatasetValidation {
    let mut report = DatasetValidation {
        total: rows.len(),
        ..Default::default()
    };

    let mut seen = HashSet::new();
    for row in rows {
        if !has_valid_coordinates(row) || blank(&row.surah_name) {
            report.invalid_required += 1;
        }
        if blank(&row.arabic_text) {
            report.missing_arabic += 1;
        }
        if blank(&row.translation) {
            report.missing_translation += 1;
        }
        if blank(&row.tafseer) {
            report.missing_tafseer += 1;
        }
        if !seen.insert(row.key()) {
            report.duplicate_keys += 1;
        }
    }
    report.unique_keys = seen.len();

    for (label, count) in [
        ("Missing Arabic", report.missing_arabic),
        ("Missing Translation", report.missing_translation),
        ("Missing Tafseer", report.missing_tafseer),
        ("Duplicate Keys", report.duplicate_keys),
    ] {
        if count > 0 {
            report.warnings.push(format!("{label}: {count}"));
        }
    }

    report
}

// ── Translation audit ────────────────────────────────────────────────

/// A translation-shaped span left behind in the commentary, if any.
pub fn recoverable_translation(row: &VerseRecord) -> Option<String> {
    extract_translations(&row.tafseer)
        .into_iter()
        .next()
        .map(|span| span.text)
}

pub fn audit_translations(rows: &[VerseRecord]) -> TranslationAudit {
    let mut audit = TranslationAudit {
        rows: rows.len(),
        ..Default::default()
    };

    for row in rows {
        if !blank(&row.translation) {
            audit.visible_translation += 1;
            continue;
        }
        audit.empty_translation += 1;

        if recoverable_translation(row).is_some() {
            audit.recoverable += 1;
            audit.visible_translation += 1;
            if audit.samples.len() < MAX_AUDIT_SAMPLES {
                audit.samples.push(AuditSample {
                    surah_number: row.surah_number,
                    ayah_number: row.ayah_number,
                    source_post_id: row.source_post_id,
                });
            }
        }
    }

    audit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(surah: u16, ayah: u16) -> VerseRecord {
        VerseRecord {
            surah_number: surah,
            surah_name: format!("Surah {surah}"),
            juz_number: quran::juz_for(surah, ayah),
            ayah_number: ayah,
            arabic_text: "بِسْمِ اللَّهِ الرَّحْمَٰنِ".to_string(),
            translation: "In the name of Allah".to_string(),
            tafseer: "Notes.".to_string(),
            source_post_id: Some(1),
        }
    }

    // ── validation ───────────────────────────────────────────────────

    #[test]
    fn test_clean_dataset() {
        let v = validate_rows(&[row(1, 1), row(1, 2)]);
        assert_eq!(v.total, 2);
        assert_eq!(v.unique_keys, 2);
        assert!(v.warnings.is_empty());
        assert!(v.is_clean());
    }

    #[test]
    fn test_invalid_required_fields() {
        let mut unnamed = row(2, 3);
        unnamed.surah_name = "  ".to_string();
        let rows = [row(0, 1), row(115, 1), row(1, 0), row(1, 8), unnamed];
        let v = validate_rows(&rows);
        assert_eq!(v.invalid_required, 5);
        assert!(!v.is_clean());
    }

    #[test]
    fn test_missing_fields_and_duplicates_warn() {
        let mut bare = row(2, 5);
        bare.arabic_text.clear();
        bare.translation.clear();
        bare.tafseer = "\n".to_string();
        let rows = [row(2, 5), bare, row(2, 6)];
        let v = validate_rows(&rows);
        assert_eq!(v.duplicate_keys, 1);
        assert_eq!(v.unique_keys, 2);
        assert_eq!(
            v.warnings,
            vec![
                "Missing Arabic: 1",
                "Missing Translation: 1",
                "Missing Tafseer: 1",
                "Duplicate Keys: 1",
            ]
        );
        assert_eq!(
            v.summarize(),
            "total=3, unique=2, invalid=0, missingArabic=1, missingTranslation=1, missingTafseer=1, duplicates=1"
        );
    }

    // ── audit ────────────────────────────────────────────────────────

    #[test]
    fn test_audit_counts_recoverable_spans() {
        let mut quoted = row(2, 2);
        quoted.translation.clear();
        quoted.tafseer = "He said: “This is the Book, no doubt in it”".to_string();
        let mut underscored = row(2, 3);
        underscored.translation.clear();
        underscored.tafseer = "_Who believe in the unseen_ explained".to_string();
        let mut lost = row(2, 4);
        lost.translation.clear();
        lost.tafseer = "\"short\" only".to_string();

        let audit = audit_translations(&[row(2, 1), quoted, underscored, lost]);
        assert_eq!(audit.rows, 4);
        assert_eq!(audit.empty_translation, 3);
        assert_eq!(audit.recoverable, 2);
        assert_eq!(audit.visible_translation, 3);
        let keys: Vec<_> = audit
            .samples
            .iter()
            .map(|s| (s.surah_number, s.ayah_number))
            .collect();
        assert_eq!(keys, vec![(2, 2), (2, 3)]);
    }

    #[test]
    fn test_audit_samples_capped() {
        let rows: Vec<_> = (1..=100)
            .map(|a| {
                let mut r = row(2, a);
                r.translation.clear();
                r.tafseer = "\"a quotation long enough to count\"".to_string();
                r
            })
            .collect();
        let audit = audit_translations(&rows);
        assert_eq!(audit.recoverable, 100);
        assert_eq!(audit.samples.len(), MAX_AUDIT_SAMPLES);
    }
}
