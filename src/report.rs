//! Per-surah completeness statistics over the final sorted rows.

use std::collections::{BTreeMap, BTreeSet};

use ayah_types::{Report, SurahSummary, VerseRecord};

use crate::pipeline::ScanStats;
use crate::quran;

const MISSING_PREVIEW_LEN: usize = 20;

pub fn build_report(rows: &[VerseRecord], stats: ScanStats) -> Report {
    let mut by_surah: BTreeMap<u16, Vec<u16>> = BTreeMap::new();
    for row in rows {
        by_surah
            .entry(row.surah_number)
            .or_default()
            .push(row.ayah_number);
    }

    let surah_summary: BTreeMap<u16, SurahSummary> = by_surah
        .iter()
        .map(|(&surah, ayahs)| (surah, summarize_surah(surah, ayahs)))
        .collect();

    Report {
        rows_written: rows.len(),
        surah_count: surah_summary.len(),
        surah_min: surah_summary.keys().next().copied(),
        surah_max: surah_summary.keys().next_back().copied(),
        messages_scanned: stats.messages_scanned,
        messages_with_ayah_blocks: stats.messages_with_ayah_blocks,
        surah_summary,
    }
}

/// `ayahs` must be non-empty.
fn summarize_surah(surah: u16, ayahs: &[u16]) -> SurahSummary {
    let present: BTreeSet<u16> = ayahs.iter().copied().collect();
    let min_ayah = present.first().copied().unwrap_or(0);
    let max_ayah = present.last().copied().unwrap_or(0);

    let bound = quran::max_ayah(surah).unwrap_or(max_ayah);
    let missing: Vec<u16> = (1..=bound).filter(|a| !present.contains(a)).collect();

    SurahSummary {
        count: ayahs.len(),
        min_ayah,
        max_ayah,
        missing_count: missing.len(),
        first_missing_preview: missing.into_iter().take(MISSING_PREVIEW_LEN).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(surah: u16, ayah: u16) -> VerseRecord {
        VerseRecord {
            surah_number: surah,
            ayah_number: ayah,
            ..Default::default()
        }
    }

    fn stats(scanned: usize, with_blocks: usize) -> ScanStats {
        ScanStats {
            messages_scanned: scanned,
            messages_with_ayah_blocks: with_blocks,
        }
    }

    #[test]
    fn test_empty_report() {
        let report = build_report(&[], stats(4, 0));
        assert_eq!(report.rows_written, 0);
        assert_eq!(report.surah_count, 0);
        assert_eq!(report.surah_min, None);
        assert_eq!(report.surah_max, None);
        assert_eq!(report.messages_scanned, 4);
        assert!(report.surah_summary.is_empty());
    }

    #[test]
    fn test_missing_verses_against_bound() {
        let rows = [row(1, 2), row(1, 3), row(1, 7)];
        let report = build_report(&rows, stats(3, 2));
        let s = &report.surah_summary[&1];
        assert_eq!(s.count, 3);
        assert_eq!((s.min_ayah, s.max_ayah), (2, 7));
        assert_eq!(s.missing_count, 4);
        assert_eq!(s.first_missing_preview, vec![1, 4, 5, 6]);
        assert_eq!(report.messages_with_ayah_blocks, 2);
    }

    #[test]
    fn test_preview_capped_at_twenty() {
        let report = build_report(&[row(2, 255)], stats(1, 1));
        let s = &report.surah_summary[&2];
        assert_eq!(s.missing_count, 285);
        assert_eq!(s.first_missing_preview, (1..=20).collect::<Vec<u16>>());
    }

    #[test]
    fn test_surah_span_and_count() {
        let rows = [row(2, 1), row(18, 10), row(114, 6), row(114, 1)];
        let report = build_report(&rows, stats(9, 3));
        assert_eq!(report.rows_written, 4);
        assert_eq!(report.surah_count, 3);
        assert_eq!(report.surah_min, Some(2));
        assert_eq!(report.surah_max, Some(114));
        assert_eq!(report.surah_summary[&114].missing_count, 4);
    }

    #[test]
    fn test_report_serializes_with_string_keys() {
        let report = build_report(&[row(1, 1)], stats(1, 1));
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["surah_summary"]["1"]["count"], 1);
        assert_eq!(v["surah_summary"]["1"]["first_missing_preview"][0], 2);
    }
}
