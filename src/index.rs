//! Read-side index over a finished dataset: chapter list, verses per
//! chapter, keyed lookup and substring search.

use std::collections::BTreeMap;

use ayah_types::VerseRecord;
use serde::Serialize;

use crate::quran;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurahEntry {
    pub surah_number: u16,
    pub surah_name: String,
    pub ayah_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct QuranIndex {
    /// Ascending by chapter number; chapter 1 always present.
    pub surahs: Vec<SurahEntry>,
    pub ayahs_by_surah: BTreeMap<u16, Vec<VerseRecord>>,
    by_key: BTreeMap<(u16, u16), VerseRecord>,
}

impl QuranIndex {
    pub fn build(rows: &[VerseRecord]) -> Self {
        let mut clean: Vec<&VerseRecord> = rows
            .iter()
            .filter(|r| quran::is_valid_ayah(r.surah_number, r.ayah_number))
            .collect();
        clean.sort_by_key(|r| r.sort_key());

        let mut ayahs_by_surah: BTreeMap<u16, Vec<VerseRecord>> = BTreeMap::new();
        let mut names: BTreeMap<u16, String> = BTreeMap::new();
        let mut by_key = BTreeMap::new();

        for row in clean {
            ayahs_by_surah
                .entry(row.surah_number)
                .or_default()
                .push(row.clone());
            names.entry(row.surah_number).or_insert_with(|| {
                if row.surah_name.is_empty() {
                    format!("Surah {}", row.surah_number)
                } else {
                    row.surah_name.clone()
                }
            });
            // Later rows for a repeated key win.
            by_key.insert(row.key(), row.clone());
        }

        // Keep the opening chapter listed before any of it is imported.
        if !names.contains_key(&1) {
            names.insert(1, "Al-Fatihah".to_string());
            ayahs_by_surah.insert(1, Vec::new());
        }

        let surahs = names
            .into_iter()
            .map(|(surah_number, surah_name)| SurahEntry {
                surah_number,
                surah_name,
                ayah_count: ayahs_by_surah.get(&surah_number).map_or(0, Vec::len),
            })
            .collect();

        QuranIndex {
            surahs,
            ayahs_by_surah,
            by_key,
        }
    }

    pub fn ayahs(&self, surah: u16) -> &[VerseRecord] {
        self.ayahs_by_surah
            .get(&surah)
            .map_or(&[][..], Vec::as_slice)
    }

    pub fn lookup(&self, surah: u16, ayah: u16) -> Option<&VerseRecord> {
        self.by_key.get(&(surah, ayah))
    }

    /// Chapters whose number or name contains `query`, case-insensitively.
    pub fn filter_surahs(&self, query: &str) -> Vec<&SurahEntry> {
        let q = query.trim().to_lowercase();
        self.surahs
            .iter()
            .filter(|s| {
                q.is_empty()
                    || s.surah_number.to_string().contains(&q)
                    || s.surah_name.to_lowercase().contains(&q)
            })
            .collect()
    }
}

/// Verses whose number or any text field contains `query`, case-insensitively.
pub fn filter_ayahs<'a>(ayahs: &'a [VerseRecord], query: &str) -> Vec<&'a VerseRecord> {
    let q = query.trim().to_lowercase();
    ayahs
        .iter()
        .filter(|a| {
            q.is_empty()
                || a.ayah_number.to_string().contains(&q)
                || [&a.arabic_text, &a.translation, &a.tafseer]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&q))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(surah: u16, ayah: u16, name: &str, translation: &str, post: i64) -> VerseRecord {
        VerseRecord {
            surah_number: surah,
            surah_name: name.to_string(),
            ayah_number: ayah,
            translation: translation.to_string(),
            source_post_id: Some(post),
            ..Default::default()
        }
    }

    fn sample() -> Vec<VerseRecord> {
        vec![
            row(2, 2, "Al-Baqarah", "This is the Book", 5),
            row(2, 1, "Al-Baqarah", "Alif Lam Mim", 4),
            row(18, 10, "", "When the youths retreated to the cave", 9),
            row(2, 300, "Al-Baqarah", "out of range", 1),
            row(0, 1, "Nowhere", "invalid", 1),
        ]
    }

    #[test]
    fn test_build_groups_sorts_and_lists_fatihah() {
        let index = QuranIndex::build(&sample());
        let listed: Vec<_> = index
            .surahs
            .iter()
            .map(|s| (s.surah_number, s.surah_name.as_str(), s.ayah_count))
            .collect();
        assert_eq!(
            listed,
            vec![(1, "Al-Fatihah", 0), (2, "Al-Baqarah", 2), (18, "Surah 18", 1)]
        );
        let baqarah: Vec<_> = index.ayahs(2).iter().map(|r| r.ayah_number).collect();
        assert_eq!(baqarah, vec![1, 2]);
        assert!(index.ayahs(1).is_empty());
        assert!(index.ayahs(3).is_empty());
    }

    #[test]
    fn test_lookup() {
        let index = QuranIndex::build(&sample());
        assert_eq!(index.lookup(2, 2).map(|r| r.source_post_id), Some(Some(5)));
        assert!(index.lookup(2, 300).is_none());
        assert!(index.lookup(0, 1).is_none());
    }

    #[test]
    fn test_filter_surahs() {
        let index = QuranIndex::build(&sample());
        let names = |q: &str| -> Vec<u16> {
            index.filter_surahs(q).iter().map(|s| s.surah_number).collect()
        };
        assert_eq!(names("  "), vec![1, 2, 18]);
        assert_eq!(names("BAQ"), vec![2]);
        assert_eq!(names("18"), vec![18]);
        assert_eq!(names("1"), vec![1, 18]);
    }

    #[test]
    fn test_filter_ayahs() {
        let index = QuranIndex::build(&sample());
        let hits: Vec<_> = filter_ayahs(index.ayahs(2), "book")
            .iter()
            .map(|r| r.ayah_number)
            .collect();
        assert_eq!(hits, vec![2]);
        assert_eq!(filter_ayahs(index.ayahs(2), "1").len(), 1);
        assert_eq!(filter_ayahs(index.ayahs(2), "").len(), 2);
        assert!(filter_ayahs(index.ayahs(18), "zebra").is_empty());
    }
}
