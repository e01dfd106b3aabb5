//! Static reference tables: verse counts per surah and juz boundaries.
//!
//! These drive verse-number validation, juz derivation and the
//! missing-verse report.

pub const SURAH_COUNT: u16 = 114;

/// Verse count of each surah, indexed by `surah_number - 1`.
const SURAH_AYAH_MAX: [u16; SURAH_COUNT as usize] = [
    7, 286, 200, 176, 120, 165, 206, 75, 129, 109, // 1–10
    123, 111, 43, 52, 99, 128, 111, 110, 98, 135, // 11–20
    112, 78, 118, 64, 77, 227, 93, 88, 69, 60, // 21–30
    34, 30, 73, 54, 45, 83, 182, 88, 75, 85, // 31–40
    54, 53, 89, 59, 37, 35, 38, 29, 18, 45, // 41–50
    60, 49, 62, 55, 78, 96, 29, 22, 24, 13, // 51–60
    14, 11, 11, 18, 12, 12, 30, 52, 52, 44, // 61–70
    28, 28, 20, 56, 40, 31, 50, 40, 46, 42, // 71–80
    29, 19, 36, 25, 22, 17, 19, 26, 30, 20, // 81–90
    15, 21, 11, 8, 8, 19, 5, 8, 8, 11, // 91–100
    11, 8, 3, 9, 5, 4, 7, 3, 6, 3, // 101–110
    5, 4, 5, 6, // 111–114
];

/// Start coordinate `(surah, ayah)` of juz 1..=30.
const JUZ_STARTS: [(u16, u16); 30] = [
    (1, 1),
    (2, 142),
    (2, 253),
    (3, 93),
    (4, 24),
    (4, 148),
    (5, 82),
    (6, 111),
    (7, 88),
    (8, 41),
    (9, 93),
    (11, 6),
    (12, 53),
    (15, 1),
    (17, 1),
    (18, 75),
    (21, 1),
    (23, 1),
    (25, 21),
    (27, 56),
    (29, 46),
    (33, 31),
    (36, 28),
    (39, 32),
    (41, 47),
    (46, 1),
    (51, 31),
    (58, 1),
    (67, 1),
    (78, 1),
];

pub fn is_valid_surah(surah: u16) -> bool {
    (1..=SURAH_COUNT).contains(&surah)
}

/// Highest verse number of `surah`, or `None` for an unknown surah.
pub fn max_ayah(surah: u16) -> Option<u16> {
    if !is_valid_surah(surah) {
        return None;
    }
    Some(SURAH_AYAH_MAX[usize::from(surah - 1)])
}

pub fn is_valid_ayah(surah: u16, ayah: u16) -> bool {
    max_ayah(surah).is_some_and(|max| (1..=max).contains(&ayah))
}

/// Juz containing `(surah, ayah)`: the last boundary not beyond it.
pub fn juz_for(surah: u16, ayah: u16) -> u8 {
    let mut current = 1;
    for (idx, start) in JUZ_STARTS.iter().enumerate() {
        if (surah, ayah) >= *start {
            current = idx as u8 + 1;
        } else {
            break;
        }
    }
    current
}
