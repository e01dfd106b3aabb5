//! Running "current surah" context, folded over posts in archive order.

use regex::Regex;
use std::sync::LazyLock;

use crate::normalize::parse_number;
use crate::quran;

// ── Regex patterns ─────────────────────────────────────────────────
//
// Real data examples:
//   *Surah No 2 - Al-baqrah*
//   📖 Surat No. ۲: Al Baqarah
//   ~~~ Surah number 3, Aal-e-Imran
//   Surah: 2

// Numbered declaration at line start, optionally decorated, with an
// optional same-line name after the number.
static RE_SURAH_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^\s*[^A-Za-z0-9\r\n]{0,30}\s*[*_~\-\s]*Sura(?:h|t)\s*(?:No\.?|number)?\s*[:#-]?\s*(?P<num>[0-9\x{06F0}-\x{06F9}\x{0660}-\x{0669}]+)[ \t]*[-,:]?[ \t]*(?P<name>[A-Za-z][A-Za-z'\- \t]*)?"
    ).unwrap()
});

// Un-numbered mention of Al-Baqarah, only trusted before any surah is known.
static RE_BAQARAH_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)surah\s+.*(baqarah|baqrah)").unwrap());

static RE_BAQARAH_SPELLING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^al[-\s]?baqrah$|^al[-\s]?baqarah$|^baqarah$|^baqrah$").unwrap()
});

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const BAQARAH: &str = "Al-Baqarah";

/// The surah that verse markers are currently attributed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterContext {
    pub number: Option<u16>,
    pub name: Option<String>,
}

impl ChapterContext {
    /// Name for records: the tracked name, else `"Surah {n}"`.
    pub fn display_name(&self) -> Option<String> {
        let number = self.number?;
        Some(
            self.name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("Surah {number}")),
        )
    }
}

/// Fold one post's text into the context. Unmatched text leaves it unchanged.
pub fn update_context(ctx: ChapterContext, text: &str) -> ChapterContext {
    if let Some(caps) = RE_SURAH_DECL.captures(text) {
        let number = caps
            .name("num")
            .and_then(|m| parse_number(m.as_str()))
            .and_then(|n| u16::try_from(n).ok())
            .filter(|&n| quran::is_valid_surah(n));
        return match number {
            Some(n) => ChapterContext {
                number: Some(n),
                name: Some(canonical_surah_name(
                    caps.name("name").map(|m| m.as_str()),
                    n,
                )),
            },
            None => ctx,
        };
    }

    if ctx.number.is_none() && RE_BAQARAH_MENTION.is_match(text) {
        return ChapterContext {
            number: Some(2),
            name: Some(BAQARAH.to_string()),
        };
    }

    ctx
}

/// Trim decoration, collapse whitespace and fold known spelling variants.
pub fn canonical_surah_name(raw: Option<&str>, number: u16) -> String {
    let collapsed = RE_WHITESPACE.replace_all(raw.unwrap_or(""), " ");
    let name = collapsed.trim_matches(|c: char| " *_'\",-".contains(c));
    if RE_BAQARAH_SPELLING.is_match(name) {
        return BAQARAH.to_string();
    }
    if name.is_empty() {
        format!("Surah {number}")
    } else {
        name.to_string()
    }
}
