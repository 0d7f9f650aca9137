//! CJK Typography Rules (spec §4.1): code point classification, text width
//! estimation, kinsoku-style line-break preprocessing, and a markup-aware
//! splitter used by the Markup Shield.
//!
//! Rather than implement the full Unicode line-breaking algorithm, this
//! module pushes enforcement into the downstream renderer by inserting
//! non-breaking spacers only around the forbidden leading/trailing
//! punctuation positions. Lossy, but cheap and faithful to the two most
//! visible kinsoku rules.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Exact, bit-for-bit literal from spec §6.
pub const NO_LINE_START: &str = "!%),.:;?]}¢°·ˇˉ―‖'\"…‰′″›℃∶、。〃〉》」』】〕〗〞︰︱︳﹐﹑﹒﹕﹖﹗﹚﹜﹞！），．：；？｜｝︶";
/// Exact, bit-for-bit literal from spec §6.
pub const NO_LINE_END: &str = "([{·'\"〈《「『【〔〖〝﹙﹛﹝（｛｟｠￠￡￥";

const NBSP: char = '\u{00A0}';

static NO_LINE_START_SET: Lazy<HashSet<char>> = Lazy::new(|| NO_LINE_START.chars().collect());
static NO_LINE_END_SET: Lazy<HashSet<char>> = Lazy::new(|| NO_LINE_END.chars().collect());

/// ASCII/common whitespace only — deliberately excludes U+00A0 (NBSP), the
/// spacer this module itself inserts, so collapsing whitespace never erases
/// its own markers (required for the idempotence law, §8 invariant 2).
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\n\r\x0b\x0c]+").unwrap());

static MARKUP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(<[^>]+>.*?</[^>]+>|<[^/>]+/>|\{[^}]+\})").unwrap());

/// The derived (never stored) classification of a code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    CjkIdeograph,
    CjkKana,
    Ascii,
    NoLineStartPunct,
    NoLineEndPunct,
    Whitespace,
    Other,
}

/// True iff `cp` lies in any of the CJK ideograph or kana ranges of §4.1.
pub fn is_cjk(cp: char) -> bool {
    let cp = cp as u32;
    matches!(cp,
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0x20000..=0x2A6DF
        | 0x2A700..=0x2B73F
        | 0x2B740..=0x2B81F
        | 0x2B820..=0x2CEAF
        | 0x3040..=0x309F
        | 0x30A0..=0x30FF
    )
}

fn is_kana(cp: char) -> bool {
    matches!(cp as u32, 0x3040..=0x309F | 0x30A0..=0x30FF)
}

/// Classifies a code point, distinguishing the kinsoku punctuation sets from
/// plain CJK/ASCII/whitespace/other.
pub fn classify(cp: char) -> Class {
    if NO_LINE_START_SET.contains(&cp) {
        Class::NoLineStartPunct
    } else if NO_LINE_END_SET.contains(&cp) {
        Class::NoLineEndPunct
    } else if cp.is_whitespace() {
        Class::Whitespace
    } else if is_kana(cp) {
        Class::CjkKana
    } else if is_cjk(cp) {
        Class::CjkIdeograph
    } else if (cp as u32) < 128 {
        Class::Ascii
    } else {
        Class::Other
    }
}

/// Sum over characters of a class-dependent em fraction (§4.2 reference
/// estimator contract): CJK chars count as `font_size * cjk_ratio`, ASCII as
/// `font_size * 0.55`, everything else as `font_size * 0.6`.
pub fn estimate_width(text: &str, font_size_px: f64, cjk_ratio: f64) -> f64 {
    text.chars()
        .map(|c| {
            if is_cjk(c) {
                font_size_px * cjk_ratio
            } else if (c as u32) < 128 {
                font_size_px * 0.55
            } else {
                font_size_px * 0.6
            }
        })
        .sum()
}

/// Collapses whitespace runs to a single space, then inserts a non-breaking
/// spacer immediately before every `NO_LINE_START` code point and
/// immediately after every `NO_LINE_END` code point. Idempotent: applying
/// this twice yields the same string as applying it once.
pub fn apply_line_break_rules(text: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    let chars: Vec<char> = collapsed.chars().collect();
    let mut out = String::with_capacity(chars.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        if NO_LINE_START_SET.contains(&c) {
            if out.chars().last() != Some(NBSP) {
                out.push(NBSP);
            }
            out.push(c);
        } else if NO_LINE_END_SET.contains(&c) {
            out.push(c);
            if chars.get(i + 1) != Some(&NBSP) {
                out.push(NBSP);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Replaces non-breaking spacers with regular spaces and collapses
/// whitespace again, undoing `apply_line_break_rules` at the visible level.
pub fn clean_for_export(text: &str) -> String {
    let despacered = text.replace(NBSP, " ");
    WHITESPACE_RUN.replace_all(&despacered, " ").trim().to_string()
}

/// Splits `text` on the union of `<tag>...</tag>`, `<tag/>`, and `{IDENT}`
/// chunks, returning plain-text and markup chunks in their original order
/// (whitespace-only plain chunks are dropped). Used by the Markup Shield.
pub fn split_preserving_markup(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut last = 0;
    for m in MARKUP_PATTERN.find_iter(text) {
        if m.start() > last {
            parts.push(text[last..m.start()].to_string());
        }
        parts.push(m.as_str().to_string());
        last = m.end();
    }
    if last < text.len() {
        parts.push(text[last..].to_string());
    }
    parts.retain(|p| !p.trim().is_empty());
    parts
}

/// Byte ranges of every markup/placeholder match in `text`, in order. The
/// Markup Shield uses this directly (rather than `split_preserving_markup`,
/// which drops whitespace-only plain segments) so it can reconstruct the
/// exact original string on restore.
pub fn markup_match_ranges(text: &str) -> Vec<(usize, usize)> {
    MARKUP_PATTERN.find_iter(text).map(|m| (m.start(), m.end())).collect()
}

/// True iff `chunk` matches the markup pattern (as opposed to plain text).
/// A convenience for callers of `split_preserving_markup`.
pub fn is_markup_chunk(chunk: &str) -> bool {
    MARKUP_PATTERN.is_match(chunk) && MARKUP_PATTERN.find(chunk).map(|m| m.as_str() == chunk).unwrap_or(false)
}

/// Normalizes source text to NFC, as required by the data model (§3): "Source
/// text is UTF-8 normalized to NFC."
pub fn normalize_nfc(text: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    text.nfc().collect()
}

/// Merges a short leading or trailing line into its neighbor when the
/// neighbor would still be reasonably short afterward (widow/orphan
/// protection). Not part of the mandatory `apply_line_break_rules` pipeline;
/// an optional post-pass the Page Layout Driver may run on settled content.
pub fn merge_short_lines(text: &str, min_line_chars: usize) -> String {
    let mut lines: Vec<String> = text.split('\n').map(|s| s.to_string()).collect();
    if lines.len() < 2 {
        return text.to_string();
    }

    let len_of = |line: &str| -> usize {
        line.chars().filter(|c| is_cjk(*c) || c.is_alphanumeric()).count()
    };

    for i in 0..lines.len() {
        let line_len = len_of(&lines[i]);
        if line_len == 0 || line_len >= min_line_chars {
            continue;
        }
        if i > 0 && lines[i - 1].chars().count() < 40 {
            let moved = std::mem::take(&mut lines[i]);
            lines[i - 1].push(' ');
            lines[i - 1].push_str(&moved);
        } else if i + 1 < lines.len() && lines[i + 1].chars().count() < 40 {
            let moved = std::mem::take(&mut lines[i]);
            lines[i].push_str(&moved);
            let next = std::mem::take(&mut lines[i + 1]);
            lines[i].push(' ');
            lines[i].push_str(&next);
        }
    }

    lines
        .into_iter()
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
