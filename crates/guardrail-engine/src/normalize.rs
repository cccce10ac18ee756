//! Text normalization for matching and deduplication.
//!
//! Two independent transforms that never touch evidence text:
//! - the match surface (`normalize_for_match`), gated per-transform by the
//!   dictionary's `matching.normalization` section, and
//! - the dedup key (`normalize_for_dedup_key`), which is fixed.

use lazy_static::lazy_static;
use regex::Regex;

use crate::catalogue::NormalizationConfig;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Folds a fixed set of common fullwidth punctuation to the halfwidth form.
/// Letters and digits are left untouched; this is not full NFKC.
fn to_halfwidth(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '：' => ':',
            '（' => '(',
            '）' => ')',
            '，' => ',',
            '。' => '.',
            '；' => ';',
            '【' => '[',
            '】' => ']',
            '％' => '%',
            '＋' => '+',
            '－' => '-',
            '／' => '/',
            other => other,
        })
        .collect()
}

/// Produces the match surface for keyword/intent containment tests.
/// Applies, in order, only the transforms the dictionary enables.
/// The result is never used for evidence or output.
pub fn normalize_for_match(text: &str, config: &NormalizationConfig) -> String {
    let mut out = text.to_string();
    if config.fullwidth_to_halfwidth {
        out = to_halfwidth(&out);
    }
    if config.collapse_whitespace {
        out = WHITESPACE_RUN.replace_all(&out, " ").trim().to_string();
    }
    if config.lowercase_for_match {
        out = out.to_lowercase();
    }
    out
}

/// Produces the deduplication identity of a snippet: whitespace collapse
/// plus ASCII-only lowercasing (non-ASCII letters unaffected).
pub fn normalize_for_dedup_key(snippet: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(snippet.trim(), " ");
    collapsed
        .chars()
        .map(|c| if c.is_ascii_uppercase() { c.to_ascii_lowercase() } else { c })
        .collect()
}
