//! Matching primitives: intent containment, regex occurrence search, and
//! evidence extraction.
//!
//! Evidence is always a literal excerpt of the original text. Matching may
//! run on a normalized surface, but the returned snippet never does.

use guardrail_types::Block;
use regex::Regex;

use crate::catalogue::NormalizationConfig;
use crate::normalize::normalize_for_match;

/// True iff any keyword, normalized the same way as the text, is a
/// substring of `normalized_text`. Short-circuits on the first hit.
pub fn intent_match_any(
    normalized_text: &str,
    keywords: &[String],
    config: &NormalizationConfig,
) -> bool {
    keywords.iter().any(|kw| {
        let kw_norm = normalize_for_match(kw, config);
        !kw_norm.is_empty() && normalized_text.contains(&kw_norm)
    })
}

/// All non-overlapping matches of `regex` against the original text, in
/// left-to-right order.
pub fn regex_find_all<'t>(text: &'t str, regex: &Regex) -> Vec<regex::Match<'t>> {
    regex.find_iter(text).collect()
}

/// Evidence policy for keyword findings: exact case-sensitive occurrence
/// first, then a case-insensitive literal search returning the matched
/// original-case substring, else nothing.
pub fn evidence_for_keyword<'t>(original_text: &'t str, keyword: &str) -> Option<&'t str> {
    if original_text.is_empty() || keyword.is_empty() {
        return None;
    }
    if let Some(idx) = original_text.find(keyword) {
        return Some(&original_text[idx..idx + keyword.len()]);
    }
    let literal = format!("(?i){}", regex::escape(keyword));
    // The escaped literal always compiles; the builder only fails on size limits.
    Regex::new(&literal)
        .ok()
        .and_then(|re| re.find(original_text))
        .map(|m| m.as_str())
}

/// First match of `regex` in the original text, as a literal excerpt.
pub fn evidence_for_regex<'t>(original_text: &'t str, regex: &Regex) -> Option<&'t str> {
    if original_text.is_empty() {
        return None;
    }
    regex.find(original_text).map(|m| m.as_str())
}

/// Attributes a page-scoped snippet to a block: scans blocks in input order
/// restricted to `page` and returns the first whose raw text contains the
/// snippet. Deterministic under stable input ordering.
pub fn first_block_containing<'a>(blocks: &'a [Block], snippet: &str, page: u32) -> Option<&'a str> {
    blocks
        .iter()
        .find(|b| b.source_page == page && !b.text_raw.is_empty() && b.text_raw.contains(snippet))
        .map(|b| b.block_id.as_str())
}

/// Scans blocks in input order for the first keyword that can be located
/// verbatim; returns the evidence snippet and the owning block id.
pub fn first_keyword_evidence_in_blocks<'a>(
    blocks: &'a [Block],
    keywords: &[String],
) -> Option<(&'a str, &'a str)> {
    for block in blocks {
        if block.text_raw.is_empty() {
            continue;
        }
        for keyword in keywords {
            if let Some(snippet) = evidence_for_keyword(&block.text_raw, keyword) {
                return Some((snippet, block.block_id.as_str()));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lowercase_config() -> NormalizationConfig {
        NormalizationConfig {
            lowercase_for_match: true,
            collapse_whitespace: true,
            ..NormalizationConfig::default()
        }
    }

    fn kws(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_intent_match_uses_normalized_keyword() {
        let config = lowercase_config();
        let text = normalize_for_match("Net  Content: 500mL", &config);
        assert!(intent_match_any(&text, &kws(&["NET CONTENT"]), &config));
        assert!(!intent_match_any(&text, &kws(&["gross weight"]), &config));
    }

    #[test]
    fn test_intent_match_ignores_blank_keywords() {
        let config = lowercase_config();
        assert!(!intent_match_any("anything", &kws(&["", "   "]), &config));
    }

    #[test]
    fn test_keyword_evidence_prefers_exact_case() {
        assert_eq!(evidence_for_keyword("Net Content 500mL", "Net Content"), Some("Net Content"));
        // Case-insensitive fallback returns the original casing
        assert_eq!(evidence_for_keyword("NET CONTENT 500mL", "net content"), Some("NET CONTENT"));
        assert_eq!(evidence_for_keyword("nothing here", "净含量"), None);
    }

    #[test]
    fn test_keyword_evidence_is_substring_of_source() {
        let text = "产品标准号：GB/T 10789";
        let snippet = evidence_for_keyword(text, "标准").unwrap();
        assert!(text.contains(snippet));
    }

    #[test]
    fn test_regex_evidence_takes_first_match() {
        let re = Regex::new(r"\d+\s*mL").unwrap();
        assert_eq!(evidence_for_regex("250 mL or 500 mL", &re), Some("250 mL"));
        assert_eq!(evidence_for_regex("", &re), None);
    }

    #[test]
    fn test_first_block_scan_respects_page_and_order() {
        let blocks = vec![
            guardrail_types::Block {
                block_id: "b1".into(),
                block_type: "other".into(),
                text_raw: "500 mL".into(),
                source_page: 1,
            },
            guardrail_types::Block {
                block_id: "b2".into(),
                block_type: "other".into(),
                text_raw: "500 mL".into(),
                source_page: 2,
            },
        ];
        assert_eq!(first_block_containing(&blocks, "500 mL", 2), Some("b2"));
        assert_eq!(first_block_containing(&blocks, "500 mL", 1), Some("b1"));
        assert_eq!(first_block_containing(&blocks, "missing", 1), None);
    }
}
