//! Deduplication of semantically identical findings.

use std::collections::HashSet;

use guardrail_types::Risk;

use crate::normalize::normalize_for_dedup_key;

const KEY_SEPARATOR: &str = "||";

/// Keeps the first finding per `(risk_type, dedup-normalized snippet)` key,
/// preserving production order. Findings without a snippet key on
/// `risk_type` alone, so at most one survives per type.
pub fn deduplicate(risks: Vec<Risk>) -> Vec<Risk> {
    let mut seen = HashSet::new();
    risks
        .into_iter()
        .filter(|risk| {
            let key = if risk.evidence.has_snippet() {
                format!(
                    "{}{}{}",
                    risk.risk_type,
                    KEY_SEPARATOR,
                    normalize_for_dedup_key(&risk.evidence.raw_snippet)
                )
            } else {
                risk.risk_type.clone()
            };
            seen.insert(key)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardrail_types::Evidence;

    fn risk(risk_type: &str, snippet: Option<&str>) -> Risk {
        Risk {
            risk_type: risk_type.to_string(),
            detection_method: "rule_guardrail".to_string(),
            evidence: match snippet {
                Some(s) => Evidence::new("b1", s),
                None => Evidence::not_available(),
            },
            risk_description: String::new(),
            risk_logic: String::new(),
        }
    }

    #[test]
    fn test_equal_normalized_snippets_collapse() {
        let out = deduplicate(vec![
            risk("format_unit_case_inconsistent", Some("250 ML")),
            risk("format_unit_case_inconsistent", Some(" 250  ml ")),
            risk("format_unit_case_inconsistent", Some("500 ML")),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].evidence.raw_snippet, "250 ML");
    }

    #[test]
    fn test_na_findings_keep_one_per_type() {
        let out = deduplicate(vec![
            risk("missing_net_content", None),
            risk("missing_net_content", None),
            risk("missing_product_name", None),
        ]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_different_types_never_collapse() {
        let out = deduplicate(vec![
            risk("a", Some("同一段")),
            risk("b", Some("同一段")),
        ]);
        assert_eq!(out.len(), 2);
    }
}
