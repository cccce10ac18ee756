//! Format-consistency checks, evaluated page by page in document order.
//!
//! Two shapes: unit-casing conflicts (two casing variants of the same unit
//! on one page) and label-present/value-absent signals (a label keyword
//! matches but its value pattern does not).

use guardrail_types::{Evidence, Risk, NOT_AVAILABLE};

use crate::catalogue::{names, EvidenceDefaults, PatternCatalogue};
use crate::matching::{
    evidence_for_keyword, evidence_for_regex, first_block_containing, intent_match_any,
    regex_find_all,
};
use crate::normalize::normalize_for_match;
use crate::rules::make_risk;
use crate::scope::Scope;

/// Casing-variant pairs per unit family. Evidence is taken from the
/// non-canonical variant's first match.
struct UnitCasePair {
    canonical: &'static str,
    variant: &'static str,
    logic: &'static str,
}

const UNIT_CASE_PAIRS: &[UnitCasePair] = &[
    UnitCasePair {
        canonical: names::UNIT_ML_MIXED,
        variant: names::UNIT_ML_UPPER,
        logic: "Multiple casing variants for the same unit were detected in the same scope",
    },
    UnitCasePair {
        canonical: names::UNIT_L_UPPER,
        variant: names::UNIT_L_LOWER,
        logic: "Both uppercase and lowercase variants of the same unit were detected in the same scope",
    },
];

/// Label-present/value-absent signals, applied identically per page.
struct LabelValueRule {
    intent: &'static str,
    value_regexes: &'static [&'static str],
    risk_type: &'static str,
    description: &'static str,
    logic: &'static str,
    fallback: fn(&EvidenceDefaults) -> &str,
}

const LABEL_VALUE_RULES: &[LabelValueRule] = &[
    LabelValueRule {
        intent: names::NET_CONTENT_INTENT,
        value_regexes: &[names::NET_CONTENT_VALUE, names::NET_CONTENT_MULTI],
        risk_type: "format_net_content_pattern_unusual",
        description: "Net content label observed but value pattern not detected",
        logic: "Net content-related label keyword was detected, but no numeric value+unit pattern was matched in the same scope",
        fallback: |d| d.net_content_label.as_str(),
    },
    LabelValueRule {
        intent: names::STANDARD_LABEL_INTENT,
        value_regexes: &[names::STANDARD_CODE],
        risk_type: "format_standard_code_pattern_unusual",
        description: "Standard label observed but standard code pattern not detected",
        logic: "Standard-related label keyword was detected, but no standard-code-like token was matched in the same scope",
        fallback: |d| d.standard_label.as_str(),
    },
    LabelValueRule {
        intent: names::LICENSE_LABEL_INTENT,
        value_regexes: &[names::SC_CODE],
        risk_type: "format_license_code_pattern_unusual",
        description: "License label observed but SC code pattern not detected",
        logic: "License-related label keyword was detected, but no SC-code-like token was matched in the same scope",
        fallback: |d| d.license_label.as_str(),
    },
];

pub fn evaluate(scope: &Scope, catalogue: &PatternCatalogue) -> Vec<Risk> {
    let mut risks = Vec::new();

    for pair in UNIT_CASE_PAIRS {
        let (Some(rx_canonical), Some(rx_variant)) =
            (catalogue.regex(pair.canonical), catalogue.regex(pair.variant))
        else {
            continue;
        };
        for page in &scope.pages {
            let canonical_hit = !regex_find_all(&page.text_raw, rx_canonical).is_empty();
            let variant_hit = !regex_find_all(&page.text_raw, rx_variant).is_empty();
            if !(canonical_hit && variant_hit) {
                continue;
            }
            let Some(snippet) = evidence_for_regex(&page.text_raw, rx_variant) else {
                continue;
            };
            let block_id =
                first_block_containing(scope.blocks, snippet, page.page).unwrap_or(NOT_AVAILABLE);
            risks.push(make_risk(
                "format_unit_case_inconsistent",
                Evidence::new(block_id, snippet),
                "Unit casing appears inconsistent within the same page scope",
                pair.logic,
            ));
        }
    }

    for rule in LABEL_VALUE_RULES {
        let keywords = catalogue.keywords(rule.intent);
        for page in &scope.pages {
            let page_norm = normalize_for_match(&page.text_raw, catalogue.normalization());
            let has_label = intent_match_any(&page_norm, keywords, catalogue.normalization());
            let has_value = rule.value_regexes.iter().any(|name| {
                catalogue
                    .regex(name)
                    .is_some_and(|re| !regex_find_all(&page.text_raw, re).is_empty())
            });
            if !has_label || has_value {
                continue;
            }
            // Locate the label keyword verbatim for evidence; the fixed
            // fallback token keeps the finding non-empty when none can be.
            let snippet = keywords
                .iter()
                .find_map(|kw| evidence_for_keyword(&page.text_raw, kw))
                .unwrap_or_else(|| (rule.fallback)(catalogue.evidence_defaults()));
            let block_id =
                first_block_containing(scope.blocks, snippet, page.page).unwrap_or(NOT_AVAILABLE);
            risks.push(make_risk(
                rule.risk_type,
                Evidence::new(block_id, snippet),
                rule.description,
                rule.logic,
            ));
        }
    }

    risks
}
