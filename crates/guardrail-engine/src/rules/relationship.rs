//! Relationship-consistency checks for entrusted-production wording.
//!
//! Single whole-document pass with mutually exclusive outcomes: a strong
//! entrustment signal without a principal party wins outright; only when
//! neither strong nor principal wording appears is the weaker ambiguous
//! signal considered.

use guardrail_types::{Evidence, Risk, NOT_AVAILABLE};

use crate::catalogue::{names, PatternCatalogue};
use crate::matching::{evidence_for_keyword, first_keyword_evidence_in_blocks, intent_match_any};
use crate::normalize::normalize_for_match;
use crate::rules::make_risk;
use crate::scope::Scope;

pub fn evaluate(scope: &Scope, catalogue: &PatternCatalogue) -> Vec<Risk> {
    let mut risks = Vec::new();
    let norm_cfg = catalogue.normalization();
    let global_norm = normalize_for_match(&scope.global_text_raw, norm_cfg);

    let kws_principal = catalogue.keywords(names::PRINCIPAL_PARTY_INTENT);
    let kws_strong = catalogue.keywords(names::ENTRUSTED_STRONG_INTENT);
    let kws_weak = catalogue.keywords(names::ENTRUSTED_WEAK_INTENT);
    let kws_producer = catalogue.keywords(names::PRODUCER_INTENT);

    let has_principal = intent_match_any(&global_norm, kws_principal, norm_cfg);
    let has_strong = intent_match_any(&global_norm, kws_strong, norm_cfg);

    if has_strong && !has_principal {
        let located = first_keyword_evidence_in_blocks(scope.blocks, kws_strong);
        let (snippet, block_id) = match located {
            Some((snippet, block_id)) => (snippet.to_string(), block_id.to_string()),
            None => {
                let fallback = kws_strong
                    .first()
                    .cloned()
                    .unwrap_or_else(|| catalogue.evidence_defaults().entrust_strong_label.clone());
                (fallback, NOT_AVAILABLE.to_string())
            }
        };
        risks.push(make_risk(
            "incomplete_entrust_relationship",
            Evidence::new(block_id, snippet),
            "Entrust-production context observed but principal party not observed",
            "Strong entrust-production keywords were detected, but no principal-party keywords were detected in the extracted text",
        ));
        // Strong outcome suppresses the ambiguous check for this document.
        return risks;
    }

    if !has_strong && !has_principal {
        let thresholds = catalogue.thresholds();

        // Summed per-keyword occurrence counts, not deduplicated.
        let weak_count: usize = kws_weak
            .iter()
            .map(|kw| {
                let kw_norm = normalize_for_match(kw, norm_cfg);
                if kw_norm.is_empty() {
                    0
                } else {
                    global_norm.matches(&kw_norm).count()
                }
            })
            .sum();

        if weak_count > 0 && weak_count <= thresholds.entrust_weak_trigger_max_count as usize {
            let prod_min = thresholds.producer_context_keyword_min_hits_for_weak_entrust as usize;
            for block in scope.blocks {
                let block_norm = normalize_for_match(&block.text_raw, norm_cfg);
                let contains_weak = kws_weak.iter().any(|kw| {
                    let kw_norm = normalize_for_match(kw, norm_cfg);
                    !kw_norm.is_empty() && block_norm.contains(&kw_norm)
                });
                if !contains_weak {
                    continue;
                }
                let producer_hits = kws_producer
                    .iter()
                    .filter(|kw| {
                        let kw_norm = normalize_for_match(kw, norm_cfg);
                        !kw_norm.is_empty() && block_norm.contains(&kw_norm)
                    })
                    .count();
                if producer_hits < prod_min {
                    continue;
                }
                let snippet = kws_weak
                    .iter()
                    .find_map(|kw| evidence_for_keyword(&block.text_raw, kw))
                    .map(str::to_string)
                    .unwrap_or_else(|| kws_weak[0].clone());
                risks.push(make_risk(
                    "entrusted_context_ambiguous",
                    Evidence::new(block.block_id.clone(), snippet),
                    "Ambiguous entrust-production wording observed in producer context",
                    "Weak entrust keywords were detected in a producer-context block, while no principal-party keywords were detected; this is treated as an ambiguous relationship signal",
                ));
                break;
            }
        }
    }

    risks
}
