//! Missing-field checks: seven required label signals, evaluated against
//! the whole-document scope. Each signal is a disjunction of intent hits,
//! block-type presence and value-pattern hits; a miss produces a finding
//! with no evidence snippet (there is nothing to point at).

use guardrail_types::{Evidence, Risk};

use crate::catalogue::{names, PatternCatalogue};
use crate::matching::{intent_match_any, regex_find_all};
use crate::normalize::normalize_for_match;
use crate::rules::make_risk;
use crate::scope::Scope;

pub fn evaluate(scope: &Scope, catalogue: &PatternCatalogue) -> Vec<Risk> {
    let mut risks = Vec::new();

    let global_norm = normalize_for_match(&scope.global_text_raw, catalogue.normalization());

    let has_intent = |intent: &str| {
        intent_match_any(
            &global_norm,
            catalogue.keywords(intent),
            catalogue.normalization(),
        )
    };
    let has_regex = |name: &str| {
        catalogue
            .regex(name)
            .is_some_and(|re| !regex_find_all(&scope.global_text_raw, re).is_empty())
    };

    if !(has_intent(names::NET_CONTENT_INTENT)
        || has_regex(names::NET_CONTENT_VALUE)
        || has_regex(names::NET_CONTENT_MULTI))
    {
        risks.push(missing(
            "missing_net_content",
            "Net content field not observed",
            "No net content intent keywords or value patterns were detected in the extracted text",
        ));
    }

    // A title block counts only if it has visible content beyond a couple of
    // characters; placeholder titles still trigger the finding.
    let title_ok = scope
        .blocks_of_type("title")
        .iter()
        .any(|b| b.text_raw.trim().chars().count() > 2);
    if !title_ok {
        risks.push(missing(
            "missing_product_name",
            "Product name (title) not observed",
            "No valid title block was detected or title content is extremely short",
        ));
    }

    if !(has_intent(names::INGREDIENT_INTENT) || scope.has_block_type("ingredient")) {
        risks.push(missing(
            "missing_ingredient_list",
            "Ingredient list not observed",
            "No ingredient intent keywords or ingredient block was detected",
        ));
    }

    if !(has_intent(names::PRODUCER_INTENT) || scope.has_block_type("producer")) {
        risks.push(missing(
            "missing_manufacturer_info",
            "Producer/manufacturer information not observed",
            "No producer intent keywords or producer block was detected",
        ));
    }

    if !(has_intent(names::DATE_SHELF_LIFE_INTENT)
        || scope.has_block_type("date_shelf_life")
        || has_regex(names::DATE_YMD_NUMERIC)
        || has_regex(names::DATE_YMD_CN))
    {
        risks.push(missing(
            "missing_date_shelf_life",
            "Date or shelf-life information not observed",
            "No date/shelf-life intent keywords or date patterns were detected",
        ));
    }

    if !(has_intent(names::STANDARD_LABEL_INTENT)
        || scope.has_block_type("standard")
        || has_regex(names::STANDARD_CODE))
    {
        risks.push(missing(
            "missing_standard_code",
            "Standard code not observed",
            "No standard label intent keywords, standard block, or standard code pattern was detected",
        ));
    }

    if !(has_intent(names::LICENSE_LABEL_INTENT)
        || scope.has_block_type("license")
        || has_regex(names::SC_CODE))
    {
        risks.push(missing(
            "missing_production_license",
            "Production license (SC) not observed",
            "No license intent keywords, license block, or SC code pattern was detected",
        ));
    }

    risks
}

fn missing(risk_type: &str, description: &str, logic: &str) -> Risk {
    make_risk(risk_type, Evidence::not_available(), description, logic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::PatternConfig;
    use guardrail_types::{Block, Document};

    fn catalogue(yaml: &str) -> PatternCatalogue {
        PatternCatalogue::compile(PatternConfig::from_yaml_str(yaml).unwrap())
    }

    fn title_doc(text: &str) -> Document {
        Document {
            lines: vec![],
            blocks: vec![Block {
                block_id: "b1".into(),
                block_type: "title".into(),
                text_raw: text.into(),
                source_page: 1,
            }],
        }
    }

    #[test]
    fn test_empty_document_misses_all_seven_signals() {
        let doc = Document::default();
        let scope = Scope::build(&doc);
        let risks = evaluate(&scope, &catalogue("{}"));
        let types: Vec<&str> = risks.iter().map(|r| r.risk_type.as_str()).collect();
        assert_eq!(
            types,
            vec![
                "missing_net_content",
                "missing_product_name",
                "missing_ingredient_list",
                "missing_manufacturer_info",
                "missing_date_shelf_life",
                "missing_standard_code",
                "missing_production_license",
            ]
        );
        assert!(risks.iter().all(|r| !r.evidence.has_snippet()));
    }

    #[test]
    fn test_two_char_title_still_counts_as_missing() {
        let doc = title_doc("AB");
        let scope = Scope::build(&doc);
        let risks = evaluate(&scope, &catalogue("{}"));
        assert!(risks.iter().any(|r| r.risk_type == "missing_product_name"));
    }

    #[test]
    fn test_three_char_title_satisfies_product_name() {
        let doc = title_doc("ABC");
        let scope = Scope::build(&doc);
        let risks = evaluate(&scope, &catalogue("{}"));
        assert!(!risks.iter().any(|r| r.risk_type == "missing_product_name"));
    }

    #[test]
    fn test_whitespace_padding_does_not_rescue_title() {
        let doc = title_doc("  A \n ");
        let scope = Scope::build(&doc);
        let risks = evaluate(&scope, &catalogue("{}"));
        assert!(risks.iter().any(|r| r.risk_type == "missing_product_name"));
    }

    #[test]
    fn test_intent_hit_satisfies_net_content() {
        let yaml = r#"
intents:
  net_content_intent:
    keywords: ["净含量"]
matching:
  normalization:
    collapse_whitespace: true
"#;
        let doc = title_doc("净含量：500mL");
        let scope = Scope::build(&doc);
        let risks = evaluate(&scope, &catalogue(yaml));
        assert!(!risks.iter().any(|r| r.risk_type == "missing_net_content"));
    }

    #[test]
    fn test_regex_hit_satisfies_license() {
        let yaml = r#"
regex:
  sc_code:
    pattern: "SC\\d{14}"
"#;
        let doc = title_doc("SC12345678901234");
        let scope = Scope::build(&doc);
        let risks = evaluate(&scope, &catalogue(yaml));
        assert!(!risks
            .iter()
            .any(|r| r.risk_type == "missing_production_license"));
    }

    #[test]
    fn test_block_type_presence_satisfies_ingredient() {
        let doc = Document {
            lines: vec![],
            blocks: vec![Block {
                block_id: "b1".into(),
                block_type: "ingredient".into(),
                text_raw: "水、燕麦".into(),
                source_page: 1,
            }],
        };
        let scope = Scope::build(&doc);
        let risks = evaluate(&scope, &catalogue("{}"));
        assert!(!risks
            .iter()
            .any(|r| r.risk_type == "missing_ingredient_list"));
    }
}
