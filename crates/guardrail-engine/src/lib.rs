//! Deterministic rule-guardrail engine for extracted label/packaging text.
//!
//! Evaluates a block extractor's output against a compiled pattern
//! dictionary and emits a deduplicated list of risk findings with literal
//! evidence snippets. Severity is assigned downstream; this module only
//! reports what matched and why.
//!
//! The engine is a pure function of `(document, catalogue)`: no I/O, no
//! shared mutable state, safe to call concurrently for independent
//! documents.

pub mod catalogue;
pub mod dedup;
pub mod error;
pub mod matching;
pub mod normalize;
pub mod rules;
pub mod scope;

use guardrail_types::{Document, RiskReport};

pub use catalogue::{PatternCatalogue, PatternConfig};
pub use error::GuardrailError;

pub const SYSTEM_VERSION: &str = "v1.0.0-alpha";
pub const MODULE_NAME: &str = "DeterministicRuleEngine";
pub const MODULE_VERSION: &str = "v1.0.0-alpha";
pub const SPEC_VERSION: &str = "v1.0.0-alpha";
pub const SCHEMA_VERSION: &str = "draft-2020-12";
pub const DETECTION_METHOD: &str = "rule_guardrail";

/// Rule engine entry point. Construct once from a compiled catalogue,
/// reuse across documents.
pub struct RuleEngine {
    catalogue: PatternCatalogue,
}

impl RuleEngine {
    pub fn new(catalogue: PatternCatalogue) -> Self {
        Self { catalogue }
    }

    pub fn catalogue(&self) -> &PatternCatalogue {
        &self.catalogue
    }

    /// Runs the fixed pipeline: build scope, evaluate the stage table in
    /// order, deduplicate, stamp the envelope.
    pub fn evaluate(&self, document: &Document) -> RiskReport {
        let scope = scope::Scope::build(document);

        let mut risks = Vec::new();
        for (stage, evaluate) in rules::STAGES {
            let found = evaluate(&scope, &self.catalogue);
            tracing::debug!(stage, count = found.len(), "rule stage complete");
            risks.extend(found);
        }

        let risks = dedup::deduplicate(risks);

        RiskReport {
            system_version: SYSTEM_VERSION.to_string(),
            module_name: MODULE_NAME.to_string(),
            module_version: MODULE_VERSION.to_string(),
            spec_version: SPEC_VERSION.to_string(),
            dict_version: self.catalogue.dict_version().to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            detection_method: DETECTION_METHOD.to_string(),
            risk_list: risks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_carries_dict_version_and_metadata() {
        let config = PatternConfig::from_yaml_str("dict_version: v9\n").unwrap();
        let engine = RuleEngine::new(PatternCatalogue::compile(config));
        let report = engine.evaluate(&Document::default());

        assert_eq!(report.module_name, "DeterministicRuleEngine");
        assert_eq!(report.dict_version, "v9");
        assert_eq!(report.schema_version, "draft-2020-12");
        assert_eq!(report.detection_method, "rule_guardrail");
    }

    #[test]
    fn test_empty_document_reports_all_missing_signals() {
        let engine = RuleEngine::new(PatternCatalogue::compile(PatternConfig::default()));
        let report = engine.evaluate(&Document::default());
        assert_eq!(report.risk_list.len(), 7);
        assert!(report
            .risk_list
            .iter()
            .all(|r| r.risk_type.starts_with("missing_")));
    }
}
