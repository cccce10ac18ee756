//! Risk findings and the result envelope emitted by the rule engine.

use serde::{Deserialize, Serialize};

/// Sentinel for evidence fields that have no concrete value.
pub const NOT_AVAILABLE: &str = "N/A";

/// The literal excerpt and block reference justifying a finding.
///
/// When `raw_snippet` is not `"N/A"` it is an exact, uninterrupted substring
/// of the `text_raw` of the block named by `block_id`, taken from the
/// original (non-normalized) text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub block_id: String,
    pub raw_snippet: String,
}

impl Evidence {
    pub fn new(block_id: impl Into<String>, raw_snippet: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
            raw_snippet: raw_snippet.into(),
        }
    }

    /// Evidence for findings that assert an absence (nothing to point at).
    pub fn not_available() -> Self {
        Self::new(NOT_AVAILABLE, NOT_AVAILABLE)
    }

    pub fn has_snippet(&self) -> bool {
        self.raw_snippet != NOT_AVAILABLE
    }
}

/// A single deterministic compliance finding. Severity is assigned
/// downstream; the engine only reports what matched and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Risk {
    pub risk_type: String,
    pub detection_method: String,
    pub evidence: Evidence,
    pub risk_description: String,
    pub risk_logic: String,
}

/// The result envelope: fixed module metadata plus the deduplicated
/// risk list, in production order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskReport {
    pub system_version: String,
    pub module_name: String,
    pub module_version: String,
    pub spec_version: String,
    pub dict_version: String,
    pub schema_version: String,
    pub detection_method: String,
    pub risk_list: Vec<Risk>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_available_evidence_has_no_snippet() {
        let ev = Evidence::not_available();
        assert_eq!(ev.block_id, NOT_AVAILABLE);
        assert!(!ev.has_snippet());
        assert!(Evidence::new("b1", "500 mL").has_snippet());
    }

    #[test]
    fn test_risk_serializes_with_nested_evidence() {
        let risk = Risk {
            risk_type: "missing_net_content".to_string(),
            detection_method: "rule_guardrail".to_string(),
            evidence: Evidence::not_available(),
            risk_description: "Net content field not observed".to_string(),
            risk_logic: "No net content intent keywords or value patterns were detected"
                .to_string(),
        };
        let json = serde_json::to_value(&risk).unwrap();
        assert_eq!(json["evidence"]["block_id"], "N/A");
        assert_eq!(json["detection_method"], "rule_guardrail");
    }
}
