//! Rule evaluator families, run in a fixed order:
//! 1. missing-field (whole document)
//! 2. format-consistency (per page)
//! 3. relationship-consistency (whole document)
//!
//! The order is load-bearing both for output ordering and for
//! deduplication (first finding per key wins), so it is pinned here as an
//! explicit stage table rather than implied by call sites.

pub mod format;
pub mod missing;
pub mod relationship;

use guardrail_types::{Evidence, Risk};

use crate::catalogue::PatternCatalogue;
use crate::scope::Scope;

pub type RuleFn = for<'a> fn(&Scope<'a>, &PatternCatalogue) -> Vec<Risk>;

/// The engine pipeline. Stage order is a contract.
pub const STAGES: &[(&str, RuleFn)] = &[
    ("missing_field", missing::evaluate),
    ("format_consistency", format::evaluate),
    ("relationship_consistency", relationship::evaluate),
];

pub(crate) fn make_risk(
    risk_type: &str,
    evidence: Evidence,
    description: &str,
    logic: &str,
) -> Risk {
    Risk {
        risk_type: risk_type.to_string(),
        detection_method: crate::DETECTION_METHOD.to_string(),
        evidence,
        risk_description: description.to_string(),
        risk_logic: logic.to_string(),
    }
}
