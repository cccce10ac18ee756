//! Pattern dictionary: raw serde schema and the compiled catalogue.
//!
//! Loading is permissive at the entry level: regex entries without a
//! pattern, patterns that fail to compile, unknown flag tokens and blank
//! keywords are dropped. A root that is not a mapping is fatal.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::GuardrailError;

/// Well-known dictionary entry names referenced by the rule evaluators.
pub mod names {
    // Intents
    pub const NET_CONTENT_INTENT: &str = "net_content_intent";
    pub const INGREDIENT_INTENT: &str = "ingredient_intent";
    pub const PRODUCER_INTENT: &str = "producer_intent";
    pub const DATE_SHELF_LIFE_INTENT: &str = "date_shelf_life_intent";
    pub const STANDARD_LABEL_INTENT: &str = "standard_label_intent";
    pub const LICENSE_LABEL_INTENT: &str = "license_label_intent";
    pub const PRINCIPAL_PARTY_INTENT: &str = "principal_party_intent";
    pub const ENTRUSTED_STRONG_INTENT: &str = "entrusted_party_strong_intent";
    pub const ENTRUSTED_WEAK_INTENT: &str = "entrusted_party_weak_intent";

    // Regexes
    pub const NET_CONTENT_VALUE: &str = "net_content_value";
    pub const NET_CONTENT_MULTI: &str = "net_content_multi";
    pub const DATE_YMD_NUMERIC: &str = "date_ymd_numeric";
    pub const DATE_YMD_CN: &str = "date_ymd_cn";
    pub const STANDARD_CODE: &str = "standard_code";
    pub const SC_CODE: &str = "sc_code";
    pub const UNIT_ML_UPPER: &str = "unit_ml_upper";
    pub const UNIT_ML_MIXED: &str = "unit_ml_mixed";
    pub const UNIT_L_UPPER: &str = "unit_l_upper";
    pub const UNIT_L_LOWER: &str = "unit_l_lower";
}

// Default value functions for serde
fn default_one() -> u32 {
    1
}

fn default_dict_version() -> String {
    "v1.0.0-alpha".to_string()
}

fn default_net_content_label() -> String {
    "净含量".to_string()
}

fn default_standard_label() -> String {
    "执行标准".to_string()
}

fn default_license_label() -> String {
    "SC".to_string()
}

fn default_entrust_strong_label() -> String {
    "受委托生产".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegexEntry {
    pub pattern: Option<String>,
    #[serde(default)]
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentEntry {
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Numeric thresholds for the relationship rules. A configured `0` is
/// treated as unset and coerced back to the default of 1 at compile time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_one")]
    pub entrust_weak_trigger_max_count: u32,
    #[serde(default = "default_one")]
    pub producer_context_keyword_min_hits_for_weak_entrust: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            entrust_weak_trigger_max_count: 1,
            producer_context_keyword_min_hits_for_weak_entrust: 1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default)]
    pub normalization: NormalizationConfig,
}

/// Match-surface transforms. All off by default; the dictionary opts in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizationConfig {
    #[serde(default)]
    pub fullwidth_to_halfwidth: bool,
    #[serde(default)]
    pub collapse_whitespace: bool,
    #[serde(default)]
    pub lowercase_for_match: bool,
}

/// Fallback evidence tokens used when a rule cannot locate a keyword
/// verbatim. Market-specific, so configuration-supplied; the defaults match
/// the original zh-CN dictionary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceDefaults {
    #[serde(default = "default_net_content_label")]
    pub net_content_label: String,
    #[serde(default = "default_standard_label")]
    pub standard_label: String,
    #[serde(default = "default_license_label")]
    pub license_label: String,
    #[serde(default = "default_entrust_strong_label")]
    pub entrust_strong_label: String,
}

impl Default for EvidenceDefaults {
    fn default() -> Self {
        Self {
            net_content_label: default_net_content_label(),
            standard_label: default_standard_label(),
            license_label: default_license_label(),
            entrust_strong_label: default_entrust_strong_label(),
        }
    }
}

/// Raw dictionary schema as it appears on disk (YAML or JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    #[serde(default)]
    pub regex: HashMap<String, RegexEntry>,
    #[serde(default)]
    pub intents: HashMap<String, IntentEntry>,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub evidence_defaults: EvidenceDefaults,
    #[serde(default = "default_dict_version")]
    pub dict_version: String,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            regex: HashMap::new(),
            intents: HashMap::new(),
            thresholds: Thresholds::default(),
            matching: MatchingConfig::default(),
            evidence_defaults: EvidenceDefaults::default(),
            dict_version: default_dict_version(),
        }
    }
}

impl PatternConfig {
    /// Parses a dictionary from YAML text. A non-mapping root is a
    /// `ConfigNotMapping` error; malformed field types are `ConfigParse`.
    pub fn from_yaml_str(source: &str) -> Result<Self, GuardrailError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(source).map_err(|e| GuardrailError::ConfigParse(e.to_string()))?;
        if !value.is_mapping() {
            return Err(GuardrailError::ConfigNotMapping);
        }
        serde_yaml::from_value(value).map_err(|e| GuardrailError::ConfigParse(e.to_string()))
    }
}

/// Immutable compiled dictionary: regexes built, keywords filtered,
/// thresholds coerced. Constructed once at startup and borrowed by every
/// evaluator.
#[derive(Debug)]
pub struct PatternCatalogue {
    regexes: HashMap<String, Regex>,
    intents: HashMap<String, Vec<String>>,
    thresholds: Thresholds,
    normalization: NormalizationConfig,
    evidence_defaults: EvidenceDefaults,
    dict_version: String,
}

impl PatternCatalogue {
    pub fn compile(config: PatternConfig) -> Self {
        let mut regexes = HashMap::new();
        for (name, entry) in config.regex {
            let Some(pattern) = entry.pattern else {
                tracing::warn!(name = %name, "regex entry has no pattern, skipping");
                continue;
            };
            match build_regex(&pattern, &entry.flags) {
                Ok(regex) => {
                    regexes.insert(name, regex);
                }
                Err(err) => {
                    tracing::warn!(name = %name, error = %err, "regex entry failed to compile, skipping");
                }
            }
        }

        let intents = config
            .intents
            .into_iter()
            .map(|(name, entry)| {
                let keywords: Vec<String> = entry
                    .keywords
                    .into_iter()
                    .filter(|kw| !kw.trim().is_empty())
                    .collect();
                (name, keywords)
            })
            .collect();

        let thresholds = Thresholds {
            entrust_weak_trigger_max_count: coerce_zero(
                config.thresholds.entrust_weak_trigger_max_count,
            ),
            producer_context_keyword_min_hits_for_weak_entrust: coerce_zero(
                config
                    .thresholds
                    .producer_context_keyword_min_hits_for_weak_entrust,
            ),
        };

        Self {
            regexes,
            intents,
            thresholds,
            normalization: config.matching.normalization,
            evidence_defaults: config.evidence_defaults,
            dict_version: config.dict_version,
        }
    }

    pub fn regex(&self, name: &str) -> Option<&Regex> {
        self.regexes.get(name)
    }

    /// Keywords of a named intent; unknown intents yield an empty slice.
    pub fn keywords(&self, name: &str) -> &[String] {
        self.intents.get(name).map_or(&[], Vec::as_slice)
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn normalization(&self) -> &NormalizationConfig {
        &self.normalization
    }

    pub fn evidence_defaults(&self) -> &EvidenceDefaults {
        &self.evidence_defaults
    }

    pub fn dict_version(&self) -> &str {
        &self.dict_version
    }
}

fn coerce_zero(value: u32) -> u32 {
    if value == 0 {
        1
    } else {
        value
    }
}

/// Known flag tokens: IGNORECASE, MULTILINE, DOTALL. Anything else is
/// ignored, matching the dictionary's permissive contract.
fn build_regex(pattern: &str, flags: &[String]) -> Result<Regex, regex::Error> {
    let mut builder = RegexBuilder::new(pattern);
    for flag in flags {
        match flag.as_str() {
            "IGNORECASE" => {
                builder.case_insensitive(true);
            }
            "MULTILINE" => {
                builder.multi_line(true);
            }
            "DOTALL" => {
                builder.dot_matches_new_line(true);
            }
            _ => {}
        }
    }
    builder.build()
}
