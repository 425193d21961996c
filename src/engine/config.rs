//! Engine configuration
//!
//! Every field is defaulted, so `{}` is a valid engine section.

use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};
use crate::rules::WeightFormula;
use crate::table::IngestOptions;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Quantitative threshold used when a request carries none (default: 0.5)
    #[serde(default = "default_threshold")]
    pub default_threshold: f64,

    /// Rule weight formula (default: base_rate_normalized)
    #[serde(default)]
    pub weight_formula: WeightFormula,

    /// Trim surrounding whitespace from text values (default: true)
    #[serde(default = "default_trim_text_values")]
    pub trim_text_values: bool,
}

fn default_threshold() -> f64 {
    0.5
}

fn default_trim_text_values() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_threshold: default_threshold(),
            weight_formula: WeightFormula::default(),
            trim_text_values: default_trim_text_values(),
        }
    }
}

impl EngineConfig {
    /// Validate configuration values
    pub fn validate(&self) -> EngineResult<()> {
        if !self.default_threshold.is_finite() || !(0.0..=1.0).contains(&self.default_threshold) {
            return Err(EngineError::InvalidThreshold(format!(
                "default_threshold must be in [0, 1], got {}",
                self.default_threshold
            )));
        }
        Ok(())
    }

    /// Ingestion options derived from this configuration
    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            trim_text_values: self.trim_text_values,
        }
    }
}
