//! Rule weight policies
//!
//! The weight turns a rule's statistics into one discriminative score in
//! [0, 1]. The formula is pluggable: `RuleInducer` is generic over
//! `WeightPolicy`, and `WeightFormula` provides the configurable built-ins.

use serde::{Deserialize, Serialize};

/// Statistics of one signature group, inputs to a weight policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleStats {
    /// Objects in the consistent table
    pub table_size: usize,
    /// Objects holding the group decision in the consistent table
    pub decision_frequency: usize,
    /// Group size over table size
    pub support: f64,
    /// Fraction of the group holding the group decision
    pub confidence: f64,
}

impl RuleStats {
    /// Base rate of the decision in the consistent table
    pub fn base_rate(&self) -> f64 {
        if self.table_size == 0 {
            return 0.0;
        }
        self.decision_frequency as f64 / self.table_size as f64
    }
}

/// Computes a rule weight from its statistics
pub trait WeightPolicy: Send + Sync {
    /// Weight in [0, 1]
    fn weight(&self, stats: &RuleStats) -> f64;

    /// Stable policy name
    fn name(&self) -> &'static str;
}

/// Built-in weight formulas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightFormula {
    /// support × (decision_frequency / N)⁻¹, boosting rare decision classes
    #[default]
    BaseRateNormalized,
    /// support × confidence
    SupportConfidence,
}

impl WeightPolicy for WeightFormula {
    fn weight(&self, stats: &RuleStats) -> f64 {
        match self {
            WeightFormula::BaseRateNormalized => {
                let base = stats.base_rate();
                if base == 0.0 {
                    0.0
                } else {
                    (stats.support / base).clamp(0.0, 1.0)
                }
            }
            WeightFormula::SupportConfidence => stats.support * stats.confidence,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            WeightFormula::BaseRateNormalized => "base_rate_normalized",
            WeightFormula::SupportConfidence => "support_confidence",
        }
    }
}
