//! Rule induction subsystem
//!
//! Derives decision rules from a consistent table: one rule per distinct
//! condition signature, carrying support, confidence, weight and the
//! frequency of its decision.
//!
//! # Invariants
//!
//! - Every kept object is matched by exactly one rule, which predicts its
//!   decision
//! - support, confidence and weight lie in [0, 1]
//! - decision_frequency never exceeds the consistent table size

mod inducer;
mod rule;
mod weight;

pub use inducer::RuleInducer;
pub use rule::Rule;
pub use weight::{RuleStats, WeightFormula, WeightPolicy};
