//! Inconsistency resolution subsystem
//!
//! Two interchangeable strategies turn an inconsistent table into a
//! consistent one:
//!
//! - Qualitative: rough-set lower/upper approximations; objects outside the
//!   lower approximation of their own decision are removed
//! - Quantitative: per-class decision confidence with a threshold and a
//!   deterministic tie-break
//!
//! # Invariants
//!
//! - Kept and removed ids are disjoint and cover the input exactly
//! - Removed ids are listed in table order
//! - Per-item work may run in parallel; results merge in enumeration order

mod qualitative;
mod quantitative;

pub use qualitative::{Approximation, QualitativeResolver};
pub use quantitative::{ConflictBreakdown, DecisionConfidence, QuantitativeResolver};

use crate::table::{DecisionTable, OrderedMap};

/// Output of either resolver
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Kept objects, in table order
    pub consistent: DecisionTable,
    /// Removed object ids, in table order
    pub removed: Vec<String>,
    /// Decision value to approximation (qualitative only)
    pub approximations: Option<OrderedMap<String, Approximation>>,
    /// Threshold applied (quantitative only)
    pub threshold: Option<f64>,
}
