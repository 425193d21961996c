//! Decision rule model

use std::fmt;

use serde::Serialize;

use crate::table::{AttrValue, Signature, TableObject};

/// A decision rule: IF condition THEN decision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    /// Condition signature (attribute to value)
    pub condition: Signature,
    /// Decision value
    pub decision: AttrValue,
    /// Fraction of all objects matching condition and decision
    pub support: f64,
    /// Fraction of condition-matching objects holding the decision
    pub confidence: f64,
    /// Discriminative score, see `WeightFormula`
    pub weight: f64,
    /// Objects holding the decision across the whole table
    pub decision_frequency: usize,
}

impl Rule {
    /// True when the object's condition signature equals the rule's.
    ///
    /// Matching is strict: an attribute missing on either side is a
    /// mismatch.
    pub fn matches(&self, object: &TableObject) -> bool {
        object.signature() == &self.condition
    }

    /// True when the rule matches the object and predicts its decision
    pub fn covers(&self, object: &TableObject) -> bool {
        self.matches(object) && object.decision() == &self.decision
    }
}

/// Renders as `IF a = 1 AND b = 2 THEN x`
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IF ")?;
        if self.condition.is_empty() {
            write!(f, "TRUE")?;
        }
        for (i, (attr, value)) in self.condition.iter().enumerate() {
            if i > 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{} = {}", attr, value)?;
        }
        write!(f, " THEN {}", self.decision)
    }
}
