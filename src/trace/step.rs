//! Step model
//!
//! A step is one entry of the run's audit trail. Its payload is a sum
//! type over the stage that produced it, so consumers match on the kind
//! instead of probing optional fields.
//!
//! Wire shape: `{index, kind, description, ...payload fields}`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::resolver::{Approximation, ConflictBreakdown};
use crate::rules::Rule;
use crate::table::{AttrValue, OrderedMap, TableSnapshot};

/// Stage kind identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Equivalence classes computed
    Classification,
    /// Approximations for one decision value
    Approximation,
    /// Objects removed (per conflict class or final summary)
    Resolution,
    /// Decision rules induced
    RuleInduction,
}

impl StepKind {
    /// Returns the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Classification => "classification",
            StepKind::Approximation => "approximation",
            StepKind::Resolution => "resolution",
            StepKind::RuleInduction => "rule_induction",
        }
    }
}

/// Payload of the classification stage
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationStep {
    /// Class key to member ids
    pub classes: OrderedMap<String, Vec<String>>,
    /// Class key to decision counts
    pub frequencies: OrderedMap<String, BTreeMap<String, usize>>,
    /// Snapshot of the input table
    pub data: TableSnapshot,
}

/// Payload of one approximation stage
#[derive(Debug, Clone, Serialize)]
pub struct ApproximationStep {
    /// Decision value processed
    pub decision: AttrValue,
    /// Decision value to its approximation (a single entry)
    pub approximations: OrderedMap<String, Approximation>,
}

/// Payload of a resolution stage
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionStep {
    /// Confidence breakdown of the conflict class (quantitative only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<ConflictBreakdown>,
    /// Removed object ids
    pub objects: Vec<String>,
    /// Table state at this point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<TableSnapshot>,
}

/// Payload of the rule induction stage
#[derive(Debug, Clone, Serialize)]
pub struct RuleInductionStep {
    /// Induced rules in signature order
    pub rules: Vec<Rule>,
}

/// Stage payload
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepPayload {
    Classification(ClassificationStep),
    Approximation(ApproximationStep),
    Resolution(ResolutionStep),
    RuleInduction(RuleInductionStep),
}

impl StepPayload {
    /// Stage kind of this payload
    pub fn kind(&self) -> StepKind {
        match self {
            StepPayload::Classification(_) => StepKind::Classification,
            StepPayload::Approximation(_) => StepKind::Approximation,
            StepPayload::Resolution(_) => StepKind::Resolution,
            StepPayload::RuleInduction(_) => StepKind::RuleInduction,
        }
    }
}

/// One recorded step. Immutable once recorded.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    /// Position in the trace, starting at 0
    pub index: usize,
    /// Human-readable description
    pub description: String,
    /// Stage payload
    #[serde(flatten)]
    pub payload: StepPayload,
}

impl Step {
    /// Stage kind of this step
    pub fn kind(&self) -> StepKind {
        self.payload.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_wire_shape() {
        let step = Step {
            index: 3,
            description: "Removed objects".to_string(),
            payload: StepPayload::Resolution(ResolutionStep {
                class: None,
                objects: vec!["o1".to_string()],
                data: None,
            }),
        };

        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["index"], 3);
        assert_eq!(value["kind"], "resolution");
        assert_eq!(value["description"], "Removed objects");
        assert_eq!(value["objects"][0], "o1");
        assert!(value.get("data").is_none());
        assert!(value.get("class").is_none());
    }

    #[test]
    fn test_rule_induction_wire_shape() {
        let step = Step {
            index: 0,
            description: "No rules".to_string(),
            payload: StepPayload::RuleInduction(RuleInductionStep { rules: Vec::new() }),
        };
        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["kind"], "rule_induction");
        assert_eq!(value["rules"], serde_json::json!([]));
        assert_eq!(step.kind(), StepKind::RuleInduction);
        assert_eq!(step.kind().as_str(), "rule_induction");
    }
}
