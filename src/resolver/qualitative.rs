//! Qualitative (rough-set) resolution
//!
//! For each decision value d:
//! - lower(d): union of classes whose members all hold d
//! - upper(d): union of classes with at least one member holding d
//! - accuracy(d) = |lower(d)| / |upper(d)|, 0.0 when upper(d) is empty
//!
//! An object is kept iff it lies in the lower approximation of its own
//! decision. Everything else cannot be classified with certainty and is
//! removed.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use serde::Serialize;

use super::Resolution;
use crate::analyzer::Partition;
use crate::observability::{log_event_with_fields, Event};
use crate::table::{AttrValue, DecisionTable, OrderedMap};
use crate::trace::{ApproximationStep, ResolutionStep, StepPayload, StepRecorder};

/// Lower/upper approximation of one decision class.
///
/// Field names on the wire follow the established UI contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Approximation {
    /// Objects certainly in the decision class
    #[serde(rename = "dolne")]
    pub lower: Vec<String>,
    /// Objects possibly in the decision class
    #[serde(rename = "gorne")]
    pub upper: Vec<String>,
    /// |lower| / |upper|
    #[serde(rename = "dokladnosc")]
    pub accuracy: f64,
}

impl Approximation {
    /// Compute the approximation of `decision` over a partition
    pub fn compute(partition: &Partition, decision: &AttrValue) -> Self {
        let mut lower = Vec::new();
        let mut upper = Vec::new();

        for class in partition.classes() {
            if class.all_hold(decision) {
                lower.extend(class.members().iter().cloned());
            }
            if class.any_holds(decision) {
                upper.extend(class.members().iter().cloned());
            }
        }

        let accuracy = if upper.is_empty() {
            0.0
        } else {
            lower.len() as f64 / upper.len() as f64
        };

        Self {
            lower,
            upper,
            accuracy,
        }
    }

    /// Objects in the upper but not the lower approximation
    pub fn boundary(&self) -> Vec<String> {
        let lower: HashSet<&String> = self.lower.iter().collect();
        self.upper
            .iter()
            .filter(|id| !lower.contains(id))
            .cloned()
            .collect()
    }
}

/// Resolves inconsistency with rough-set approximations
pub struct QualitativeResolver;

impl QualitativeResolver {
    /// Resolve the table, recording one step per decision value and a
    /// final removal step.
    pub fn resolve(
        table: &DecisionTable,
        partition: &Partition,
        recorder: &mut StepRecorder,
    ) -> Resolution {
        let decisions = table.decision_values();

        // Merge in decision enumeration order, not completion order
        let computed: Vec<Approximation> = decisions
            .par_iter()
            .map(|d| Approximation::compute(partition, d))
            .collect();

        let mut approximations = OrderedMap::new();
        let mut lower_sets: HashMap<&AttrValue, HashSet<&str>> = HashMap::new();

        for (decision, approx) in decisions.iter().zip(computed.iter()) {
            let mut single = OrderedMap::new();
            single.push(decision.to_string(), approx.clone());
            recorder.record(
                format!(
                    "Approximations for decision '{}': lower {}, upper {}, accuracy {:.4}",
                    decision,
                    approx.lower.len(),
                    approx.upper.len(),
                    approx.accuracy
                ),
                StepPayload::Approximation(ApproximationStep {
                    decision: decision.clone(),
                    approximations: single,
                }),
            );

            log_event_with_fields(
                Event::ApproximationComputed,
                &[
                    ("decision", decision.to_string().as_str()),
                    ("accuracy", approx.accuracy.to_string().as_str()),
                ],
            );

            lower_sets.insert(decision, approx.lower.iter().map(String::as_str).collect());
            approximations.push(decision.to_string(), approx.clone());
        }

        let in_own_lower = |id: &str, decision: &AttrValue| {
            lower_sets
                .get(decision)
                .map_or(false, |set| set.contains(id))
        };

        let consistent = table.retain(|o| in_own_lower(o.id(), o.decision()));
        let removed: Vec<String> = table
            .objects()
            .iter()
            .filter(|o| !in_own_lower(o.id(), o.decision()))
            .map(|o| o.id().to_string())
            .collect();

        recorder.record(
            format!(
                "Objects outside the lower approximation of their decision: {} removed",
                removed.len()
            ),
            StepPayload::Resolution(ResolutionStep {
                class: None,
                objects: removed.clone(),
                data: Some(consistent.snapshot()),
            }),
        );

        Resolution {
            consistent,
            removed,
            approximations: Some(approximations),
            threshold: None,
        }
    }
}
