//! Result packaging
//!
//! The assembler computes nothing new. It checks that kept and removed ids
//! account for the input exactly and that every kept object is covered by
//! one rule, then hands the step log over untouched.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::metrics::{RunMetrics, Summary};
use crate::errors::{EngineError, EngineResult};
use crate::resolver::{Approximation, Resolution};
use crate::rules::Rule;
use crate::table::{DecisionTable, OrderedMap, Signature, TableSnapshot};
use crate::trace::{Step, StepRecorder};

/// Terminal artifact of one run
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionResult {
    /// Kept objects: id to full attribute map, in table order
    pub consistent_data: TableSnapshot,
    /// Removed object ids, in table order
    pub removed_objects: Vec<String>,
    /// Rules induced from the consistent table
    pub rules: Vec<Rule>,
    /// Decision value to approximation (qualitative only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approximations: Option<OrderedMap<String, Approximation>>,
    /// Run metrics
    pub metrics: RunMetrics,
    /// Size summary
    pub summary: Summary,
}

/// Full engine response
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResponse {
    /// Step trace in pipeline order
    pub steps: Vec<Step>,
    /// Final result
    pub result: ResolutionResult,
}

/// Packages stage outputs into a `ProcessResponse`
pub struct ResultAssembler;

impl ResultAssembler {
    /// Assemble the response.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` when kept and removed ids overlap, name an
    /// unknown object, or do not add up to the original size, or when a kept
    /// object is not covered by exactly one rule.
    pub fn assemble(
        original: &DecisionTable,
        resolution: Resolution,
        rules: Vec<Rule>,
        metrics: RunMetrics,
        recorder: StepRecorder,
    ) -> EngineResult<ProcessResponse> {
        Self::check_accounting(original, &resolution)?;
        Self::check_coverage(&resolution.consistent, &rules)?;

        let summary = Summary {
            original_size: original.len(),
            consistent_size: resolution.consistent.len(),
            removed_count: resolution.removed.len(),
            rules_count: rules.len(),
            threshold: resolution.threshold,
        };

        Ok(ProcessResponse {
            steps: recorder.into_steps(),
            result: ResolutionResult {
                consistent_data: resolution.consistent.snapshot(),
                removed_objects: resolution.removed,
                rules,
                approximations: resolution.approximations,
                metrics,
                summary,
            },
        })
    }

    fn check_accounting(original: &DecisionTable, resolution: &Resolution) -> EngineResult<()> {
        let kept = resolution.consistent.len();
        let removed = resolution.removed.len();
        if kept + removed != original.len() {
            return Err(EngineError::invariant(format!(
                "consistent size {} + removed count {} != original size {}",
                kept,
                removed,
                original.len()
            )));
        }

        let mut seen: HashSet<&str> = HashSet::with_capacity(removed);
        for id in &resolution.removed {
            if !original.contains(id) {
                return Err(EngineError::invariant(format!(
                    "removed object '{}' is not in the input table",
                    id
                )));
            }
            if resolution.consistent.contains(id) {
                return Err(EngineError::invariant(format!(
                    "object '{}' is both kept and removed",
                    id
                )));
            }
            if !seen.insert(id) {
                return Err(EngineError::invariant(format!(
                    "object '{}' is removed twice",
                    id
                )));
            }
        }
        Ok(())
    }

    fn check_coverage(consistent: &DecisionTable, rules: &[Rule]) -> EngineResult<()> {
        let mut by_condition: HashMap<&Signature, &Rule> = HashMap::with_capacity(rules.len());
        for rule in rules {
            if by_condition.insert(&rule.condition, rule).is_some() {
                return Err(EngineError::invariant(format!(
                    "two rules share the condition of '{}'",
                    rule
                )));
            }
        }

        for obj in consistent.objects() {
            match by_condition.get(obj.signature()) {
                Some(rule) if rule.covers(obj) => {}
                Some(rule) => {
                    return Err(EngineError::invariant(format!(
                        "object '{}' matches '{}' but holds decision {}",
                        obj.id(),
                        rule,
                        obj.decision()
                    )))
                }
                None => {
                    return Err(EngineError::invariant(format!(
                        "no rule covers kept object '{}'",
                        obj.id()
                    )))
                }
            }
        }
        Ok(())
    }
}
