//! Quantitative (frequency-based) resolution
//!
//! For each conflict class, every decision present among its members gets
//! `confidence = count / |class|`. Candidates are ranked by:
//!
//! 1. Higher confidence
//! 2. Higher raw member count
//! 3. Lexicographically smaller rendered decision value
//!
//! The top candidate wins if its confidence meets the threshold: its
//! holders are kept and every other member is removed. If no candidate
//! meets the threshold the whole class is removed. Classes without
//! conflict pass through unchanged.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::Serialize;

use super::Resolution;
use crate::analyzer::{EquivalenceClass, Partition};
use crate::errors::{EngineError, EngineResult};
use crate::observability::{log_event_with_fields, Event};
use crate::table::{AttrValue, DecisionTable};
use crate::trace::{ResolutionStep, StepPayload, StepRecorder};

/// Confidence of one decision inside a conflict class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionConfidence {
    /// Decision value
    pub decision: AttrValue,
    /// Members holding the decision
    pub count: usize,
    /// count / |class|
    pub confidence: f64,
}

/// Per-class resolution breakdown, carried in the step trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictBreakdown {
    /// Class key
    pub key: String,
    /// Member ids in table order
    pub members: Vec<String>,
    /// Candidates in rank order (winner first)
    pub candidates: Vec<DecisionConfidence>,
    /// Winning decision, if one met the threshold
    pub resolved_decision: Option<AttrValue>,
    /// Threshold applied
    pub threshold: f64,
    /// Members kept
    pub kept: Vec<String>,
    /// Members removed
    pub removed: Vec<String>,
}

/// Resolves inconsistency by per-class decision confidence
#[derive(Debug, Clone, Copy)]
pub struct QuantitativeResolver {
    threshold: f64,
}

impl QuantitativeResolver {
    /// Create a resolver with the minimum confidence a decision needs to
    /// survive.
    ///
    /// # Errors
    ///
    /// `InvalidThreshold` unless the threshold is finite and in [0, 1].
    pub fn new(threshold: f64) -> EngineResult<Self> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(EngineError::InvalidThreshold(format!(
                "threshold must be a number in [0, 1], got {}",
                threshold
            )));
        }
        Ok(Self { threshold })
    }

    /// Threshold in effect
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Rank the decisions of a class, winner first
    pub fn rank_candidates(class: &EquivalenceClass) -> Vec<DecisionConfidence> {
        let size = class.len() as f64;
        let mut candidates: Vec<DecisionConfidence> = class
            .decisions()
            .iter()
            .map(|(decision, &count)| DecisionConfidence {
                decision: decision.clone(),
                count,
                confidence: count as f64 / size,
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| b.count.cmp(&a.count))
                .then_with(|| a.decision.to_string().cmp(&b.decision.to_string()))
                .then_with(|| a.decision.cmp(&b.decision))
        });
        candidates
    }

    /// Resolve a single conflict class
    pub fn breakdown(&self, table: &DecisionTable, class: &EquivalenceClass) -> ConflictBreakdown {
        let candidates = Self::rank_candidates(class);
        let resolved_decision = candidates
            .first()
            .filter(|c| c.confidence >= self.threshold)
            .map(|c| c.decision.clone());

        let (kept, removed): (Vec<String>, Vec<String>) =
            class.members().iter().cloned().partition(|id| {
                match (&resolved_decision, table.get(id)) {
                    (Some(winner), Some(obj)) => obj.decision() == winner,
                    _ => false,
                }
            });

        ConflictBreakdown {
            key: class.key().to_string(),
            members: class.members().to_vec(),
            candidates,
            resolved_decision,
            threshold: self.threshold,
            kept,
            removed,
        }
    }

    /// Resolve the table, recording one step per conflict class and a
    /// final removal step.
    pub fn resolve(
        &self,
        table: &DecisionTable,
        partition: &Partition,
        recorder: &mut StepRecorder,
    ) -> Resolution {
        let conflicts: Vec<&EquivalenceClass> = partition.conflicts().collect();

        // Merge in class order, not completion order
        let breakdowns: Vec<ConflictBreakdown> = conflicts
            .par_iter()
            .map(|class| self.breakdown(table, class))
            .collect();

        let mut removed_ids: HashSet<String> = HashSet::new();
        for breakdown in breakdowns {
            let description = match &breakdown.resolved_decision {
                Some(winner) => format!(
                    "Conflict class {}: decision '{}' kept with confidence {:.4}, {} removed",
                    breakdown.key,
                    winner,
                    breakdown.candidates.first().map_or(0.0, |c| c.confidence),
                    breakdown.removed.len()
                ),
                None => format!(
                    "Conflict class {}: no decision reaches threshold {}, all {} removed",
                    breakdown.key,
                    breakdown.threshold,
                    breakdown.removed.len()
                ),
            };

            let resolved = breakdown
                .resolved_decision
                .as_ref()
                .map_or_else(|| "none".to_string(), |d| d.to_string());
            log_event_with_fields(
                Event::ConflictResolved,
                &[
                    ("class", breakdown.key.as_str()),
                    ("removed", breakdown.removed.len().to_string().as_str()),
                    ("resolved", resolved.as_str()),
                ],
            );

            removed_ids.extend(breakdown.removed.iter().cloned());
            let objects = breakdown.removed.clone();
            let data = table.snapshot_of(&breakdown.members);
            recorder.record(
                description,
                StepPayload::Resolution(ResolutionStep {
                    class: Some(breakdown),
                    objects,
                    data: Some(data),
                }),
            );
        }

        let consistent = table.retain(|o| !removed_ids.contains(o.id()));
        let removed: Vec<String> = table
            .ids()
            .filter(|id| removed_ids.contains(*id))
            .map(String::from)
            .collect();

        recorder.record(
            format!(
                "Objects removed by confidence threshold {}: {} removed",
                self.threshold,
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
            approximations: None,
            threshold: Some(self.threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::IndiscernibilityAnalyzer;
    use crate::table::{IngestOptions, RawTable};
    use serde_json::json;

    fn table(value: serde_json::Value) -> DecisionTable {
        let raw: RawTable = serde_json::from_value(value).unwrap();
        DecisionTable::from_raw(&raw, IngestOptions::default()).unwrap()
    }

    fn scenario_a() -> DecisionTable {
        table(json!({
            "decision_attribute": "dec",
            "objects": [
                {"id": "o1", "values": {"a": 1, "b": 1, "dec": "x"}},
                {"id": "o2", "values": {"a": 1, "b": 1, "dec": "y"}},
                {"id": "o3", "values": {"a": 2, "b": 2, "dec": "x"}}
            ]
        }))
    }

    #[test]
    fn test_threshold_validation() {
        assert!(QuantitativeResolver::new(0.0).is_ok());
        assert!(QuantitativeResolver::new(1.0).is_ok());
        assert!(QuantitativeResolver::new(-0.1).is_err());
        assert!(QuantitativeResolver::new(1.1).is_err());
        assert!(QuantitativeResolver::new(f64::NAN).is_err());
    }

    #[test]
    fn test_scenario_b_tie_broken_lexicographically() {
        let t = scenario_a();
        let partition = IndiscernibilityAnalyzer::classify(&t);
        let resolver = QuantitativeResolver::new(0.5).unwrap();
        let mut recorder = StepRecorder::new();

        let resolution = resolver.resolve(&t, &partition, &mut recorder);

        assert_eq!(resolution.removed, vec!["o2"]);
        assert!(resolution.consistent.contains("o1"));
        assert!(resolution.consistent.contains("o3"));
        assert_eq!(resolution.threshold, Some(0.5));
        // one conflict class step plus the summary
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn test_majority_wins() {
        let t = table(json!({
            "decision_attribute": "dec",
            "objects": [
                {"id": "o1", "values": {"a": 1, "dec": "b"}},
                {"id": "o2", "values": {"a": 1, "dec": "a"}},
                {"id": "o3", "values": {"a": 1, "dec": "b"}}
            ]
        }));
        let partition = IndiscernibilityAnalyzer::classify(&t);
        let class = partition.conflicts().next().unwrap();
        let breakdown = QuantitativeResolver::new(0.5).unwrap().breakdown(&t, class);

        assert_eq!(breakdown.resolved_decision, Some(AttrValue::text("b")));
        assert_eq!(breakdown.kept, vec!["o1", "o3"]);
        assert_eq!(breakdown.removed, vec!["o2"]);
        assert_eq!(breakdown.candidates[0].count, 2);
    }

    #[test]
    fn test_below_threshold_removes_whole_class() {
        let t = table(json!({
            "decision_attribute": "dec",
            "objects": [
                {"id": "o1", "values": {"a": 1, "dec": "x"}},
                {"id": "o2", "values": {"a": 1, "dec": "y"}},
                {"id": "o3", "values": {"a": 1, "dec": "z"}}
            ]
        }));
        let partition = IndiscernibilityAnalyzer::classify(&t);
        let resolver = QuantitativeResolver::new(0.5).unwrap();
        let mut recorder = StepRecorder::new();
        let resolution = resolver.resolve(&t, &partition, &mut recorder);

        assert_eq!(resolution.removed, vec!["o1", "o2", "o3"]);
        assert!(resolution.consistent.is_empty());
    }

    #[test]
    fn test_lexicographic_tie_break_on_rendered_value() {
        // "10" < "9" lexicographically even though 9 < 10 numerically
        let t = table(json!({
            "decision_attribute": "dec",
            "objects": [
                {"id": "o1", "values": {"a": 1, "dec": 9}},
                {"id": "o2", "values": {"a": 1, "dec": 10}}
            ]
        }));
        let partition = IndiscernibilityAnalyzer::classify(&t);
        let class = partition.conflicts().next().unwrap();
        let ranked = QuantitativeResolver::rank_candidates(class);
        assert_eq!(ranked[0].decision, AttrValue::int(10));
    }

    #[test]
    fn test_breakdown_step_payload() {
        let t = scenario_a();
        let partition = IndiscernibilityAnalyzer::classify(&t);
        let mut recorder = StepRecorder::new();
        QuantitativeResolver::new(0.5)
            .unwrap()
            .resolve(&t, &partition, &mut recorder);

        match &recorder.steps()[0].payload {
            StepPayload::Resolution(step) => {
                let class = step.class.as_ref().unwrap();
                assert_eq!(class.members, vec!["o1", "o2"]);
                assert_eq!(step.objects, vec!["o2"]);
                assert_eq!(step.data.as_ref().unwrap().len(), 2);
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }
}
