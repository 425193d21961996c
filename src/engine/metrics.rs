//! Run metrics and summary
//!
//! Both are derived from the stage outputs after the fact; nothing here
//! feeds back into resolution.

use serde::Serialize;

use super::method::Method;
use crate::analyzer::Partition;
use crate::resolver::Resolution;
use crate::table::DecisionTable;

/// Counters and ratios describing one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMetrics {
    /// Method applied
    pub method: Method,
    /// Equivalence classes in the input
    pub equivalence_classes: usize,
    /// Classes holding more than one decision
    pub conflict_classes: usize,
    /// Objects inside conflict classes
    pub conflicting_objects: usize,
    /// Distinct decision values in the input
    pub decision_values: usize,
    /// Fraction of objects outside conflict classes (quality of classification)
    pub consistency_ratio: f64,
    /// Fraction of objects removed
    pub removal_ratio: f64,
    /// Mean approximation accuracy over decision values (qualitative only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_accuracy: Option<f64>,
}

impl RunMetrics {
    /// Compute metrics for a finished resolution
    pub fn compute(
        method: Method,
        table: &DecisionTable,
        partition: &Partition,
        resolution: &Resolution,
    ) -> Self {
        let total = table.len();
        let conflicting_objects = partition.conflicting_objects();

        let mean_accuracy = resolution.approximations.as_ref().and_then(|approx| {
            if approx.is_empty() {
                return None;
            }
            let sum: f64 = approx.values().map(|a| a.accuracy).sum();
            Some(sum / approx.len() as f64)
        });

        Self {
            method,
            equivalence_classes: partition.len(),
            conflict_classes: partition.conflict_count(),
            conflicting_objects,
            decision_values: table.decision_values().len(),
            consistency_ratio: ratio(total - conflicting_objects, total),
            removal_ratio: ratio(resolution.removed.len(), total),
            mean_accuracy,
        }
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Size summary of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Objects in the input table
    pub original_size: usize,
    /// Objects kept
    pub consistent_size: usize,
    /// Objects removed
    pub removed_count: usize,
    /// Rules induced
    pub rules_count: usize,
    /// Threshold applied (quantitative only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::IndiscernibilityAnalyzer;
    use crate::resolver::QualitativeResolver;
    use crate::table::{IngestOptions, RawTable};
    use crate::trace::StepRecorder;
    use serde_json::json;

    #[test]
    fn test_metrics_scenario_a() {
        let raw: RawTable = serde_json::from_value(json!({
            "decision_attribute": "dec",
            "objects": [
                {"id": "o1", "values": {"a": 1, "b": 1, "dec": "x"}},
                {"id": "o2", "values": {"a": 1, "b": 1, "dec": "y"}},
                {"id": "o3", "values": {"a": 2, "b": 2, "dec": "x"}}
            ]
        }))
        .unwrap();
        let table = DecisionTable::from_raw(&raw, IngestOptions::default()).unwrap();
        let partition = IndiscernibilityAnalyzer::classify(&table);
        let mut recorder = StepRecorder::new();
        let resolution = QualitativeResolver::resolve(&table, &partition, &mut recorder);

        let metrics = RunMetrics::compute(Method::Qualitative, &table, &partition, &resolution);
        assert_eq!(metrics.equivalence_classes, 2);
        assert_eq!(metrics.conflict_classes, 1);
        assert_eq!(metrics.conflicting_objects, 2);
        assert_eq!(metrics.decision_values, 2);
        assert!((metrics.consistency_ratio - 1.0 / 3.0).abs() < 1e-12);
        assert!((metrics.removal_ratio - 2.0 / 3.0).abs() < 1e-12);
        // accuracy(x) = 1/3, accuracy(y) = 0
        assert!((metrics.mean_accuracy.unwrap() - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_summary_omits_missing_threshold() {
        let summary = Summary {
            original_size: 3,
            consistent_size: 1,
            removed_count: 2,
            rules_count: 1,
            threshold: None,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("threshold").is_none());
        assert_eq!(value["removed_count"], 2);
    }
}
