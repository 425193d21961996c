//! Indiscernibility analysis
//!
//! Two objects are indiscernible iff their condition signatures are
//! identical. An attribute present on one object and absent on the other
//! counts as a mismatch, which keeps the relation an equivalence.

use std::collections::HashMap;

use super::partition::{EquivalenceClass, Partition};
use crate::observability::{log_event_with_fields, Event};
use crate::table::{DecisionTable, Signature};
use crate::trace::{ClassificationStep, StepPayload, StepRecorder};

/// Partitions a decision table into equivalence classes
pub struct IndiscernibilityAnalyzer;

impl IndiscernibilityAnalyzer {
    /// Compute the partition without recording a step
    pub fn classify(table: &DecisionTable) -> Partition {
        let mut positions: HashMap<&Signature, usize> = HashMap::new();
        let mut classes: Vec<EquivalenceClass> = Vec::new();

        for obj in table.objects() {
            let pos = *positions.entry(obj.signature()).or_insert_with(|| {
                classes.push(EquivalenceClass::new(obj.signature().clone()));
                classes.len() - 1
            });
            classes[pos].add_member(obj.id(), obj.decision());
        }

        Partition::from_classes(classes)
    }

    /// Compute the partition and record the classification step
    pub fn analyze(table: &DecisionTable, recorder: &mut StepRecorder) -> Partition {
        let partition = Self::classify(table);

        let step = ClassificationStep {
            classes: partition.class_map(),
            frequencies: partition.frequency_map(),
            data: table.snapshot(),
        };
        recorder.record(
            format!(
                "Equivalence classes: {} classes, {} in conflict",
                partition.len(),
                partition.conflict_count()
            ),
            StepPayload::Classification(step),
        );

        log_event_with_fields(
            Event::ClassesComputed,
            &[
                ("classes", partition.len().to_string().as_str()),
                ("conflicts", partition.conflict_count().to_string().as_str()),
            ],
        );

        partition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{AttrValue, IngestOptions, RawTable};
    use serde_json::json;
    use std::collections::HashSet;

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
    fn test_conflict_class_detected() {
        let partition = IndiscernibilityAnalyzer::classify(&scenario_a());
        assert_eq!(partition.len(), 2);
        assert_eq!(partition.conflict_count(), 1);

        let conflict = partition.conflicts().next().unwrap();
        assert_eq!(conflict.members(), &["o1".to_string(), "o2".to_string()]);
        assert_eq!(conflict.key(), r#"{"a":1,"b":1}"#);
        assert_eq!(conflict.decisions()[&AttrValue::text("x")], 1);
    }

    #[test]
    fn test_partition_is_exact() {
        let t = scenario_a();
        let partition = IndiscernibilityAnalyzer::classify(&t);

        let mut seen = HashSet::new();
        for class in partition.classes() {
            for id in class.members() {
                assert!(seen.insert(id.clone()), "object {} in two classes", id);
            }
        }
        let all: HashSet<String> = t.ids().map(String::from).collect();
        assert_eq!(seen, all);
    }

    #[test]
    fn test_missing_attribute_is_mismatch() {
        let t = table(json!({
            "decision_attribute": "dec",
            "objects": [
                {"id": "o1", "values": {"a": 1, "b": 1, "dec": "x"}},
                {"id": "o2", "values": {"a": 1, "dec": "y"}}
            ]
        }));
        let partition = IndiscernibilityAnalyzer::classify(&t);
        assert_eq!(partition.len(), 2);
        assert_eq!(partition.conflict_count(), 0);
    }

    #[test]
    fn test_class_of() {
        let partition = IndiscernibilityAnalyzer::classify(&scenario_a());
        assert_eq!(partition.class_of("o2").unwrap().key(), r#"{"a":1,"b":1}"#);
        assert!(partition.class_of("o9").is_none());
    }

    #[test]
    fn test_analyze_records_classification_step() {
        let mut recorder = StepRecorder::new();
        let partition = IndiscernibilityAnalyzer::analyze(&scenario_a(), &mut recorder);

        assert_eq!(recorder.len(), 1);
        let step = &recorder.steps()[0];
        assert_eq!(step.index, 0);
        match &step.payload {
            StepPayload::Classification(c) => {
                assert_eq!(c.classes.len(), partition.len());
                assert_eq!(c.data.len(), 3);
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }
}
