//! Resolution Invariant Tests
//!
//! Properties that must hold for every table and both methods:
//! - Equivalence classes partition the object ids exactly
//! - lower(d) ⊆ upper(d), accuracy in [0, 1], lower objects are kept
//! - Kept and removed ids are disjoint and cover the input
//! - Every kept object is covered by exactly one rule
//! - Rule statistics stay in bounds
//! - Identical requests produce byte-identical output

use std::collections::HashSet;

use dtresolve::analyzer::IndiscernibilityAnalyzer;
use dtresolve::table::{DecisionTable, IngestOptions, RawTable};
use dtresolve::{process, ProcessResponse};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

const METHODS: [&str; 2] = ["qualitative", "quantitative"];

/// Deterministic family of tables with a mix of conflicts, numeric and
/// text values, and objects missing a condition attribute.
fn fixture_tables() -> Vec<RawTable> {
    let mut tables = Vec::new();
    for (size, spread) in [(6usize, 2usize), (12, 3), (25, 4), (40, 3)] {
        let objects: Vec<Value> = (0..size)
            .map(|i| {
                let mut values = serde_json::Map::new();
                values.insert("a".into(), json!((i * 7) % spread));
                values.insert("b".into(), json!(["low", "mid", "high"][(i * 5) % 3]));
                if i % 11 != 10 {
                    values.insert("c".into(), json!((i % 2) as f64 + 0.5));
                }
                values.insert("dec".into(), json!(["yes", "no", "maybe"][(i * 3 + i / 4) % 3]));
                json!({"id": format!("obj{}", i), "values": values})
            })
            .collect();
        tables.push(
            serde_json::from_value(json!({"decision_attribute": "dec", "objects": objects}))
                .unwrap(),
        );
    }
    tables
}

fn all_ids(raw: &RawTable) -> HashSet<String> {
    raw.objects.iter().map(|o| o.id.clone()).collect()
}

fn run_all() -> Vec<(RawTable, &'static str, ProcessResponse)> {
    let mut runs = Vec::new();
    for table in fixture_tables() {
        for method in METHODS {
            let response = process(table.clone(), method, None).unwrap();
            runs.push((table.clone(), method, response));
        }
    }
    runs
}

// =============================================================================
// Partition Tests
// =============================================================================

/// Classes are non-empty, pairwise disjoint, and cover every id.
#[test]
fn test_classes_partition_ids() {
    for raw in fixture_tables() {
        let table = DecisionTable::from_raw(&raw, IngestOptions::default()).unwrap();
        let partition = IndiscernibilityAnalyzer::classify(&table);

        let mut seen = HashSet::new();
        for class in partition.classes() {
            assert!(!class.is_empty());
            for id in class.members() {
                assert!(seen.insert(id.clone()), "{} in two classes", id);
                assert_eq!(partition.class_of(id).unwrap().key(), class.key());
            }
        }
        assert_eq!(seen, all_ids(&raw));
    }
}

// =============================================================================
// Resolution Tests
// =============================================================================

/// Qualitative approximations are nested and bounded; lower objects survive.
#[test]
fn test_qualitative_approximation_properties() {
    for raw in fixture_tables() {
        let response = process(raw, "qualitative", None).unwrap();
        let kept: HashSet<&String> = response.result.consistent_data.keys().collect();

        for approx in response.result.approximations.as_ref().unwrap().values() {
            let upper: HashSet<&String> = approx.upper.iter().collect();
            assert!(!approx.upper.is_empty());
            for id in &approx.lower {
                assert!(upper.contains(id));
                assert!(kept.contains(id));
            }
            assert!((0.0..=1.0).contains(&approx.accuracy));
        }
    }
}

/// Kept and removed are disjoint and together equal the input.
#[test]
fn test_kept_and_removed_cover_input() {
    for (raw, method, response) in run_all() {
        let result = &response.result;
        let kept: HashSet<String> = result.consistent_data.keys().cloned().collect();
        let removed: HashSet<String> = result.removed_objects.iter().cloned().collect();

        assert!(kept.is_disjoint(&removed), "{}", method);
        let union: HashSet<String> = kept.union(&removed).cloned().collect();
        assert_eq!(union, all_ids(&raw));
        assert_eq!(
            result.summary.consistent_size + result.summary.removed_count,
            result.summary.original_size
        );
    }
}

/// Removed ids come back in input order.
#[test]
fn test_removed_in_table_order() {
    for (raw, _, response) in run_all() {
        let order: Vec<&String> = raw
            .objects
            .iter()
            .map(|o| &o.id)
            .filter(|id| response.result.removed_objects.contains(id))
            .collect();
        let removed: Vec<&String> = response.result.removed_objects.iter().collect();
        assert_eq!(removed, order);
    }
}

/// After resolution, no conflict class remains.
#[test]
fn test_consistent_table_has_no_conflicts() {
    for (_, method, response) in run_all() {
        for rule in &response.result.rules {
            assert_eq!(rule.confidence, 1.0, "{}", method);
        }
    }
}

// =============================================================================
// Rule Tests
// =============================================================================

/// Each kept object matches exactly one rule, which predicts its decision.
#[test]
fn test_rule_coverage() {
    for (raw, _, response) in run_all() {
        let result = &response.result;
        let table = DecisionTable::from_raw(&raw, IngestOptions::default()).unwrap();
        let kept = table
            .objects()
            .iter()
            .filter(|obj| result.consistent_data.get(&obj.id().to_string()).is_some());

        for obj in kept {
            let matching: Vec<_> = result.rules.iter().filter(|rule| rule.matches(obj)).collect();
            assert_eq!(matching.len(), 1, "object {} matched {} rules", obj.id(), matching.len());
            assert!(matching[0].covers(obj));
        }
    }
}

/// Statistics are within [0, 1] and frequencies within the table.
#[test]
fn test_rule_numeric_bounds() {
    for (_, _, response) in run_all() {
        let consistent_size = response.result.summary.consistent_size;
        for rule in &response.result.rules {
            assert!((0.0..=1.0).contains(&rule.support));
            assert!((0.0..=1.0).contains(&rule.confidence));
            assert!((0.0..=1.0).contains(&rule.weight));
            assert!(rule.decision_frequency <= consistent_size);
            assert!(rule.decision_frequency >= 1);
        }
        let total_support: f64 = response.result.rules.iter().map(|r| r.support).sum();
        if consistent_size > 0 {
            assert!((total_support - 1.0).abs() < 1e-9);
        }
    }
}

// =============================================================================
// Determinism Tests
// =============================================================================

/// Same request twice yields byte-identical JSON, steps included.
#[test]
fn test_idempotent_output() {
    for table in fixture_tables() {
        for method in METHODS {
            let first = serde_json::to_string(&process(table.clone(), method, None).unwrap())
                .unwrap();
            for _ in 0..5 {
                let again =
                    serde_json::to_string(&process(table.clone(), method, None).unwrap())
                        .unwrap();
                assert_eq!(first, again);
            }
        }
    }
}

/// Step indices are dense and start at zero.
#[test]
fn test_step_indices_dense() {
    for (_, _, response) in run_all() {
        assert!(!response.steps.is_empty());
        for (i, step) in response.steps.iter().enumerate() {
            assert_eq!(step.index, i);
        }
    }
}
