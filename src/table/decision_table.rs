//! Normalized in-memory decision table
//!
//! Objects keep their input order. That order drives every enumeration in
//! the pipeline (class order, member order, removed-object order).

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::ordered::OrderedMap;
use super::value::{AttrValue, Signature};

/// One object of the table: id, condition values and decision value
#[derive(Debug, Clone, PartialEq)]
pub struct TableObject {
    id: String,
    conditions: Signature,
    decision: AttrValue,
}

impl TableObject {
    /// Create an object
    pub fn new(id: impl Into<String>, conditions: Signature, decision: AttrValue) -> Self {
        Self {
            id: id.into(),
            conditions,
            decision,
        }
    }

    /// Object id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Condition signature
    pub fn signature(&self) -> &Signature {
        &self.conditions
    }

    /// Decision value
    pub fn decision(&self) -> &AttrValue {
        &self.decision
    }

    /// Full attribute map including the decision attribute
    pub fn attributes(&self, decision_attribute: &str) -> BTreeMap<String, AttrValue> {
        let mut attrs = self.conditions.as_map().clone();
        attrs.insert(decision_attribute.to_string(), self.decision.clone());
        attrs
    }
}

/// Object-id-keyed attribute maps in table order
pub type TableSnapshot = OrderedMap<String, BTreeMap<String, AttrValue>>;

/// A validated decision table
#[derive(Debug, Clone)]
pub struct DecisionTable {
    decision_attribute: String,
    objects: Vec<TableObject>,
    index: HashMap<String, usize>,
}

impl DecisionTable {
    /// Build a table from already-normalized objects.
    ///
    /// Callers outside this module go through `DecisionTable::from_raw`,
    /// which enforces the ingestion contract first.
    pub(crate) fn from_objects(
        decision_attribute: impl Into<String>,
        objects: Vec<TableObject>,
    ) -> Self {
        let index = objects
            .iter()
            .enumerate()
            .map(|(pos, obj)| (obj.id.clone(), pos))
            .collect();
        Self {
            decision_attribute: decision_attribute.into(),
            objects,
            index,
        }
    }

    /// Name of the decision attribute
    pub fn decision_attribute(&self) -> &str {
        &self.decision_attribute
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true when the table has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in table order
    pub fn objects(&self) -> &[TableObject] {
        &self.objects
    }

    /// Object ids in table order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().map(|o| o.id.as_str())
    }

    /// Look up an object by id
    pub fn get(&self, id: &str) -> Option<&TableObject> {
        self.index.get(id).map(|&pos| &self.objects[pos])
    }

    /// Returns true when the table holds the id
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Sorted union of condition attribute names
    pub fn condition_attributes(&self) -> BTreeSet<String> {
        self.objects
            .iter()
            .flat_map(|o| o.conditions.attributes().cloned())
            .collect()
    }

    /// Distinct decision values in order of first appearance
    pub fn decision_values(&self) -> Vec<AttrValue> {
        let mut seen = HashSet::new();
        self.objects
            .iter()
            .filter(|o| seen.insert(&o.decision))
            .map(|o| o.decision.clone())
            .collect()
    }

    /// Number of objects holding each decision value
    pub fn decision_counts(&self) -> BTreeMap<AttrValue, usize> {
        let mut counts = BTreeMap::new();
        for obj in &self.objects {
            *counts.entry(obj.decision.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Sub-table holding only the objects for which `keep` returns true,
    /// preserving table order
    pub fn retain<F>(&self, mut keep: F) -> DecisionTable
    where
        F: FnMut(&TableObject) -> bool,
    {
        let objects = self.objects.iter().filter(|o| keep(o)).cloned().collect();
        DecisionTable::from_objects(self.decision_attribute.clone(), objects)
    }

    /// Serializable snapshot of the whole table
    pub fn snapshot(&self) -> TableSnapshot {
        self.objects
            .iter()
            .map(|o| (o.id.clone(), o.attributes(&self.decision_attribute)))
            .collect()
    }

    /// Serializable snapshot of the given objects, in the order given.
    ///
    /// Unknown ids are skipped.
    pub fn snapshot_of(&self, ids: &[String]) -> TableSnapshot {
        ids.iter()
            .filter_map(|id| self.get(id))
            .map(|o| (o.id.clone(), o.attributes(&self.decision_attribute)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(id: &str, a: i64, dec: &str) -> TableObject {
        let mut sig = Signature::new();
        sig.insert("a", AttrValue::int(a));
        TableObject::new(id, sig, AttrValue::text(dec))
    }

    fn sample() -> DecisionTable {
        DecisionTable::from_objects(
            "dec",
            vec![obj("o1", 1, "y"), obj("o2", 2, "x"), obj("o3", 3, "y")],
        )
    }

    #[test]
    fn test_decision_values_first_appearance() {
        let table = sample();
        assert_eq!(
            table.decision_values(),
            vec![AttrValue::text("y"), AttrValue::text("x")]
        );
    }

    #[test]
    fn test_decision_counts() {
        let counts = sample().decision_counts();
        assert_eq!(counts[&AttrValue::text("y")], 2);
        assert_eq!(counts[&AttrValue::text("x")], 1);
    }

    #[test]
    fn test_retain_preserves_order() {
        let table = sample();
        let sub = table.retain(|o| o.id() != "o2");
        let ids: Vec<&str> = sub.ids().collect();
        assert_eq!(ids, vec!["o1", "o3"]);
        assert!(sub.get("o2").is_none());
        assert!(sub.get("o3").is_some());
    }

    #[test]
    fn test_snapshot_includes_decision() {
        let snapshot = sample().snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(
            json,
            r#"{"o1":{"a":1,"dec":"y"},"o2":{"a":2,"dec":"x"},"o3":{"a":3,"dec":"y"}}"#
        );
    }

    #[test]
    fn test_snapshot_of_subset() {
        let table = sample();
        let snapshot = table.snapshot_of(&["o3".to_string(), "missing".to_string()]);
        assert_eq!(snapshot.len(), 1);
    }
}
