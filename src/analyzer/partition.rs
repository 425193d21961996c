//! Equivalence classes of the indiscernibility relation

use std::collections::{BTreeMap, HashMap};

use crate::table::{AttrValue, OrderedMap, Signature};

/// Objects sharing one condition signature
#[derive(Debug, Clone, PartialEq)]
pub struct EquivalenceClass {
    key: String,
    signature: Signature,
    members: Vec<String>,
    decisions: BTreeMap<AttrValue, usize>,
}

impl EquivalenceClass {
    pub(crate) fn new(signature: Signature) -> Self {
        Self {
            key: signature.key(),
            signature,
            members: Vec::new(),
            decisions: BTreeMap::new(),
        }
    }

    pub(crate) fn add_member(&mut self, id: &str, decision: &AttrValue) {
        self.members.push(id.to_string());
        *self.decisions.entry(decision.clone()).or_insert(0) += 1;
    }

    /// Synthetic class key (the signature as compact JSON)
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Shared condition signature
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Member ids in table order
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Member count per decision value
    pub fn decisions(&self) -> &BTreeMap<AttrValue, usize> {
        &self.decisions
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Classes are never empty once built; kept for API symmetry
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// A conflict class holds more than one distinct decision
    pub fn is_conflict(&self) -> bool {
        self.decisions.len() > 1
    }

    /// True when every member holds `decision`
    pub fn all_hold(&self, decision: &AttrValue) -> bool {
        self.decisions.len() == 1 && self.decisions.contains_key(decision)
    }

    /// True when at least one member holds `decision`
    pub fn any_holds(&self, decision: &AttrValue) -> bool {
        self.decisions.contains_key(decision)
    }

    /// Decision counts keyed by rendered decision value.
    ///
    /// Ingestion rejects tables whose distinct decisions render alike, so
    /// no two counts share a key.
    pub fn frequencies(&self) -> BTreeMap<String, usize> {
        self.decisions
            .iter()
            .map(|(d, n)| (d.to_string(), *n))
            .collect()
    }
}

/// A partition of the table's objects into equivalence classes.
///
/// Classes are in order of first appearance; each object id belongs to
/// exactly one class.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    classes: Vec<EquivalenceClass>,
    membership: HashMap<String, usize>,
}

impl Partition {
    pub(crate) fn from_classes(classes: Vec<EquivalenceClass>) -> Self {
        let membership = classes
            .iter()
            .enumerate()
            .flat_map(|(pos, class)| class.members.iter().map(move |id| (id.clone(), pos)))
            .collect();
        Self {
            classes,
            membership,
        }
    }

    /// All classes in order
    pub fn classes(&self) -> &[EquivalenceClass] {
        &self.classes
    }

    /// Classes whose members disagree on decision
    pub fn conflicts(&self) -> impl Iterator<Item = &EquivalenceClass> {
        self.classes.iter().filter(|c| c.is_conflict())
    }

    /// Number of conflict classes
    pub fn conflict_count(&self) -> usize {
        self.conflicts().count()
    }

    /// Number of objects inside conflict classes
    pub fn conflicting_objects(&self) -> usize {
        self.conflicts().map(|c| c.len()).sum()
    }

    /// Class holding the given object
    pub fn class_of(&self, id: &str) -> Option<&EquivalenceClass> {
        self.membership.get(id).map(|&pos| &self.classes[pos])
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true when there are no classes
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Class key to member ids, in class order
    pub fn class_map(&self) -> OrderedMap<String, Vec<String>> {
        self.classes
            .iter()
            .map(|c| (c.key.clone(), c.members.clone()))
            .collect()
    }

    /// Class key to per-decision member counts, in class order
    pub fn frequency_map(&self) -> OrderedMap<String, BTreeMap<String, usize>> {
        self.classes
            .iter()
            .map(|c| (c.key.clone(), c.frequencies()))
            .collect()
    }
}
