//! Wire format for inbound tables and the ingestion contract
//!
//! A raw table is rejected as a whole on the first violation; there is no
//! partial recovery. Checks run in a fixed order so the same bad input
//! always reports the same error.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::decision_table::{DecisionTable, TableObject};
use super::value::{AttrValue, Signature};
use crate::errors::{EngineError, EngineResult, MalformedReason};

/// One raw object: id plus attribute values (decision attribute included)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObject {
    /// Object identifier
    pub id: String,
    /// Attribute name to value; `null` means the value is absent
    #[serde(default)]
    pub values: BTreeMap<String, Value>,
}

impl RawObject {
    /// Create a raw object
    pub fn new(id: impl Into<String>, values: BTreeMap<String, Value>) -> Self {
        Self {
            id: id.into(),
            values,
        }
    }
}

/// Raw table as delivered by the ingestion collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// Name of the decision attribute
    pub decision_attribute: String,
    /// Objects in input order
    #[serde(default)]
    pub objects: Vec<RawObject>,
}

/// Normalization options applied while ingesting a raw table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    /// Trim surrounding whitespace from string values
    pub trim_text_values: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            trim_text_values: true,
        }
    }
}

impl DecisionTable {
    /// Validate a raw table and build the normalized decision table.
    ///
    /// # Errors
    ///
    /// `MalformedTable` when the decision attribute name is blank, the table
    /// is empty, an id is blank or duplicated, an object lacks a decision
    /// value, a value is not a string or number, two attribute names on one
    /// object collide after trimming, or two distinct decision values render
    /// alike (the number `1` and the string `"1"`).
    pub fn from_raw(raw: &RawTable, options: IngestOptions) -> EngineResult<DecisionTable> {
        let decision_attribute = raw.decision_attribute.trim();
        if decision_attribute.is_empty() {
            return Err(EngineError::malformed(
                MalformedReason::EmptyDecisionAttribute,
                "decision attribute name is empty",
            ));
        }

        if raw.objects.is_empty() {
            return Err(EngineError::malformed(
                MalformedReason::EmptyTable,
                "table contains no objects",
            ));
        }

        let mut seen = HashSet::with_capacity(raw.objects.len());
        let mut objects = Vec::with_capacity(raw.objects.len());

        for raw_obj in &raw.objects {
            let id = raw_obj.id.trim();
            if id.is_empty() {
                return Err(EngineError::malformed(
                    MalformedReason::EmptyObjectId,
                    format!("object at position {} has an empty id", objects.len()),
                ));
            }
            if !seen.insert(id.to_string()) {
                return Err(EngineError::malformed_object(
                    MalformedReason::DuplicateObjectId,
                    id,
                    format!("object id '{}' appears more than once", id),
                ));
            }

            objects.push(Self::ingest_object(
                id,
                raw_obj,
                decision_attribute,
                options,
            )?);
        }

        Self::check_decision_rendering(&objects)?;

        Ok(DecisionTable::from_objects(decision_attribute, objects))
    }

    /// Decisions are keyed by their rendered text in the output, so that
    /// text must identify the value.
    fn check_decision_rendering(objects: &[TableObject]) -> EngineResult<()> {
        let mut rendered: HashMap<String, &AttrValue> = HashMap::new();
        for obj in objects {
            match rendered.entry(obj.decision().to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(obj.decision());
                }
                Entry::Occupied(slot) if *slot.get() != obj.decision() => {
                    return Err(EngineError::malformed_object(
                        MalformedReason::AmbiguousDecision,
                        obj.id(),
                        format!(
                            "object '{}' decision {} renders the same as {}",
                            obj.id(),
                            obj.decision().to_json(),
                            slot.get().to_json()
                        ),
                    ));
                }
                Entry::Occupied(_) => {}
            }
        }
        Ok(())
    }

    fn ingest_object(
        id: &str,
        raw_obj: &RawObject,
        decision_attribute: &str,
        options: IngestOptions,
    ) -> EngineResult<TableObject> {
        let mut conditions = Signature::new();
        let mut decision = None;

        for (attr, value) in &raw_obj.values {
            // Null is an explicit "absent"; the key is dropped
            if value.is_null() {
                continue;
            }
            let scalar = AttrValue::from_json(value, options.trim_text_values).ok_or_else(|| {
                EngineError::malformed_object(
                    MalformedReason::NonScalarValue,
                    id,
                    format!(
                        "object '{}' attribute '{}' is not a string or number: {}",
                        id, attr, value
                    ),
                )
            })?;

            let name = attr.trim();
            let taken = if name == decision_attribute {
                decision.is_some()
            } else {
                conditions.get(name).is_some()
            };
            if taken {
                return Err(EngineError::malformed_object(
                    MalformedReason::DuplicateAttribute,
                    id,
                    format!(
                        "object '{}' carries attribute '{}' more than once",
                        id, name
                    ),
                ));
            }

            if name == decision_attribute {
                decision = Some(scalar);
            } else {
                conditions.insert(name, scalar);
            }
        }

        let decision = decision.ok_or_else(|| {
            EngineError::malformed_object(
                MalformedReason::MissingDecision,
                id,
                format!(
                    "object '{}' has no value for decision attribute '{}'",
                    id, decision_attribute
                ),
            )
        })?;

        Ok(TableObject::new(id, conditions, decision))
    }
}
