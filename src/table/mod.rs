//! Decision table subsystem
//!
//! A decision table is an ordered set of objects, each described by
//! condition attributes and exactly one decision attribute.
//!
//! # Invariants
//!
//! - Object ids are unique and non-empty
//! - Every object carries a decision value
//! - Missing condition values are absent keys, never implicit defaults
//! - Values are strings or numbers, compared without coercion

mod decision_table;
mod ordered;
mod raw;
mod value;

pub use decision_table::{DecisionTable, TableObject, TableSnapshot};
pub use ordered::OrderedMap;
pub use raw::{IngestOptions, RawObject, RawTable};
pub use value::{AttrValue, Signature};
