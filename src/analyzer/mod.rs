//! Indiscernibility analysis subsystem
//!
//! Partitions objects into equivalence classes by condition-attribute
//! equality and flags the classes whose members disagree on decision.
//!
//! # Invariants
//!
//! - Classes partition the object ids exactly
//! - Class order is order of first appearance in the table
//! - Classification is deterministic and side-effect free apart from
//!   the recorded step

mod indiscernibility;
mod partition;

pub use indiscernibility::IndiscernibilityAnalyzer;
pub use partition::{EquivalenceClass, Partition};
