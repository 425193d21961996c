//! dtresolve - A deterministic decision-table inconsistency resolver
//!
//! Pipeline: DecisionTable → IndiscernibilityAnalyzer →
//! {QualitativeResolver | QuantitativeResolver} → RuleInducer → ResultAssembler,
//! with every stage appending to a per-run StepRecorder.

pub mod analyzer;
pub mod cli;
pub mod engine;
pub mod errors;
pub mod http_server;
pub mod observability;
pub mod resolver;
pub mod rules;
pub mod table;
pub mod trace;

pub use engine::{process, Engine, EngineConfig, Method, ProcessRequest, ProcessResponse};
pub use errors::{EngineError, EngineResult};
