//! Observable events of a processing run
//!
//! Events are explicit and typed. Scoped begin/complete pairs such as
//! `PIPELINE_BEGIN` are emitted by `ObservationScope` rather than listed
//! here.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded and validated
    ConfigLoaded,

    // Ingestion
    /// Raw table accepted
    TableValidated,
    /// Raw table rejected as malformed
    TableRejected,

    // Analysis
    /// Equivalence classes computed
    ClassesComputed,

    // Resolution
    /// Approximation of one decision class computed
    ApproximationComputed,
    /// One conflict class resolved
    ConflictResolved,
    /// Resolver finished
    ResolutionComplete,

    // Rules
    /// Rules induced from the consistent table
    RulesInduced,

    // Invariants
    /// Internal invariant violated (FATAL)
    InvariantViolated,

    // Server
    /// HTTP server bound and serving
    ServerStart,
    /// Request accepted by the HTTP server
    RequestReceived,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::TableValidated => "TABLE_VALIDATED",
            Event::TableRejected => "TABLE_REJECTED",

            Event::ClassesComputed => "CLASSES_COMPUTED",

            Event::ApproximationComputed => "APPROXIMATION_COMPUTED",
            Event::ConflictResolved => "CONFLICT_RESOLVED",
            Event::ResolutionComplete => "RESOLUTION_COMPLETE",

            Event::RulesInduced => "RULES_INDUCED",

            Event::InvariantViolated => "INVARIANT_VIOLATED",

            Event::ServerStart => "SERVER_START",
            Event::RequestReceived => "REQUEST_RECEIVED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::InvariantViolated)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
