//! Engine error types
//!
//! Error codes:
//! - DT_MALFORMED_TABLE (ERROR)
//! - DT_INVALID_METHOD (ERROR)
//! - DT_INVALID_THRESHOLD (ERROR)
//! - DT_INVARIANT_VIOLATION (FATAL)
//!
//! Every input error is raised before the first step is recorded, so a
//! failed run never produces a partial result.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Severity levels for engine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The request was rejected, the engine is healthy
    Error,
    /// An internal invariant broke; the engine has a defect
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Why a table was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedReason {
    /// Table has no objects
    EmptyTable,
    /// Decision attribute name is blank
    EmptyDecisionAttribute,
    /// Object id is blank
    EmptyObjectId,
    /// Two objects share an id
    DuplicateObjectId,
    /// Object has no value for the decision attribute
    MissingDecision,
    /// Value is not a string or number
    NonScalarValue,
    /// Two attribute names on one object are equal once trimmed
    DuplicateAttribute,
    /// Two distinct decision values render to the same text
    AmbiguousDecision,
}

impl MalformedReason {
    /// Returns the stable reason string
    pub fn as_str(&self) -> &'static str {
        match self {
            MalformedReason::EmptyTable => "empty_table",
            MalformedReason::EmptyDecisionAttribute => "empty_decision_attribute",
            MalformedReason::EmptyObjectId => "empty_object_id",
            MalformedReason::DuplicateObjectId => "duplicate_object_id",
            MalformedReason::MissingDecision => "missing_decision",
            MalformedReason::NonScalarValue => "non_scalar_value",
            MalformedReason::DuplicateAttribute => "duplicate_attribute",
            MalformedReason::AmbiguousDecision => "ambiguous_decision_value",
        }
    }
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Engine error type with full context
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// Input table violates the ingestion contract
    #[error("Malformed table ({reason}): {detail}")]
    MalformedTable {
        reason: MalformedReason,
        object_id: Option<String>,
        detail: String,
    },

    /// Unrecognized resolution method
    #[error("Invalid method: '{0}'. Expected 'qualitative' or 'quantitative'")]
    InvalidMethod(String),

    /// Threshold out of range or supplied where it is not accepted
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Internal consistency check failed
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

impl EngineError {
    /// Create a malformed table error not tied to a single object
    pub fn malformed(reason: MalformedReason, detail: impl Into<String>) -> Self {
        EngineError::MalformedTable {
            reason,
            object_id: None,
            detail: detail.into(),
        }
    }

    /// Create a malformed table error naming the offending object
    pub fn malformed_object(
        reason: MalformedReason,
        object_id: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        EngineError::MalformedTable {
            reason,
            object_id: Some(object_id.into()),
            detail: detail.into(),
        }
    }

    /// Create an invariant violation error
    pub fn invariant(detail: impl Into<String>) -> Self {
        EngineError::InvariantViolation(detail.into())
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::MalformedTable { .. } => "DT_MALFORMED_TABLE",
            EngineError::InvalidMethod(_) => "DT_INVALID_METHOD",
            EngineError::InvalidThreshold(_) => "DT_INVALID_THRESHOLD",
            EngineError::InvariantViolation(_) => "DT_INVARIANT_VIOLATION",
        }
    }

    /// Returns the error kind as exposed on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::MalformedTable { .. } => "malformed_table",
            EngineError::InvalidMethod(_) => "invalid_method",
            EngineError::InvalidThreshold(_) => "invalid_threshold",
            EngineError::InvariantViolation(_) => "invariant_violation",
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        match self {
            EngineError::InvariantViolation(_) => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    /// Returns the offending object id, if the error names one
    pub fn object_id(&self) -> Option<&str> {
        match self {
            EngineError::MalformedTable { object_id, .. } => object_id.as_deref(),
            _ => None,
        }
    }

    /// Returns the malformed-table reason, if any
    pub fn malformed_reason(&self) -> Option<MalformedReason> {
        match self {
            EngineError::MalformedTable { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
