//! Resolution method selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Inconsistency resolution strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Rough-set lower/upper approximations
    Qualitative,
    /// Per-class decision confidence with a threshold
    Quantitative,
}

impl Method {
    /// Returns the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Qualitative => "qualitative",
            Method::Quantitative => "quantitative",
        }
    }

    /// True when the method accepts a confidence threshold
    pub fn takes_threshold(&self) -> bool {
        matches!(self, Method::Quantitative)
    }
}

impl FromStr for Method {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "qualitative" => Ok(Method::Qualitative),
            "quantitative" => Ok(Method::Quantitative),
            other => Err(EngineError::InvalidMethod(other.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
