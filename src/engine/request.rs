//! Inbound request

use serde::{Deserialize, Serialize};

use crate::table::RawTable;

/// One processing request: a raw table plus the method to apply
///
/// `method` stays a string on the wire so an unknown name surfaces as
/// `InvalidMethod` from the engine rather than a decode failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRequest {
    /// Table to resolve
    pub table: RawTable,

    /// "qualitative" or "quantitative"
    pub method: String,

    /// Quantitative confidence threshold in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl ProcessRequest {
    /// Create a request
    pub fn new(table: RawTable, method: impl Into<String>, threshold: Option<f64>) -> Self {
        Self {
            table,
            method: method.into(),
            threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_threshold_is_optional() {
        let req: ProcessRequest = serde_json::from_value(json!({
            "table": {"decision_attribute": "dec", "objects": []},
            "method": "qualitative"
        }))
        .unwrap();
        assert_eq!(req.method, "qualitative");
        assert!(req.threshold.is_none());
    }
}
