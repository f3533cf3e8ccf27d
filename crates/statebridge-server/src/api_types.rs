// ABOUTME: Wire types for the bridge HTTP API — state entries, function listings, invocations
// ABOUTME: Shapes are stable: voice-assistant skills consume them verbatim
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use statebridge::types::{ArgumentValues, FunctionArgument};

/// One entry of the `/state` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateEntry {
    /// Human-readable description of the state
    pub description: String,
    /// Current value, or `"not available"` when the read failed
    pub value: String,
}

/// One entry of the `/functions` listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionEntry {
    /// Human-readable description of the function
    pub description: String,
    /// Declared call signature, keyed by argument name
    pub arguments: BTreeMap<String, FunctionArgument>,
}

/// Body of a `PATCH /functions` invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeRequest {
    /// Name of the function to invoke
    pub name: String,
    /// Numeric argument values, keyed by argument name
    #[serde(default)]
    pub parameters: ArgumentValues,
}

/// Error body returned with a 500 status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error text
    pub error: String,
}

impl ErrorResponse {
    /// Build an error response from anything displayable
    pub fn new(error: impl ToString) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoke_request_parameters_default_to_empty() {
        let request: InvokeRequest =
            serde_json::from_str(r#"{ "name": "open_door" }"#).expect("parse");
        assert_eq!(request.name, "open_door");
        assert!(request.parameters.is_empty());
    }

    #[test]
    fn state_entry_serializes_expected_shape() {
        let entry = StateEntry {
            description: "current state of lights".to_owned(),
            value: "on".to_owned(),
        };
        let json = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "description": "current state of lights", "value": "on" })
        );
    }
}
