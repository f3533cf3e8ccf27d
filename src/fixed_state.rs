// ABOUTME: State provider returning a preconfigured constant value
// ABOUTME: Used for placeholder wiring and as a predictable fixture in tests
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;

use crate::types::{BridgeError, StateProvider};

/// State provider whose value never changes
pub struct FixedStateProvider {
    name: String,
    description: String,
    value: String,
}

impl FixedStateProvider {
    /// Create a provider that always reports `value`
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value: value.into(),
        }
    }
}

#[async_trait]
impl StateProvider for FixedStateProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn get_value(&self) -> Result<String, BridgeError> {
        Ok(self.value.clone())
    }
}
