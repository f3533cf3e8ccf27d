// ABOUTME: Function provider that only records invocations via tracing
// ABOUTME: Placeholder wiring for actions that have no transport yet
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use tracing::info;

use crate::types::{ArgumentSchema, ArgumentValues, BridgeError, FunctionProvider};

/// Function provider with no side effect beyond a log line
pub struct LoggingFunctionProvider {
    name: String,
    description: String,
    arguments: ArgumentSchema,
}

impl LoggingFunctionProvider {
    /// Create a provider declaring the given argument schema
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        arguments: ArgumentSchema,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            arguments,
        }
    }
}

#[async_trait]
impl FunctionProvider for LoggingFunctionProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn arguments(&self) -> &ArgumentSchema {
        &self.arguments
    }

    async fn invoke(&self, values: &ArgumentValues) -> Result<(), BridgeError> {
        info!(function = %self.name, values = ?values, "Function called");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invoke_always_succeeds() {
        let provider =
            LoggingFunctionProvider::new("noop", "does nothing", ArgumentSchema::new());
        let mut values = ArgumentValues::new();
        values.insert("state".to_owned(), 3.0);
        provider.invoke(&values).await.expect("invoke");
        provider.invoke(&ArgumentValues::new()).await.expect("invoke");
    }
}
