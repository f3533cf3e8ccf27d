// ABOUTME: Function provider publishing one fixed payload to one fixed MQTT topic
// ABOUTME: Declares zero arguments; any supplied values are ignored
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::bus::MessageBus;
use crate::types::{ArgumentSchema, ArgumentValues, BridgeError, FunctionProvider};

/// Function provider for trigger-style actions (e.g. "open the door")
///
/// The payload and topic are fixed at construction; `invoke` publishes them
/// regardless of any supplied arguments. Publish errors propagate.
pub struct StatelessMqttFunctionProvider {
    name: String,
    description: String,
    arguments: ArgumentSchema,
    bus: Arc<dyn MessageBus>,
    topic: String,
    value: String,
}

impl StatelessMqttFunctionProvider {
    /// Create a provider publishing `value` to `topic` on each invocation
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        bus: Arc<dyn MessageBus>,
        topic: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            arguments: ArgumentSchema::new(),
            bus,
            topic: topic.into(),
            value: value.into(),
        }
    }
}

#[async_trait]
impl FunctionProvider for StatelessMqttFunctionProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn arguments(&self) -> &ArgumentSchema {
        &self.arguments
    }

    async fn invoke(&self, _values: &ArgumentValues) -> Result<(), BridgeError> {
        self.bus.publish(&self.topic, &self.value).await?;
        debug!(topic = %self.topic, value = %self.value, "Published fixed payload");
        Ok(())
    }
}
