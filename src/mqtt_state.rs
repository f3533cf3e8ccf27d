// ABOUTME: Push-based state provider caching the last payload seen on one MQTT topic
// ABOUTME: Reads are O(1) against a watch cell written by the bus event loop
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use tokio::sync::watch;

use crate::bus::MessageBus;
use crate::types::{BridgeError, StateProvider};

/// State provider subscribed to a single MQTT topic
///
/// Subscribes at construction and keeps the last-seen payload as its current
/// value, defaulting to `"unknown"` until the first message arrives.
/// [`get_value`](StateProvider::get_value) reads the cached value without
/// any network wait and never fails; a quiet topic stays `"unknown"`
/// indefinitely.
pub struct MqttStateProvider {
    name: String,
    description: String,
    value: watch::Receiver<String>,
}

impl MqttStateProvider {
    /// Subscribe to `topic` on the bus and build the provider
    ///
    /// # Errors
    ///
    /// Returns a transport error if the subscription cannot be registered.
    pub async fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        bus: &dyn MessageBus,
        topic: &str,
    ) -> Result<Self, BridgeError> {
        let value = bus.watch(topic).await?;
        Ok(Self {
            name: name.into(),
            description: description.into(),
            value,
        })
    }
}

#[async_trait]
impl StateProvider for MqttStateProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn get_value(&self) -> Result<String, BridgeError> {
        Ok(self.value.borrow().clone())
    }
}
