// ABOUTME: Config-driven provider registry — exhaustive kind dispatch plus the collection guard
// ABOUTME: Turns a validated configuration tree into name-keyed provider collections
//
// SPDX-License-Identifier: Apache-2.0

//! # Provider Registry
//!
//! [`ProviderRegistry::from_config`] walks the validated configuration and
//! constructs one provider per entry through an exhaustive match on the
//! config enum: adding a provider kind means adding an enum variant, and the
//! compiler forces every match site to handle it. Constructors receive the
//! shared [`Dependencies`] bundle; they never own the handles' lifecycle.
//!
//! Insertion goes through the collection guard: a name collision keeps the
//! first registration and logs a warning instead of failing, covering
//! collections assembled programmatically where no schema enforces
//! uniqueness.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::bus::MessageBus;
use crate::config::{BridgeConfig, FunctionProviderConfig, StateProviderConfig};
use crate::fixed_state::FixedStateProvider;
use crate::http_json::HttpJsonStateProvider;
use crate::logging_function::LoggingFunctionProvider;
use crate::moonraker::MoonrakerStateProvider;
use crate::mqtt_state::MqttStateProvider;
use crate::stateful_mqtt::StatefulMqttFunctionProvider;
use crate::stateless_mqtt::StatelessMqttFunctionProvider;
use crate::types::{BridgeError, FunctionProvider, StateProvider};

/// Process-wide handles injected into every provider constructor
#[derive(Clone)]
pub struct Dependencies {
    /// Shared message-bus connection
    pub bus: Arc<dyn MessageBus>,
    /// Shared HTTP client
    pub http: reqwest::Client,
}

/// Name-keyed collections of live provider instances
///
/// The registry exclusively owns its providers; the dispatcher reads them
/// through shared references.
#[derive(Default)]
pub struct ProviderRegistry {
    state_providers: BTreeMap<String, Arc<dyn StateProvider>>,
    function_providers: BTreeMap<String, Arc<dyn FunctionProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from a validated configuration tree
    ///
    /// Constructs providers in entry order (name order within each
    /// category); each instance gets its name from the map key and the
    /// shared dependency bundle. Any constructor failure aborts the build.
    ///
    /// # Errors
    ///
    /// Returns the first provider construction error.
    pub async fn from_config(
        config: &BridgeConfig,
        dependencies: &Dependencies,
    ) -> Result<Self, BridgeError> {
        let mut registry = Self::new();

        for (name, entry) in &config.state_providers {
            let provider: Arc<dyn StateProvider> = match entry {
                StateProviderConfig::Mqtt { description, topic } => Arc::new(
                    MqttStateProvider::new(name, description, dependencies.bus.as_ref(), topic)
                        .await?,
                ),
                StateProviderConfig::HttpJson {
                    description,
                    url,
                    extract,
                } => Arc::new(HttpJsonStateProvider::new(
                    name,
                    description,
                    url,
                    extract.clone(),
                    dependencies.http.clone(),
                )),
                StateProviderConfig::YncaNowPlaying { description, url } => {
                    Arc::new(HttpJsonStateProvider::now_playing(
                        name,
                        description,
                        url,
                        dependencies.http.clone(),
                    ))
                }
                StateProviderConfig::MoonrakerStatus {
                    description,
                    base_url,
                } => Arc::new(MoonrakerStateProvider::new(
                    name,
                    description,
                    base_url,
                    dependencies.http.clone(),
                )),
                StateProviderConfig::Fixed { description, value } => {
                    Arc::new(FixedStateProvider::new(name, description, value))
                }
            };
            registry.insert_state(provider);
            info!(name = %name, "Registered state provider");
        }

        for (name, entry) in &config.function_providers {
            let provider: Arc<dyn FunctionProvider> = match entry {
                FunctionProviderConfig::StatelessMqtt {
                    description,
                    topic,
                    value,
                } => Arc::new(StatelessMqttFunctionProvider::new(
                    name,
                    description,
                    Arc::clone(&dependencies.bus),
                    topic,
                    value,
                )),
                FunctionProviderConfig::StatefulMqtt {
                    description,
                    topic,
                    state_argument,
                    on_missing_state,
                } => Arc::new(StatefulMqttFunctionProvider::new(
                    name,
                    description,
                    state_argument.clone(),
                    Arc::clone(&dependencies.bus),
                    topic,
                    *on_missing_state,
                )),
                FunctionProviderConfig::Logging {
                    description,
                    arguments,
                } => Arc::new(LoggingFunctionProvider::new(
                    name,
                    description,
                    arguments.clone(),
                )),
            };
            registry.insert_function(provider);
            info!(name = %name, "Registered function provider");
        }

        Ok(registry)
    }

    /// Insert a state provider under its own name
    ///
    /// First registration wins: a colliding name logs a warning and leaves
    /// the collection unchanged.
    pub fn insert_state(&mut self, provider: Arc<dyn StateProvider>) {
        let name = provider.name().to_owned();
        if self.state_providers.contains_key(&name) {
            warn!(name = %name, "State provider already registered, keeping the first");
            return;
        }
        self.state_providers.insert(name, provider);
    }

    /// Insert a function provider under its own name
    ///
    /// First registration wins: a colliding name logs a warning and leaves
    /// the collection unchanged.
    pub fn insert_function(&mut self, provider: Arc<dyn FunctionProvider>) {
        let name = provider.name().to_owned();
        if self.function_providers.contains_key(&name) {
            warn!(name = %name, "Function provider already registered, keeping the first");
            return;
        }
        self.function_providers.insert(name, provider);
    }

    /// All state providers, keyed by name
    pub fn state_providers(&self) -> &BTreeMap<String, Arc<dyn StateProvider>> {
        &self.state_providers
    }

    /// All function providers, keyed by name
    pub fn function_providers(&self) -> &BTreeMap<String, Arc<dyn FunctionProvider>> {
        &self.function_providers
    }

    /// Look up a function provider by name
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown name.
    pub fn function(&self, name: &str) -> Result<Arc<dyn FunctionProvider>, BridgeError> {
        self.function_providers
            .get(name)
            .cloned()
            .ok_or_else(|| BridgeError::not_found(name))
    }
}
