// ABOUTME: Bridge library exposing device states and functions through pluggable providers
// ABOUTME: Re-exports the provider traits, protocol variants, config model, and registry
//
// SPDX-License-Identifier: Apache-2.0

//! # Statebridge
//!
//! Library behind a bridge server that exposes externally-observable
//! "states" (readable facts about devices/services) and "functions"
//! (invokable actions) without callers knowing which transport backs each
//! one. Heterogeneous protocol adapters — MQTT pub/sub, polled HTTP/JSON,
//! polled vendor status APIs — all implement the same two traits:
//! [`StateProvider`](types::StateProvider) and
//! [`FunctionProvider`](types::FunctionProvider).
//!
//! Instances come from a declarative configuration tree: each entry carries
//! a `type` discriminator selecting one variant of a closed config enum,
//! and [`ProviderRegistry::from_config`](registry::ProviderRegistry) turns
//! the validated tree into live, name-keyed collections.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use statebridge::bus::{InMemoryBus, MessageBus};
//! use statebridge::config::BridgeConfig;
//! use statebridge::registry::{Dependencies, ProviderRegistry};
//!
//! # async fn example() -> Result<(), statebridge::types::BridgeError> {
//! let config = BridgeConfig::load("config.toml")?;
//! let dependencies = Dependencies {
//!     bus: Arc::new(InMemoryBus::new()) as Arc<dyn MessageBus>,
//!     http: reqwest::Client::new(),
//! };
//! let registry = ProviderRegistry::from_config(&config, &dependencies).await?;
//! for (name, provider) in registry.state_providers() {
//!     println!("{name}: {}", provider.get_value().await?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`] — Provider traits, argument/constraint model, error type
//! - [`config`] — Declarative configuration tree and TOML loading
//! - [`bus`] — Message-bus seam: MQTT transport and in-memory double
//! - [`registry`] — Config-driven construction and name-keyed lookup
//! - [`mqtt_state`] — Push-based MQTT state provider
//! - [`http_json`] — Pull-based HTTP/JSON state provider with declarative extractors
//! - [`moonraker`] — Moonraker printer-status state provider
//! - [`fixed_state`] — Constant-value state provider
//! - [`stateless_mqtt`] — Fixed-payload MQTT function provider
//! - [`stateful_mqtt`] — Parameterized MQTT function provider
//! - [`logging_function`] — Logging-only function provider

/// Provider traits, argument model, and error type
pub mod types;

/// Message-bus seam: MQTT transport and in-memory double
pub mod bus;
/// Declarative configuration tree and TOML loading
pub mod config;
/// Constant-value state provider
pub mod fixed_state;
/// Pull-based HTTP/JSON state provider
pub mod http_json;
/// Logging-only function provider
pub mod logging_function;
/// Moonraker printer-status state provider
pub mod moonraker;
/// Push-based MQTT state provider
pub mod mqtt_state;
/// Config-driven registry and collection guard
pub mod registry;
/// Parameterized MQTT function provider
pub mod stateful_mqtt;
/// Fixed-payload MQTT function provider
pub mod stateless_mqtt;

// Re-export the core surface for ergonomic access
pub use bus::{InMemoryBus, MessageBus, MqttBus, MqttSettings};
pub use config::{BridgeConfig, FunctionProviderConfig, StateProviderConfig};
pub use registry::{Dependencies, ProviderRegistry};
pub use types::{
    ArgumentSchema, ArgumentValues, BridgeError, Constraint, ConstraintVariant, ErrorKind,
    FunctionArgument, FunctionProvider, StateProvider,
};
