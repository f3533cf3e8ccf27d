// ABOUTME: Declarative bridge configuration — tagged provider entries keyed by name
// ABOUTME: TOML loading where unknown kinds or malformed fields fail before any provider exists
//
// SPDX-License-Identifier: Apache-2.0

//! # Configuration
//!
//! The bridge is configured by a declarative tree: two maps (state and
//! function providers) from instance name to a config entry tagged by a
//! `type` discriminator. Each discriminator is one variant of a closed enum,
//! so deserialization is the schema check: an unknown kind, a missing field,
//! or a mistyped value fails the whole load, and the process never starts
//! with a partial registry.
//!
//! ```toml
//! [state_providers.current_main_lights_state]
//! type = "mqtt"
//! description = "current state of lights (on or off)"
//! topic = "bus/services/alice/state/main_lights"
//!
//! [function_providers.open_door]
//! type = "stateless-mqtt"
//! description = "opens the door"
//! topic = "bus/services/alice/function/open_door"
//! value = "1"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http_json::Extractor;
use crate::stateful_mqtt::MissingStatePolicy;
use crate::types::{ArgumentSchema, BridgeError, FunctionArgument};

/// One state-provider entry, selected by its `type` tag
///
/// The provider name is the enclosing map key and is re-attached when the
/// registry constructs the instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StateProviderConfig {
    /// Last payload seen on an MQTT topic
    Mqtt {
        /// Human-readable description surfaced to callers
        description: String,
        /// Topic to subscribe to
        topic: String,
    },
    /// JSON fetched from a URL on every read
    HttpJson {
        /// Human-readable description surfaced to callers
        description: String,
        /// URL to GET
        url: String,
        /// How to turn the response body into display text
        extract: Extractor,
    },
    /// Now-playing media of a YNCA receiver endpoint
    YncaNowPlaying {
        /// Human-readable description surfaced to callers
        description: String,
        /// URL of the now-playing JSON endpoint
        url: String,
    },
    /// Moonraker 3D-printer status summary
    MoonrakerStatus {
        /// Human-readable description surfaced to callers
        description: String,
        /// Base URL of the Moonraker API, without a trailing slash
        base_url: String,
    },
    /// Constant value
    Fixed {
        /// Human-readable description surfaced to callers
        description: String,
        /// The value to report
        value: String,
    },
}

/// One function-provider entry, selected by its `type` tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FunctionProviderConfig {
    /// Publish a fixed payload to a fixed topic
    StatelessMqtt {
        /// Human-readable description surfaced to callers
        description: String,
        /// Topic to publish to
        topic: String,
        /// Payload published on every invocation
        value: String,
    },
    /// Publish a caller-supplied numeric state to a topic
    StatefulMqtt {
        /// Human-readable description surfaced to callers
        description: String,
        /// Topic to publish to
        topic: String,
        /// Declared constraints of the single `state` argument
        state_argument: FunctionArgument,
        /// Policy when a caller omits the `state` argument
        #[serde(default)]
        on_missing_state: MissingStatePolicy,
    },
    /// Record invocations in the log, no other side effect
    Logging {
        /// Human-readable description surfaced to callers
        description: String,
        /// Declared call signature
        #[serde(default)]
        arguments: ArgumentSchema,
    },
}

/// The whole declarative configuration tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// State providers keyed by instance name
    #[serde(default)]
    pub state_providers: BTreeMap<String, StateProviderConfig>,
    /// Function providers keyed by instance name
    #[serde(default)]
    pub function_providers: BTreeMap<String, FunctionProviderConfig>,
}

impl BridgeConfig {
    /// Load and validate a configuration file
    ///
    /// # Errors
    ///
    /// Returns a config error if the file cannot be read or any entry fails
    /// the schema of its declared kind.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BridgeError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns a config error describing the first offending entry.
    pub fn from_toml(raw: &str) -> Result<Self, BridgeError> {
        toml::from_str(raw).map_err(|e| BridgeError::config(format!("Invalid configuration: {e}")))
    }
}
