// ABOUTME: Core types for the bridge — provider traits, argument model, and error type
// ABOUTME: Defines StateProvider/FunctionProvider contracts shared by all protocol variants
//
// SPDX-License-Identifier: Apache-2.0

//! # Core Types
//!
//! Self-contained type definitions for the bridge library: the two provider
//! capability traits, the typed argument/constraint model surfaced to
//! callers, and the error type shared across all modules.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for bridge operations
#[derive(Debug, Clone)]
pub struct BridgeError {
    /// Error category
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
}

/// Categories of errors produced by the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration error (bad file, unknown provider kind, schema mismatch)
    Config,
    /// Message bus failure (connect, subscribe, publish)
    Transport,
    /// External service error (HTTP fetch failed, bad response shape)
    ExternalService,
    /// A named provider does not exist
    NotFound,
    /// Internal error (bug, unexpected state)
    Internal,
}

impl BridgeError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Config,
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: message.into(),
        }
    }

    /// Create an external service error
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::ExternalService,
            message: format!("{}: {}", service.into(), message.into()),
        }
    }

    /// Create a not-found error for a named provider
    pub fn not_found(name: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::NotFound,
            message: format!("Unknown provider: {}", name.into()),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Internal,
            message: message.into(),
        }
    }
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for BridgeError {}

// ============================================================================
// Argument Model
// ============================================================================

/// One admissible value of an enumerated numeric argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintVariant {
    /// The numeric value a caller may supply
    pub value: f64,
    /// Human-readable label for the value (e.g. `"on"`, `"off"`)
    pub description: String,
}

/// Valid domain of a numeric function argument
///
/// Closed variant set; the tag round-trips through serialization so callers
/// (voice-assistant skills, UIs) can render the constraint. Satisfaction is
/// advisory metadata — the bridge does not reject out-of-range invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Constraint {
    /// Valid values form the closed interval `[min, max]`
    NumberMinMax {
        /// Lower bound, inclusive
        min: f64,
        /// Upper bound, inclusive
        max: f64,
    },
    /// Valid values form an explicit enumerated set
    NumberVariants {
        /// The admissible values with their labels
        variants: Vec<ConstraintVariant>,
    },
}

/// A typed, constrained parameter of a function provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionArgument {
    /// Human-readable description surfaced to callers
    pub description: String,
    /// Valid domain of the argument
    pub constraints: Constraint,
}

/// Declared call signature of a function provider, keyed by argument name
pub type ArgumentSchema = BTreeMap<String, FunctionArgument>;

/// Caller-supplied argument values for one invocation
pub type ArgumentValues = HashMap<String, f64>;

// ============================================================================
// Provider Traits
// ============================================================================

/// A named read-only capability producing a current textual status
///
/// Implement this trait to add a new state source. The dispatcher treats
/// every state provider identically: it reads the description and calls
/// [`get_value`](Self::get_value). A failed read is recovered by the
/// dispatcher as a sentinel value, never as an HTTP error.
#[async_trait]
pub trait StateProvider: Send + Sync {
    /// Unique provider name within its collection
    fn name(&self) -> &str;

    /// Human-readable description surfaced to callers
    fn description(&self) -> &str;

    /// Produce the provider's current textual state
    ///
    /// May suspend on network I/O (pull-based variants) or return a cached
    /// value synchronously (push-based variants).
    async fn get_value(&self) -> Result<String, BridgeError>;
}

/// A named capability performing one device/service action
///
/// Implement this trait to add a new action. The dispatcher treats every
/// function provider identically: it reads the description and argument
/// schema, and calls [`invoke`](Self::invoke) with caller-supplied numeric
/// parameters. Invocation failures propagate to the dispatcher.
#[async_trait]
pub trait FunctionProvider: Send + Sync {
    /// Unique provider name within its collection
    fn name(&self) -> &str;

    /// Human-readable description surfaced to callers
    fn description(&self) -> &str;

    /// The declared call signature
    fn arguments(&self) -> &ArgumentSchema;

    /// Perform the action with the supplied argument values
    async fn invoke(&self, values: &ArgumentValues) -> Result<(), BridgeError>;
}
