// ABOUTME: Server state holding the provider registry built at startup
// ABOUTME: Shared read-only across request handlers; providers are never mutated after boot
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use statebridge::registry::ProviderRegistry;

/// Shared server state handle
pub type SharedState = Arc<ServerState>;

/// Immutable server state
///
/// The registry exclusively owns the provider instances; handlers only read
/// them. Stream-backed providers mutate their own cached values internally,
/// driven by the bus event loop, not by requests.
pub struct ServerState {
    registry: ProviderRegistry,
}

impl ServerState {
    /// Create server state around a built registry
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// The provider registry
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }
}
