// ABOUTME: Library surface of the bridge server binary, exported for integration tests
// ABOUTME: Exposes the router, shared state, wire types, and endpoint handlers
//
// SPDX-License-Identifier: Apache-2.0

/// Wire types for the HTTP API
pub mod api_types;
/// /functions handlers (list and invoke)
pub mod functions;
/// Router wiring the endpoints
pub mod router;
/// Shared server state
pub mod state;
/// /state aggregation handler
pub mod states;
