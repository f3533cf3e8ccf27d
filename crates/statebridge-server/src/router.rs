// ABOUTME: Axum router wiring the two uniform bridge endpoints
// ABOUTME: /state aggregates providers, /functions lists on GET|POST and invokes on PATCH
//
// SPDX-License-Identifier: Apache-2.0

use axum::routing::get;
use axum::Router;

use crate::functions;
use crate::state::SharedState;
use crate::states;

/// Build the application router
///
/// Routes:
/// - `GET|POST /state` — Aggregate all state providers' current values
/// - `GET|POST /functions` — List function signatures
/// - `PATCH /functions` — Invoke a named function with parameters
pub fn build(state: SharedState) -> Router {
    Router::new()
        .route("/state", get(states::handle).post(states::handle))
        .route(
            "/functions",
            get(functions::list)
                .post(functions::list)
                .patch(functions::invoke),
        )
        .with_state(state)
}
