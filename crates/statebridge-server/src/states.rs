// ABOUTME: GET|POST /state handler aggregating every state provider's current value
// ABOUTME: Fans out reads concurrently; a failing provider yields "not available", never a 500
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use futures::future::join_all;
use tracing::warn;

use crate::api_types::StateEntry;
use crate::state::SharedState;

/// Sentinel value reported for a provider whose read failed
const NOT_AVAILABLE: &str = "not available";

/// Handle GET|POST /state
///
/// Issues one `get_value` per registered provider concurrently and joins
/// them all before responding, so one slow or failing provider neither
/// blocks nor fails the others. The response always contains every
/// registered name.
pub async fn handle(State(state): State<SharedState>) -> impl IntoResponse {
    let reads = state
        .registry()
        .state_providers()
        .iter()
        .map(|(name, provider)| {
            let name = name.clone();
            let provider = Arc::clone(provider);
            async move {
                let value = match provider.get_value().await {
                    Ok(value) => value,
                    Err(e) => {
                        warn!(provider = %name, error = %e, "Failed to read state");
                        NOT_AVAILABLE.to_owned()
                    }
                };
                let entry = StateEntry {
                    description: provider.description().to_owned(),
                    value,
                };
                (name, entry)
            }
        });

    let entries: BTreeMap<String, StateEntry> = join_all(reads).await.into_iter().collect();
    (StatusCode::OK, Json(entries))
}
