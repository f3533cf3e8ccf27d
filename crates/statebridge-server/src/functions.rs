// ABOUTME: /functions handlers — list declared signatures, invoke a function by name
// ABOUTME: Unknown names and invocation failures surface as 500 with an error body
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use statebridge::types::BridgeError;
use tracing::{info, warn};

use crate::api_types::{ErrorResponse, FunctionEntry, InvokeRequest};
use crate::state::SharedState;

/// Handle GET|POST /functions
///
/// Lists every registered function with its description and declared
/// argument schema, keyed by function name.
pub async fn list(State(state): State<SharedState>) -> impl IntoResponse {
    let entries: BTreeMap<String, FunctionEntry> = state
        .registry()
        .function_providers()
        .iter()
        .map(|(name, provider)| {
            let entry = FunctionEntry {
                description: provider.description().to_owned(),
                arguments: provider.arguments().clone(),
            };
            (name.clone(), entry)
        })
        .collect();

    (StatusCode::OK, Json(entries))
}

/// Handle PATCH /functions
///
/// Looks the named function up and invokes it with the supplied numeric
/// parameters. Success is `200 {}`; an unknown name or a failed invocation
/// is `500 { "error": … }`. No retry.
pub async fn invoke(
    State(state): State<SharedState>,
    Json(request): Json<InvokeRequest>,
) -> Response {
    info!(function = %request.name, parameters = ?request.parameters, "Invoking function");

    let result: Result<(), BridgeError> = match state.registry().function(&request.name) {
        Ok(function) => function.invoke(&request.parameters).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({}))).into_response(),
        Err(e) => {
            warn!(function = %request.name, error = %e, "Function invocation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e)),
            )
                .into_response()
        }
    }
}
