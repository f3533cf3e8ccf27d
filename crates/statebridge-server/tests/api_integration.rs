// ABOUTME: Integration tests for the bridge HTTP endpoints
// ABOUTME: Exercises /state aggregation and /functions listing/invocation via the axum router
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use statebridge::bus::{InMemoryBus, MessageBus};
use statebridge::config::BridgeConfig;
use statebridge::fixed_state::FixedStateProvider;
use statebridge::registry::{Dependencies, ProviderRegistry};
use statebridge::types::{BridgeError, StateProvider};

use statebridge_server::router;
use statebridge_server::state::ServerState;

const CONFIG: &str = r#"
    [state_providers.current_main_lights_state]
    type = "mqtt"
    description = "current state of lights (on or off)"
    topic = "bus/services/alice/state/main_lights"

    [state_providers.season]
    type = "fixed"
    description = "current season"
    value = "summer"

    [function_providers.open_door]
    type = "stateless-mqtt"
    description = "opens the door"
    topic = "bus/services/alice/function/open_door"
    value = "1"

    [function_providers.set_main_lights_state]
    type = "stateful-mqtt"
    description = "set state of main lights (on or off)"
    topic = "bus/services/alice/function/set_main_lights"

    [function_providers.set_main_lights_state.state_argument]
    description = "lights state"

    [function_providers.set_main_lights_state.state_argument.constraints]
    type = "number-variants"
    variants = [
        { value = 0.0, description = "off" },
        { value = 1.0, description = "on" },
    ]
"#;

/// State provider whose reads always fail, for aggregation tests
struct BrokenStateProvider;

#[async_trait]
impl StateProvider for BrokenStateProvider {
    fn name(&self) -> &str {
        "broken"
    }

    fn description(&self) -> &str {
        "always fails"
    }

    async fn get_value(&self) -> Result<String, BridgeError> {
        Err(BridgeError::external_service("test", "boom"))
    }
}

/// Build the app plus the bus it is wired to
async fn test_app() -> (axum::Router, Arc<InMemoryBus>) {
    let bus = Arc::new(InMemoryBus::new());
    let dependencies = Dependencies {
        bus: Arc::clone(&bus) as Arc<dyn MessageBus>,
        http: reqwest::Client::new(),
    };
    let config = BridgeConfig::from_toml(CONFIG).expect("parse config");
    let registry = ProviderRegistry::from_config(&config, &dependencies)
        .await
        .expect("build registry");
    let state = Arc::new(ServerState::new(registry));
    (router::build(state), bus)
}

/// Send a request and parse the response body as JSON
async fn send_and_parse(
    app: axum::Router,
    request: Request<Body>,
) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.expect("send request");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect")
        .to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

fn patch_functions(body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri("/functions")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serialize")))
        .expect("build request")
}

// ============================================================================
// /state
// ============================================================================

#[tokio::test]
async fn state_lists_every_provider_with_description_and_value() {
    let (app, bus) = test_app().await;
    bus.inject("bus/services/alice/state/main_lights", "on");

    let (status, json) = send_and_parse(app, get("/state")).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        json["current_main_lights_state"],
        serde_json::json!({
            "description": "current state of lights (on or off)",
            "value": "on"
        })
    );
    assert_eq!(json["season"]["value"], "summer");
}

#[tokio::test]
async fn state_reports_unknown_before_any_message() {
    let (app, _bus) = test_app().await;

    let (status, json) = send_and_parse(app, get("/state")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["current_main_lights_state"]["value"], "unknown");
}

#[tokio::test]
async fn state_accepts_post_as_well() {
    let (app, _bus) = test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/state")
        .body(Body::empty())
        .expect("build request");
    let (status, json) = send_and_parse(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.get("season").is_some());
}

#[tokio::test]
async fn failing_provider_yields_not_available_without_failing_the_rest() {
    let bus = Arc::new(InMemoryBus::new());
    let dependencies = Dependencies {
        bus: Arc::clone(&bus) as Arc<dyn MessageBus>,
        http: reqwest::Client::new(),
    };
    let config = BridgeConfig::from_toml(CONFIG).expect("parse config");
    let mut registry = ProviderRegistry::from_config(&config, &dependencies)
        .await
        .expect("build registry");
    registry.insert_state(Arc::new(BrokenStateProvider));
    registry.insert_state(Arc::new(FixedStateProvider::new(
        "steady",
        "always works",
        "fine",
    )));
    let app = router::build(Arc::new(ServerState::new(registry)));

    let (status, json) = send_and_parse(app, get("/state")).await;
    assert_eq!(status, StatusCode::OK);

    let entries = json.as_object().expect("object response");
    assert_eq!(entries.len(), 4);
    assert_eq!(json["broken"]["value"], "not available");
    assert_eq!(json["broken"]["description"], "always fails");
    assert_eq!(json["steady"]["value"], "fine");
    assert_eq!(json["season"]["value"], "summer");
}

// ============================================================================
// /functions listing
// ============================================================================

#[tokio::test]
async fn functions_listing_mirrors_descriptions_and_schemas() {
    let (app, _bus) = test_app().await;

    let (status, json) = send_and_parse(app, get("/functions")).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["open_door"]["description"], "opens the door");
    assert_eq!(
        json["open_door"]["arguments"],
        serde_json::json!({})
    );

    let state_arg = &json["set_main_lights_state"]["arguments"]["state"];
    assert_eq!(state_arg["description"], "lights state");
    assert_eq!(state_arg["constraints"]["type"], "number-variants");
    assert_eq!(state_arg["constraints"]["variants"][1]["value"], 1.0);
}

#[tokio::test]
async fn functions_listing_accepts_post() {
    let (app, _bus) = test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/functions")
        .body(Body::empty())
        .expect("build request");
    let (status, json) = send_and_parse(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.get("open_door").is_some());
}

// ============================================================================
// /functions invocation
// ============================================================================

#[tokio::test]
async fn invoke_stateless_function_publishes_fixed_payload() {
    let (app, bus) = test_app().await;

    let body = serde_json::json!({ "name": "open_door", "parameters": {} });
    let (status, json) = send_and_parse(app, patch_functions(&body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({}));

    assert_eq!(
        bus.published(),
        vec![(
            "bus/services/alice/function/open_door".to_owned(),
            "1".to_owned()
        )]
    );
}

#[tokio::test]
async fn invoke_stateful_function_publishes_stringified_state() {
    let (app, bus) = test_app().await;

    let body = serde_json::json!({
        "name": "set_main_lights_state",
        "parameters": { "state": 1 }
    });
    let (status, _json) = send_and_parse(app, patch_functions(&body)).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        bus.published(),
        vec![(
            "bus/services/alice/function/set_main_lights".to_owned(),
            "1".to_owned()
        )]
    );
}

#[tokio::test]
async fn invoke_without_state_is_a_lenient_no_op() {
    let (app, bus) = test_app().await;

    let body = serde_json::json!({ "name": "set_main_lights_state", "parameters": {} });
    let (status, json) = send_and_parse(app, patch_functions(&body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({}));
    assert!(bus.published().is_empty());
}

#[tokio::test]
async fn invoke_unknown_function_reports_error_instead_of_faulting() {
    let (app, _bus) = test_app().await;

    let body = serde_json::json!({ "name": "unknown-fn", "parameters": {} });
    let (status, json) = send_and_parse(app, patch_functions(&body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let error = json["error"].as_str().expect("error text");
    assert!(error.contains("unknown-fn"), "error: {error}");
}

#[tokio::test]
async fn invoke_with_missing_parameters_field_defaults_to_empty() {
    let (app, bus) = test_app().await;

    let body = serde_json::json!({ "name": "open_door" });
    let (status, _json) = send_and_parse(app, patch_functions(&body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bus.published().len(), 1);
}

// ============================================================================
// Router
// ============================================================================

#[tokio::test]
async fn unknown_route_returns_404() {
    let (app, _bus) = test_app().await;

    let response = app.oneshot(get("/health")).await.expect("send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn state_rejects_patch_method() {
    let (app, _bus) = test_app().await;

    let request = Request::builder()
        .method("PATCH")
        .uri("/state")
        .body(Body::empty())
        .expect("build request");
    let response = app.oneshot(request).await.expect("send request");
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
