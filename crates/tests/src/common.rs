use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use server::service::DefaultService;
use server::state::{build_service, AppState};
use shared_types::{AppConfig, FeatureFlags, RefreshSettings, RegistrySettings};

/// A router together with the service behind it, so tests can reach the
/// store and the simulated registry directly.
pub struct TestApp {
    pub router: Router,
    pub service: Arc<DefaultService>,
}

/// Config for tests: calendar sync on, no registry latency, no retries and
/// no background refresh.
pub fn test_config(demo_data: bool) -> AppConfig {
    AppConfig {
        features: FeatureFlags {
            telemetry: false,
            calendar_sync: true,
            demo_data,
        },
        refresh: RefreshSettings {
            auto_refresh: false,
            ..Default::default()
        },
        registry: RegistrySettings {
            max_retries: 0,
            retry_backoff_ms: 0,
            simulated_latency_ms: 0,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn build(config: AppConfig) -> TestApp {
    let flags = config.features.clone();
    let service = Arc::new(build_service(config).expect("Failed to build service"));
    let router = server::openapi::app_router(AppState::new(service.clone()), &flags);
    TestApp { router, service }
}

/// App seeded with the four tracked demo cases.
pub fn test_app() -> TestApp {
    build(test_config(true))
}

/// App with an empty store. The registry still holds the demo records.
pub fn empty_app() -> TestApp {
    build(test_config(false))
}

/// A valid upsert body for `id`.
pub fn case_body(id: &str, status: &str, hearing: Option<&str>) -> Value {
    json!({
        "id": id,
        "case_number": format!("CRL {id}/2024"),
        "cnr_number": "TSHC010001002024",
        "case_type": "CRL",
        "petitioner": "State",
        "respondent": format!("Accused {id}"),
        "court_name": "Sessions Court",
        "status": status,
        "filing_date": "2024-01-05",
        "next_hearing_date": hearing,
        "history": [
            {
                "id": "h1",
                "date": "2024-01-05",
                "purpose": "Filing",
                "order": null,
                "next_purpose": "Admission"
            }
        ]
    })
}

/// Ids of the cases in a JSON array, in order.
pub fn ids(cases: &Value) -> Vec<String> {
    cases
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|c| c["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, req).await
}

/// POST with an empty body.
pub async fn post(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, req).await
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    with_json(app, "POST", uri, body).await
}

pub async fn put_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    with_json(app, "PUT", uri, body).await
}

pub async fn patch_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    with_json(app, "PATCH", uri, body).await
}

async fn with_json(app: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, req).await
}

/// Send a request through the router and parse the response.
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let value = serde_json::from_slice(&body_bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body_bytes).to_string()));

    (status, value)
}
