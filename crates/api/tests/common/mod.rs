#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use iyacare_core::classifier::ClassifierKind;
use iyacare_core::scoring::ScoringConfig;
use serde_json::{json, Value};
use tower::ServiceExt;

use iyacare_api::config::ServerConfig;
use iyacare_api::router::build_app_router;
use iyacare_api::state::AppState;

/// Origin allowed by [`test_config`].
pub const TEST_ORIGIN: &str = "http://localhost:3000";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses the weighted scorer with default thresholds and a small batch cap
/// so the limit is cheap to exceed.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![TEST_ORIGIN.to_string()],
        request_timeout_secs: 30,
        max_batch_size: 10,
        risk_model: ClassifierKind::Weighted,
        scoring: ScoringConfig::default(),
    }
}

/// Build the full application router from the given configuration.
///
/// Goes through [`build_app_router`] so integration tests exercise the
/// same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_app_with(config: ServerConfig) -> Router {
    let state = AppState::from_config(config.clone()).expect("test config must be valid");
    build_app_router(state, &config)
}

/// Build the default test application.
pub fn build_test_app() -> Router {
    build_app_with(test_config())
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a raw body and JSON content type.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Healthy reference patient: every factor in its normal band.
pub fn normal_vitals() -> Value {
    json!({
        "age": 28,
        "systolic_bp": 115,
        "diastolic_bp": 75,
        "blood_sugar": 90,
        "body_temp": 36.8,
        "heart_rate": 72
    })
}

/// Worst-case reference patient (risk score 75).
pub fn extreme_vitals() -> Value {
    json!({
        "age": 47,
        "systolic_bp": 190,
        "diastolic_bp": 125,
        "blood_sugar": 250,
        "body_temp": 39.0,
        "heart_rate": 125
    })
}

/// Assert the probability invariants every assessment must satisfy.
pub fn assert_well_formed(json: &Value) {
    let dist = &json["probability_distribution"];
    let probs: Vec<f64> = ["low risk", "mid risk", "high risk"]
        .iter()
        .map(|k| dist[*k].as_f64().expect("probability must be a number"))
        .collect();
    for p in &probs {
        assert!((0.0..=1.0).contains(p), "probability out of range: {p}");
    }
    let sum: f64 = probs.iter().sum();
    assert!((sum - 1.0).abs() < 1e-6, "probabilities sum to {sum}");

    let tier = json["predicted_risk"].as_str().expect("predicted_risk");
    let confidence = json["confidence"].as_f64().expect("confidence");
    assert_eq!(dist[tier].as_f64(), Some(confidence));
}
