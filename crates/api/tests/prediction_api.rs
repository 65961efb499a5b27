//! HTTP-level integration tests for `/predict` and `/batch-predict`.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router.

mod common;

use axum::http::StatusCode;
use common::{
    assert_well_formed, body_json, build_app_with, build_test_app, extreme_vitals, normal_vitals,
    post_json, post_raw, test_config,
};
use iyacare_core::classifier::ClassifierKind;
use serde_json::{json, Value};

fn vitals_with(field: &str, value: Value) -> Value {
    let mut body = normal_vitals();
    body[field] = value;
    body
}

// ---------------------------------------------------------------------------
// Test: POST /predict with healthy vitals
// ---------------------------------------------------------------------------

#[tokio::test]
async fn predict_normal_vitals_is_low_risk() {
    let response = post_json(build_test_app(), "/predict", normal_vitals()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_well_formed(&json);
    assert_eq!(json["predicted_risk"], "low risk");
    assert!(json["confidence"].as_f64().unwrap() >= 0.75);
    assert_eq!(json["risk_score"], 0);
    assert_eq!(json["risk_factors"].as_array().unwrap().len(), 0);
    assert_eq!(json["model"], "weighted");

    let recommendations = json["recommendations"].as_array().unwrap();
    assert_eq!(
        recommendations.last().unwrap(),
        "Continue routine prenatal monitoring"
    );
}

// ---------------------------------------------------------------------------
// Test: POST /predict with the worst-case vitals
// ---------------------------------------------------------------------------

#[tokio::test]
async fn predict_extreme_vitals_is_high_risk_with_capped_confidence() {
    let response = post_json(build_test_app(), "/predict", extreme_vitals()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_well_formed(&json);
    assert_eq!(json["predicted_risk"], "high risk");
    assert_eq!(json["risk_score"], 75);

    let confidence = json["confidence"].as_f64().unwrap();
    assert!(confidence >= 0.95, "confidence {confidence}");
    assert!(confidence <= 0.95 + 1e-9, "confidence {confidence}");

    assert_eq!(json["risk_factors"].as_array().unwrap().len(), 5);
    assert_eq!(json["factors"].as_array().unwrap().len(), 5);
    assert_eq!(
        json["recommendations"].as_array().unwrap().last().unwrap(),
        "Refer for immediate medical evaluation"
    );
}

// ---------------------------------------------------------------------------
// Test: tier boundary is inclusive
// ---------------------------------------------------------------------------

#[tokio::test]
async fn predict_stage_two_pressure_reaches_mid_threshold() {
    // 140/89 scores 15 points, exactly the mid threshold.
    let mut body = normal_vitals();
    body["systolic_bp"] = json!(140);
    body["diastolic_bp"] = json!(89);

    let json = body_json(post_json(build_test_app(), "/predict", body).await).await;
    assert_well_formed(&json);
    assert_eq!(json["risk_score"], 15);
    assert_eq!(json["predicted_risk"], "mid risk");
}

#[tokio::test]
async fn predict_just_below_pressure_cutoff_stays_low() {
    // 139/89 is elevated (8 points) but below the mid threshold.
    let mut body = normal_vitals();
    body["systolic_bp"] = json!(139);
    body["diastolic_bp"] = json!(89);

    let json = body_json(post_json(build_test_app(), "/predict", body).await).await;
    assert_eq!(json["risk_score"], 8);
    assert_eq!(json["predicted_risk"], "low risk");
}

// ---------------------------------------------------------------------------
// Test: alternate units convert to the canonical ones
// ---------------------------------------------------------------------------

#[tokio::test]
async fn predict_accepts_mmol_and_fahrenheit() {
    let mut body = extreme_vitals();
    body["blood_sugar"] = json!(14.0); // 252 mg/dL
    body["blood_sugar_unit"] = json!("mmol/L");
    body["body_temp"] = json!(103.0); // ~39.4 °C
    body["body_temp_unit"] = json!("F");

    let response = post_json(build_test_app(), "/predict", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["risk_score"], 75);
    assert_eq!(json["predicted_risk"], "high risk");
}

#[tokio::test]
async fn predict_rejects_unknown_unit() {
    let body = vitals_with("blood_sugar_unit", json!("grains"));

    let response = post_json(build_test_app(), "/predict", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Test: invalid input is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn predict_out_of_range_age_returns_validation_error() {
    let response = post_json(build_test_app(), "/predict", vitals_with("age", json!(150))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Age must be between 0 and 120"));
}

#[tokio::test]
async fn predict_reports_every_implausible_field() {
    let mut body = normal_vitals();
    body["heart_rate"] = json!(400);
    body["systolic_bp"] = json!(10);

    let json = body_json(post_json(build_test_app(), "/predict", body).await).await;
    let error = json["error"].as_str().unwrap();
    assert!(error.contains("Heart rate"), "{error}");
    assert!(error.contains("Systolic BP"), "{error}");
}

#[tokio::test]
async fn predict_missing_field_returns_bad_request() {
    let mut body = normal_vitals();
    body.as_object_mut().unwrap().remove("heart_rate");

    let response = post_json(build_test_app(), "/predict", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("heart_rate"));
}

#[tokio::test]
async fn predict_non_numeric_field_returns_bad_request() {
    let response = post_json(
        build_test_app(),
        "/predict",
        vitals_with("blood_sugar", json!("high")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn predict_malformed_json_returns_bad_request() {
    let response = post_raw(build_test_app(), "/predict", "{\"age\": 30,").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Test: identical requests give identical answers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn predict_is_deterministic() {
    let body = vitals_with("blood_sugar", json!(185));

    let first = body_json(post_json(build_test_app(), "/predict", body.clone()).await).await;
    let second = body_json(post_json(build_test_app(), "/predict", body).await).await;

    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Test: guideline model
// ---------------------------------------------------------------------------

#[tokio::test]
async fn guideline_model_scores_extreme_vitals_as_high() {
    let mut config = test_config();
    config.risk_model = ClassifierKind::Guideline;

    let response = post_json(build_app_with(config), "/predict", extreme_vitals()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_well_formed(&json);
    assert_eq!(json["model"], "guideline");
    assert_eq!(json["predicted_risk"], "high risk");
    assert_eq!(json["risk_score"], 11);
    assert!((json["confidence"].as_f64().unwrap() - 0.98).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// Test: POST /batch-predict
// ---------------------------------------------------------------------------

#[tokio::test]
async fn batch_predict_scores_each_entry_and_isolates_failures() {
    let body = json!([
        normal_vitals(),
        extreme_vitals(),
        vitals_with("age", json!(150)),
        vitals_with("heart_rate", json!("fast")),
    ]);

    let response = post_json(build_test_app(), "/batch-predict", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let predictions = json["predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 4);

    assert_well_formed(&predictions[0]);
    assert_eq!(predictions[0]["predicted_risk"], "low risk");
    assert_eq!(predictions[1]["predicted_risk"], "high risk");

    assert!(predictions[2]["error"]
        .as_str()
        .unwrap()
        .contains("Age must be between 0 and 120"));
    assert!(predictions[2].get("predicted_risk").is_none());
    assert!(predictions[3]["error"].is_string());
}

#[tokio::test]
async fn batch_predict_matches_single_predictions() {
    let single = body_json(post_json(build_test_app(), "/predict", extreme_vitals()).await).await;
    let batch = body_json(
        post_json(build_test_app(), "/batch-predict", json!([extreme_vitals()])).await,
    )
    .await;

    assert_eq!(batch["predictions"][0], single);
}

#[tokio::test]
async fn batch_predict_rejects_empty_batch() {
    let response = post_json(build_test_app(), "/batch-predict", json!([])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn batch_predict_rejects_oversized_batch() {
    let max = test_config().max_batch_size;
    let body = Value::Array(vec![normal_vitals(); max + 1]);

    let response = post_json(build_test_app(), "/batch-predict", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("exceeds the maximum"));
}

#[tokio::test]
async fn batch_predict_accepts_batch_at_the_limit() {
    let max = test_config().max_batch_size;
    let body = Value::Array(vec![normal_vitals(); max]);

    let response = post_json(build_test_app(), "/batch-predict", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["predictions"]
            .as_array()
            .unwrap()
            .len(),
        max
    );
}

#[tokio::test]
async fn batch_predict_rejects_non_array_body() {
    let response = post_json(build_test_app(), "/batch-predict", normal_vitals()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
