//! Handlers for the prediction endpoints.
//!
//! Both endpoints convert the request into canonical [`VitalSigns`]
//! (mg/dL, °C), reject implausible readings, and hand the vitals to the
//! classifier held in [`AppState`].

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use iyacare_core::assessment::{assess, RiskAssessment};
use iyacare_core::classifier::RiskClassifier;
use iyacare_core::error::CoreError;
use iyacare_core::units::{BloodSugarUnit, TemperatureUnit};
use iyacare_core::vitals::VitalSigns;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ── Request / response types ────────────────────────────────────────

/// Request body for `/predict` and each entry of `/batch-predict`.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionRequest {
    pub age: f64,
    pub systolic_bp: f64,
    pub diastolic_bp: f64,
    pub blood_sugar: f64,
    #[serde(default)]
    pub blood_sugar_unit: BloodSugarUnit,
    pub body_temp: f64,
    #[serde(default)]
    pub body_temp_unit: TemperatureUnit,
    pub heart_rate: f64,
}

impl PredictionRequest {
    /// Convert to canonical units and check physiological plausibility.
    pub fn into_vitals(self) -> Result<VitalSigns, CoreError> {
        let vitals = VitalSigns::from_units(
            self.age,
            self.systolic_bp,
            self.diastolic_bp,
            self.blood_sugar,
            self.blood_sugar_unit,
            self.body_temp,
            self.body_temp_unit,
            self.heart_rate,
        );
        vitals.validate_plausible()?;
        Ok(vitals)
    }
}

/// One slot of a batch response: an assessment or the reason it failed.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Assessment(Box<RiskAssessment>),
    Error { error: String },
}

/// Response body for `/batch-predict`.
#[derive(Debug, Serialize)]
pub struct BatchPredictionResponse {
    pub predictions: Vec<BatchEntry>,
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /predict
///
/// Score a single set of vital signs. Malformed JSON or missing fields
/// yield 400 `BAD_REQUEST`; out-of-range readings yield 400
/// `VALIDATION_ERROR`.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> AppResult<Json<RiskAssessment>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let vitals = request.into_vitals()?;
    let assessment = score(state.classifier.as_ref(), &vitals)?;
    Ok(Json(assessment))
}

/// POST /batch-predict
///
/// Score an array of requests. Each entry is decoded and validated on its
/// own, so one bad entry produces an `{ "error": ... }` slot while the
/// rest are still scored. Internal failures abort the whole batch.
pub async fn batch_predict(
    State(state): State<AppState>,
    payload: Result<Json<Vec<serde_json::Value>>, JsonRejection>,
) -> AppResult<Json<BatchPredictionResponse>> {
    let Json(items) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if items.is_empty() {
        return Err(AppError::BadRequest(
            "Batch must contain at least one entry".into(),
        ));
    }
    let max = state.config.max_batch_size;
    if items.len() > max {
        return Err(AppError::BadRequest(format!(
            "Batch size {} exceeds the maximum of {max}",
            items.len()
        )));
    }

    let mut predictions = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let vitals = serde_json::from_value::<PredictionRequest>(item)
            .map_err(|e| CoreError::InvalidInput(e.to_string()))
            .and_then(PredictionRequest::into_vitals);

        let entry = match vitals {
            Ok(vitals) => BatchEntry::Assessment(Box::new(score(
                state.classifier.as_ref(),
                &vitals,
            )?)),
            Err(CoreError::InvalidInput(msg)) => {
                tracing::debug!(index, error = %msg, "Rejected batch entry");
                BatchEntry::Error { error: msg }
            }
            Err(other) => return Err(other.into()),
        };
        predictions.push(entry);
    }

    tracing::info!(count = predictions.len(), "Batch prediction complete");
    Ok(Json(BatchPredictionResponse { predictions }))
}

fn score(classifier: &dyn RiskClassifier, vitals: &VitalSigns) -> Result<RiskAssessment, CoreError> {
    let assessment = assess(classifier, vitals)?;
    tracing::info!(
        tier = %assessment.predicted_risk,
        confidence = assessment.confidence,
        score = assessment.risk_score,
        model = assessment.model,
        "Risk assessed",
    );
    Ok(assessment)
}
