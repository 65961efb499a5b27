//! Route definitions for the prediction endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::prediction;
use crate::state::AppState;

/// Prediction routes, mounted at the root.
///
/// ```text
/// POST   /predict         -> predict
/// POST   /batch-predict   -> batch_predict
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/predict", post(prediction::predict))
        .route("/batch-predict", post(prediction::batch_predict))
}
