use std::sync::Arc;

use iyacare_core::classifier::RiskClassifier;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The classifier
/// is built once at startup and handed to every request through here.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Classifier serving `/predict` and `/batch-predict`.
    pub classifier: Arc<dyn RiskClassifier>,
}

impl AppState {
    /// Build state from configuration, constructing the configured classifier.
    pub fn from_config(config: ServerConfig) -> Result<Self, iyacare_core::error::CoreError> {
        let classifier = config.risk_model.build(config.scoring)?;
        Ok(Self {
            config: Arc::new(config),
            classifier,
        })
    }
}
