use iyacare_core::classifier::ClassifierKind;
use iyacare_core::scoring::{
    ScoringConfig, DEFAULT_HIGH_THRESHOLD, DEFAULT_MID_THRESHOLD, DEFAULT_NORMAL_CONFIDENCE_FLOOR,
};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum number of entries accepted by `/batch-predict` (default: `100`).
    pub max_batch_size: usize,
    /// Which classifier serves predictions (default: `weighted`).
    pub risk_model: ClassifierKind,
    /// Tier boundaries and confidence shaping for the scorers.
    pub scoring: ScoringConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                  |
    /// |-------------------------|--------------------------|
    /// | `HOST`                  | `0.0.0.0`                |
    /// | `PORT`                  | `8000`                   |
    /// | `CORS_ORIGINS`          | `http://localhost:3000`  |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                     |
    /// | `MAX_BATCH_SIZE`        | `100`                    |
    /// | `RISK_MODEL`            | `weighted`               |
    /// | `RISK_MID_THRESHOLD`    | `15`                     |
    /// | `RISK_HIGH_THRESHOLD`   | `40`                     |
    /// | `RISK_CONFIDENCE_FLOOR` | `0.75`                   |
    ///
    /// Panics on unparsable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let host = var("HOST", "0.0.0.0");

        let port: u16 = var("PORT", "8000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_batch_size: usize = var("MAX_BATCH_SIZE", "100")
            .parse()
            .expect("MAX_BATCH_SIZE must be a valid usize");

        let risk_model: ClassifierKind = var("RISK_MODEL", "weighted")
            .parse()
            .unwrap_or_else(|e| panic!("RISK_MODEL is invalid: {e}"));

        let mid_threshold: u32 = lookup("RISK_MID_THRESHOLD")
            .map(|v| v.parse().expect("RISK_MID_THRESHOLD must be a valid u32"))
            .unwrap_or(DEFAULT_MID_THRESHOLD);

        let high_threshold: u32 = lookup("RISK_HIGH_THRESHOLD")
            .map(|v| v.parse().expect("RISK_HIGH_THRESHOLD must be a valid u32"))
            .unwrap_or(DEFAULT_HIGH_THRESHOLD);

        let normal_confidence_floor: f64 = lookup("RISK_CONFIDENCE_FLOOR")
            .map(|v| v.parse().expect("RISK_CONFIDENCE_FLOOR must be a number"))
            .unwrap_or(DEFAULT_NORMAL_CONFIDENCE_FLOOR);

        let scoring = ScoringConfig {
            mid_threshold,
            high_threshold,
            normal_confidence_floor,
            ..ScoringConfig::default()
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_batch_size,
            risk_model,
            scoring,
        }
    }

    /// True when CORS should accept any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}
