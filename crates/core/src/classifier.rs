//! Risk classifier capability.
//!
//! Defines [`RiskClassifier`], the contract every prediction strategy
//! implements, so the rule-based scorers and any learned model can be
//! swapped behind the same interface.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::CoreError;
use crate::scoring::{GuidelineScorer, ScoreCard, ScoringConfig, WeightedScorer};
use crate::tier::RiskTier;
use crate::vitals::VitalSigns;

/// Raw output of a classifier, before assessment assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Predicted tier.
    pub tier: RiskTier,
    /// Probability per tier in [`RiskTier::index`] order, if the classifier
    /// produces one.
    pub probabilities: Option<[f64; 3]>,
    /// Per-factor breakdown. Empty for classifiers that do not score factors.
    pub card: ScoreCard,
}

/// Trait implemented by every risk prediction strategy.
///
/// A learned model would read [`VitalSigns::to_feature_vector`], predict a
/// class index and optionally a probability vector over the three tiers.
pub trait RiskClassifier: Send + Sync {
    /// Short identifier reported alongside each assessment.
    fn name(&self) -> &'static str;

    /// Classify one set of vital signs. Inputs are finite and in canonical
    /// units (mg/dL, degrees Celsius).
    fn classify(&self, vitals: &VitalSigns) -> Result<Classification, CoreError>;
}

/// Built-in classifier selection, parsed from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierKind {
    #[default]
    Weighted,
    Guideline,
}

impl ClassifierKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weighted => WeightedScorer::NAME,
            Self::Guideline => GuidelineScorer::NAME,
        }
    }

    /// Build the classifier. `config` tunes the weighted scorer's tiers; the
    /// guideline scorer only takes its residual splits and confidence floor,
    /// so only those are validated for it.
    pub fn build(self, config: ScoringConfig) -> Result<Arc<dyn RiskClassifier>, CoreError> {
        Ok(match self {
            Self::Weighted => {
                config.validate()?;
                Arc::new(WeightedScorer::new(config))
            }
            Self::Guideline => {
                config.validate_probability_shaping()?;
                Arc::new(GuidelineScorer::new(
                    config.residual_splits,
                    config.normal_confidence_floor,
                ))
            }
        })
    }

    /// True when the tier thresholds in [`ScoringConfig`] take effect.
    pub fn uses_thresholds(self) -> bool {
        matches!(self, Self::Weighted)
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassifierKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weighted" | "rule_based" | "rules" => Ok(Self::Weighted),
            "guideline" | "medical" => Ok(Self::Guideline),
            other => Err(CoreError::Configuration(format!(
                "unknown risk model '{other}', expected 'weighted' or 'guideline'"
            ))),
        }
    }
}
