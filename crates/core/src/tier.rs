//! Risk tiers and the probability distribution over them.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maternal health risk tier, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    #[serde(rename = "low risk")]
    Low,
    #[serde(rename = "mid risk", alias = "medium risk")]
    Mid,
    #[serde(rename = "high risk")]
    High,
}

impl RiskTier {
    /// All tiers in index order.
    pub const ALL: [RiskTier; 3] = [RiskTier::Low, RiskTier::Mid, RiskTier::High];

    /// Class index used by probability vectors (low = 0, mid = 1, high = 2).
    pub fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Mid => 1,
            Self::High => 2,
        }
    }

    pub fn from_index(index: usize) -> Result<Self, CoreError> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            CoreError::InvalidInput(format!("risk tier index {index} is out of range 0..=2"))
        })
    }

    /// Wire label, e.g. `"mid risk"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low risk",
            Self::Mid => "mid risk",
            Self::High => "high risk",
        }
    }

    /// Tier-level advice appended after the per-factor recommendations.
    pub fn recommendation(self) -> &'static str {
        match self {
            Self::Low => "Continue routine prenatal monitoring",
            Self::Mid => "Increase monitoring frequency and schedule a clinical review",
            Self::High => "Refer for immediate medical evaluation",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Probability assigned to each tier. Serialises as a map keyed by tier label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityDistribution {
    #[serde(rename = "low risk")]
    pub low: f64,
    #[serde(rename = "mid risk")]
    pub mid: f64,
    #[serde(rename = "high risk")]
    pub high: f64,
}

impl ProbabilityDistribution {
    pub fn from_array(p: [f64; 3]) -> Self {
        Self {
            low: p[0],
            mid: p[1],
            high: p[2],
        }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.low, self.mid, self.high]
    }

    pub fn get(&self, tier: RiskTier) -> f64 {
        match tier {
            RiskTier::Low => self.low,
            RiskTier::Mid => self.mid,
            RiskTier::High => self.high,
        }
    }

    pub fn sum(&self) -> f64 {
        self.low + self.mid + self.high
    }
}
