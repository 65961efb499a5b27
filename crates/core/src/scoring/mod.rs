//! Rule-based risk scoring: shared types, tunable configuration and the
//! confidence / probability shaping used by every hand-written scorer.
//!
//! Each vital sign is bucketed into a severity band worth a fixed number of
//! points. The points are summed into a [`ScoreCard`], the total is mapped
//! to a [`RiskTier`], and a confidence for that tier is spread into a full
//! probability distribution via [`spread_residual`] and [`normalize`].

pub mod bands;
pub mod guideline;
pub mod weighted;

use serde::Serialize;

use crate::error::CoreError;
use crate::tier::RiskTier;

pub use guideline::GuidelineScorer;
pub use weighted::WeightedScorer;

// ---------------------------------------------------------------------------
// Factor breakdown
// ---------------------------------------------------------------------------

/// The vital-sign factor a bucket was assigned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Age,
    BloodPressure,
    BloodSugar,
    HeartRate,
    BodyTemperature,
}

/// A severity bucket: its display label, point value and optional advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub label: &'static str,
    pub points: u32,
    pub recommendation: Option<&'static str>,
}

impl Bucket {
    pub const fn new(label: &'static str, points: u32, recommendation: Option<&'static str>) -> Self {
        Self {
            label,
            points,
            recommendation,
        }
    }
}

/// The bucket one factor landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FactorScore {
    pub factor: Factor,
    pub label: &'static str,
    pub points: u32,
    #[serde(skip)]
    pub recommendation: Option<&'static str>,
}

impl FactorScore {
    pub fn new(factor: Factor, bucket: Bucket) -> Self {
        Self {
            factor,
            label: bucket.label,
            points: bucket.points,
            recommendation: bucket.recommendation,
        }
    }
}

/// Per-factor points for one set of vital signs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreCard {
    pub factors: Vec<FactorScore>,
}

impl ScoreCard {
    pub fn total(&self) -> u32 {
        self.factors.iter().map(|f| f.points).sum()
    }

    /// Largest single-factor contribution (0 for an empty card).
    pub fn max_points(&self) -> u32 {
        self.factors.iter().map(|f| f.points).max().unwrap_or(0)
    }

    /// True when no factor contributed any points.
    pub fn all_normal(&self) -> bool {
        self.factors.iter().all(|f| f.points == 0)
    }

    pub fn points_for(&self, factor: Factor) -> u32 {
        self.factors
            .iter()
            .filter(|f| f.factor == factor)
            .map(|f| f.points)
            .sum()
    }

    /// Factors that contributed points, in scoring order.
    pub fn contributing(&self) -> impl Iterator<Item = &FactorScore> {
        self.factors.iter().filter(|f| f.points > 0)
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Linear confidence shape for one tier: `min(cap, base + slope * distance)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierConfidence {
    pub base: f64,
    pub slope: f64,
    pub cap: f64,
}

impl TierConfidence {
    pub fn at(&self, distance: f64) -> f64 {
        (self.base + self.slope * distance).min(self.cap)
    }
}

/// How the residual `1 - confidence` is shared between the non-chosen
/// tiers. Each array is indexed by [`RiskTier::index`]; the chosen tier's
/// own slot must be zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidualSplits {
    pub low: [f64; 3],
    pub mid: [f64; 3],
    pub high: [f64; 3],
}

impl ResidualSplits {
    pub fn for_tier(&self, tier: RiskTier) -> [f64; 3] {
        match tier {
            RiskTier::Low => self.low,
            RiskTier::Mid => self.mid,
            RiskTier::High => self.high,
        }
    }
}

impl Default for ResidualSplits {
    fn default() -> Self {
        Self {
            low: [0.0, 0.7, 0.3],
            mid: [0.6, 0.0, 0.4],
            high: [0.4, 0.6, 0.0],
        }
    }
}

/// Default score at or above which the tier is at least "mid".
pub const DEFAULT_MID_THRESHOLD: u32 = 15;
/// Default score at or above which the tier is "high".
pub const DEFAULT_HIGH_THRESHOLD: u32 = 40;
/// Default minimum confidence when every vital sign is normal.
pub const DEFAULT_NORMAL_CONFIDENCE_FLOOR: f64 = 0.75;

/// Tunable constants of the weighted scorer. The point tables are domain
/// constants; tier boundaries and confidence shaping live here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    pub mid_threshold: u32,
    pub high_threshold: u32,
    /// Distance for low is measured below `mid_threshold`.
    pub low_confidence: TierConfidence,
    /// Distance for mid is measured above `mid_threshold`.
    pub mid_confidence: TierConfidence,
    /// Distance for high is measured above `high_threshold`.
    pub high_confidence: TierConfidence,
    pub residual_splits: ResidualSplits,
    pub normal_confidence_floor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mid_threshold: DEFAULT_MID_THRESHOLD,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            low_confidence: TierConfidence {
                base: 0.70,
                slope: 0.015,
                cap: 0.95,
            },
            mid_confidence: TierConfidence {
                base: 0.60,
                slope: 0.008,
                cap: 0.85,
            },
            high_confidence: TierConfidence {
                base: 0.65,
                slope: 0.01,
                cap: 0.95,
            },
            residual_splits: ResidualSplits::default(),
            normal_confidence_floor: DEFAULT_NORMAL_CONFIDENCE_FLOOR,
        }
    }
}

impl ScoringConfig {
    /// Check the configuration is internally consistent.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.validate_thresholds()?;
        self.validate_probability_shaping()
    }

    /// Tier boundaries and per-tier confidence curves. Only the weighted
    /// scorer reads these.
    pub fn validate_thresholds(&self) -> Result<(), CoreError> {
        if self.mid_threshold == 0 {
            return Err(CoreError::Configuration(
                "mid threshold must be at least 1".into(),
            ));
        }
        if self.mid_threshold >= self.high_threshold {
            return Err(CoreError::Configuration(format!(
                "mid threshold ({}) must be below high threshold ({})",
                self.mid_threshold, self.high_threshold
            )));
        }

        for (name, shape) in [
            ("low", &self.low_confidence),
            ("mid", &self.mid_confidence),
            ("high", &self.high_confidence),
        ] {
            validate_probability(shape.base, &format!("{name} confidence base"))?;
            validate_probability(shape.cap, &format!("{name} confidence cap"))?;
            if !shape.slope.is_finite() || shape.slope < 0.0 {
                return Err(CoreError::Configuration(format!(
                    "{name} confidence slope must be a non-negative number, got {}",
                    shape.slope
                )));
            }
        }

        Ok(())
    }

    /// Normal-patient floor and residual splits, shared by every scorer.
    pub fn validate_probability_shaping(&self) -> Result<(), CoreError> {
        validate_probability(self.normal_confidence_floor, "normal confidence floor")?;

        for tier in RiskTier::ALL {
            let weights = self.residual_splits.for_tier(tier);
            if weights[tier.index()] != 0.0 {
                return Err(CoreError::Configuration(format!(
                    "residual split for {tier} must not assign weight to {tier} itself"
                )));
            }
            if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
                return Err(CoreError::Configuration(format!(
                    "residual split for {tier} has a negative or non-numeric weight"
                )));
            }
            let total: f64 = weights.iter().sum();
            if (total - 1.0).abs() > 1e-9 {
                return Err(CoreError::Configuration(format!(
                    "residual split for {tier} must sum to 1.0, got {total}"
                )));
            }
        }

        Ok(())
    }
}

fn validate_probability(value: f64, name: &str) -> Result<(), CoreError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(CoreError::Configuration(format!(
            "{name} must be between 0.0 and 1.0, got {value}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Probability shaping
// ---------------------------------------------------------------------------

/// Give `confidence` to `tier` and share the rest according to `splits`.
pub fn spread_residual(tier: RiskTier, confidence: f64, splits: &ResidualSplits) -> [f64; 3] {
    let residual = 1.0 - confidence;
    let weights = splits.for_tier(tier);

    let mut probabilities = [0.0; 3];
    for t in RiskTier::ALL {
        probabilities[t.index()] = if t == tier {
            confidence
        } else {
            residual * weights[t.index()]
        };
    }
    probabilities
}

/// Divide each probability by the total so the vector sums to 1.
///
/// A non-finite or non-positive total is a defect in the caller, reported
/// as [`CoreError::InternalComputation`] rather than masked.
pub fn normalize(probabilities: [f64; 3]) -> Result<[f64; 3], CoreError> {
    let total: f64 = probabilities.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(CoreError::InternalComputation(format!(
            "cannot normalise probabilities {probabilities:?} (sum = {total})"
        )));
    }
    Ok(probabilities.map(|p| p / total))
}

/// Apply the all-normal policy: no contributing factor forces the low tier
/// with at least `floor` confidence.
pub fn apply_normal_floor(
    card: &ScoreCard,
    tier: RiskTier,
    confidence: f64,
    floor: f64,
) -> (RiskTier, f64) {
    if card.all_normal() {
        (RiskTier::Low, confidence.max(floor))
    } else {
        (tier, confidence)
    }
}
