//! Guideline scorer: small integer points per factor following common
//! clinical cut-offs (ACC/AHA blood pressure stages, ADA fasting glucose).
//!
//! Tiers use fixed confidences rather than a distance-shaped curve, with a
//! bonus when any single factor is at its most severe level.

use super::bands::{classify, classify_pressure, Band, Cutoff, PressureBand};
use super::{
    apply_normal_floor, normalize, spread_residual, Bucket, Factor, FactorScore, ResidualSplits,
    ScoreCard, DEFAULT_NORMAL_CONFIDENCE_FLOOR,
};
use crate::classifier::{Classification, RiskClassifier};
use crate::error::CoreError;
use crate::tier::RiskTier;
use crate::vitals::VitalSigns;

/// Total at or above which the tier is "high".
pub const HIGH_RISK_TOTAL: u32 = 7;
/// Total at or above which the tier is "mid".
pub const MID_RISK_TOTAL: u32 = 4;

pub const HIGH_RISK_CONFIDENCE: f64 = 0.95;
pub const MID_RISK_CONFIDENCE: f64 = 0.85;
pub const LOW_RISK_CONFIDENCE: f64 = 0.80;

/// Single-factor points at or above which the severity bonus applies.
pub const SEVERE_FACTOR_POINTS: u32 = 3;
pub const SEVERE_FACTOR_BONUS: f64 = 0.1;
pub const MAX_CONFIDENCE: f64 = 0.98;

const AGE_BANDS: &[Band] = &[
    Band {
        cutoff: Cutoff::Below(18.0),
        bucket: Bucket::new(
            "Minor risk (very young)",
            1,
            Some("Enhanced nutritional support needed"),
        ),
    },
    Band {
        cutoff: Cutoff::Below(35.0),
        bucket: Bucket::new("Low risk (young adult)", 0, None),
    },
    Band {
        cutoff: Cutoff::Below(60.0),
        bucket: Bucket::new(
            "Moderate risk (older maternal age)",
            1,
            Some("Regular monitoring recommended"),
        ),
    },
];
const AGE_ELDERLY: Bucket = Bucket::new(
    "High risk (advanced age)",
    2,
    Some("Specialist consultation recommended"),
);

const BP_NORMAL: Bucket = Bucket::new("Normal blood pressure", 0, None);
const BP_BANDS: &[PressureBand] = &[
    PressureBand {
        systolic: 180.0,
        diastolic: 110.0,
        bucket: Bucket::new(
            "Critical hypertension",
            3,
            Some("Immediate medical attention required"),
        ),
    },
    PressureBand {
        systolic: 140.0,
        diastolic: 90.0,
        bucket: Bucket::new(
            "High blood pressure",
            2,
            Some("Blood pressure monitoring required"),
        ),
    },
    PressureBand {
        systolic: 120.0,
        diastolic: 80.0,
        bucket: Bucket::new(
            "Elevated blood pressure",
            1,
            Some("Recheck blood pressure at the next visit"),
        ),
    },
];

const SUGAR_NORMAL: Bucket = Bucket::new("Normal glucose", 0, None);
const SUGAR_BANDS: &[Band] = &[
    Band {
        cutoff: Cutoff::AtLeast(200.0),
        bucket: Bucket::new("Severe diabetes", 3, Some("Diabetic management required")),
    },
    Band {
        cutoff: Cutoff::AtLeast(126.0),
        bucket: Bucket::new("Diabetes", 2, Some("Diabetic management required")),
    },
    Band {
        cutoff: Cutoff::AtLeast(100.0),
        bucket: Bucket::new(
            "Pre-diabetes",
            1,
            Some("Screen for gestational diabetes"),
        ),
    },
];

const HEART_RATE_NORMAL: Bucket = Bucket::new("Normal heart rate", 0, None);
const HEART_RATE_ABNORMAL: Bucket = Bucket::new(
    "Abnormal heart rate",
    2,
    Some("Cardiac monitoring recommended"),
);
const HEART_RATE_BORDERLINE: Bucket = Bucket::new(
    "Borderline heart rate",
    1,
    Some("Recheck heart rate at rest"),
);
const HEART_RATE_BANDS: &[Band] = &[
    Band {
        cutoff: Cutoff::AtLeast(120.0),
        bucket: HEART_RATE_ABNORMAL,
    },
    Band {
        cutoff: Cutoff::AtMost(50.0),
        bucket: HEART_RATE_ABNORMAL,
    },
    Band {
        cutoff: Cutoff::AtLeast(100.0),
        bucket: HEART_RATE_BORDERLINE,
    },
    Band {
        cutoff: Cutoff::AtMost(60.0),
        bucket: HEART_RATE_BORDERLINE,
    },
];

const TEMP_NORMAL: Bucket = Bucket::new("Normal temperature", 0, None);
const TEMP_BANDS: &[Band] = &[
    Band {
        cutoff: Cutoff::AtLeast(38.5),
        bucket: Bucket::new("High fever", 2, Some("Evaluate for infection")),
    },
    Band {
        cutoff: Cutoff::AtLeast(37.5),
        bucket: Bucket::new("Mild fever", 1, Some("Evaluate for infection")),
    },
    Band {
        cutoff: Cutoff::AtMost(35.0),
        bucket: Bucket::new("Hypothermia", 2, Some("Warm patient and reassess")),
    },
];

/// Guideline point scorer.
#[derive(Debug, Clone)]
pub struct GuidelineScorer {
    residual_splits: ResidualSplits,
    normal_confidence_floor: f64,
}

impl Default for GuidelineScorer {
    fn default() -> Self {
        Self::new(ResidualSplits::default(), DEFAULT_NORMAL_CONFIDENCE_FLOOR)
    }
}

impl GuidelineScorer {
    pub const NAME: &'static str = "guideline";

    pub fn new(residual_splits: ResidualSplits, normal_confidence_floor: f64) -> Self {
        Self {
            residual_splits,
            normal_confidence_floor,
        }
    }

    pub fn score(&self, vitals: &VitalSigns) -> ScoreCard {
        ScoreCard {
            factors: vec![
                FactorScore::new(Factor::Age, classify(vitals.age, AGE_BANDS, AGE_ELDERLY)),
                FactorScore::new(
                    Factor::BloodPressure,
                    classify_pressure(vitals.systolic_bp, vitals.diastolic_bp, BP_BANDS, BP_NORMAL),
                ),
                FactorScore::new(
                    Factor::BloodSugar,
                    classify(vitals.blood_sugar, SUGAR_BANDS, SUGAR_NORMAL),
                ),
                FactorScore::new(
                    Factor::HeartRate,
                    classify(vitals.heart_rate, HEART_RATE_BANDS, HEART_RATE_NORMAL),
                ),
                FactorScore::new(
                    Factor::BodyTemperature,
                    classify(vitals.body_temp, TEMP_BANDS, TEMP_NORMAL),
                ),
            ],
        }
    }

    /// Tier and confidence for a score card, before the residual is spread.
    pub fn tier_and_confidence(card: &ScoreCard) -> (RiskTier, f64) {
        let total = card.total();
        let (tier, confidence) = if total >= HIGH_RISK_TOTAL {
            (RiskTier::High, HIGH_RISK_CONFIDENCE)
        } else if total >= MID_RISK_TOTAL {
            (RiskTier::Mid, MID_RISK_CONFIDENCE)
        } else {
            (RiskTier::Low, LOW_RISK_CONFIDENCE)
        };

        if card.max_points() >= SEVERE_FACTOR_POINTS {
            (tier, MAX_CONFIDENCE.min(confidence + SEVERE_FACTOR_BONUS))
        } else {
            (tier, confidence)
        }
    }
}

impl RiskClassifier for GuidelineScorer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn classify(&self, vitals: &VitalSigns) -> Result<Classification, CoreError> {
        let card = self.score(vitals);
        let (tier, confidence) = Self::tier_and_confidence(&card);
        let (tier, confidence) =
            apply_normal_floor(&card, tier, confidence, self.normal_confidence_floor);

        let probabilities = normalize(spread_residual(tier, confidence, &self.residual_splits))?;

        Ok(Classification {
            tier,
            probabilities: Some(probabilities),
            card,
        })
    }
}
