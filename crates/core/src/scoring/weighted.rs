//! Weighted rule-based scorer.
//!
//! Each factor contributes up to a fixed number of points (age 30, blood
//! pressure 25, blood sugar 20, heart rate 15, body temperature 10, for a
//! maximum of 100). The total picks the tier; the distance from the tier
//! boundary shapes the confidence.
//!
//! Units: blood sugar in mg/dL, body temperature in degrees Celsius.

use super::bands::{classify, classify_pressure, Band, Cutoff, PressureBand};
use super::{
    apply_normal_floor, normalize, spread_residual, Bucket, Factor, FactorScore, ScoreCard,
    ScoringConfig,
};
use crate::classifier::{Classification, RiskClassifier};
use crate::error::CoreError;
use crate::tier::RiskTier;
use crate::vitals::VitalSigns;

// ---------------------------------------------------------------------------
// Point tables
// ---------------------------------------------------------------------------

const AGE_NORMAL: Bucket = Bucket::new("Age within typical range", 0, None);
const AGE_BANDS: &[Band] = &[
    Band {
        cutoff: Cutoff::AtLeast(75.0),
        bucket: Bucket::new(
            "Very advanced age (75+)",
            30,
            Some("Specialist consultation recommended"),
        ),
    },
    Band {
        cutoff: Cutoff::AtLeast(65.0),
        bucket: Bucket::new(
            "Very advanced age (65+)",
            20,
            Some("Specialist consultation recommended"),
        ),
    },
    Band {
        cutoff: Cutoff::AtLeast(50.0),
        bucket: Bucket::new(
            "Advanced age (50+)",
            10,
            Some("Specialist consultation recommended"),
        ),
    },
    Band {
        cutoff: Cutoff::AtLeast(35.0),
        bucket: Bucket::new(
            "Advanced maternal age (35+)",
            5,
            Some("Regular monitoring recommended"),
        ),
    },
    Band {
        cutoff: Cutoff::Below(18.0),
        bucket: Bucket::new(
            "Young maternal age (<18)",
            5,
            Some("Enhanced nutritional support needed"),
        ),
    },
];

const BP_NORMAL: Bucket = Bucket::new("Normal blood pressure", 0, None);
const BP_HYPERTENSION_BANDS: &[PressureBand] = &[
    PressureBand {
        systolic: 180.0,
        diastolic: 110.0,
        bucket: Bucket::new(
            "Hypertensive crisis",
            25,
            Some("Immediate medical attention required"),
        ),
    },
    PressureBand {
        systolic: 160.0,
        diastolic: 100.0,
        bucket: Bucket::new(
            "Severe hypertension",
            20,
            Some("Urgent blood pressure management required"),
        ),
    },
    PressureBand {
        systolic: 140.0,
        diastolic: 90.0,
        bucket: Bucket::new(
            "High blood pressure",
            15,
            Some("Blood pressure monitoring required"),
        ),
    },
    PressureBand {
        systolic: 130.0,
        diastolic: 80.0,
        bucket: Bucket::new(
            "Elevated blood pressure",
            8,
            Some("Recheck blood pressure at the next visit"),
        ),
    },
];
// Keyed on diastolic only so the score never drops as systolic rises.
const BP_HYPOTENSION_BANDS: &[Band] = &[Band {
    cutoff: Cutoff::AtMost(60.0),
    bucket: Bucket::new(
        "Low blood pressure (hypotension)",
        10,
        Some("Assess hydration and check for bleeding"),
    ),
}];

const SUGAR_NORMAL: Bucket = Bucket::new("Normal blood sugar", 0, None);
const SUGAR_BANDS: &[Band] = &[
    Band {
        cutoff: Cutoff::AtLeast(250.0),
        bucket: Bucket::new(
            "Severe hyperglycemia",
            20,
            Some("Diabetic management required"),
        ),
    },
    Band {
        cutoff: Cutoff::AtLeast(180.0),
        bucket: Bucket::new(
            "High blood sugar",
            15,
            Some("Diabetic management required"),
        ),
    },
    Band {
        cutoff: Cutoff::AtLeast(140.0),
        bucket: Bucket::new(
            "Elevated blood sugar",
            10,
            Some("Blood glucose monitoring required"),
        ),
    },
    Band {
        cutoff: Cutoff::AtLeast(100.0),
        bucket: Bucket::new(
            "Borderline blood sugar",
            5,
            Some("Screen for gestational diabetes"),
        ),
    },
    Band {
        cutoff: Cutoff::AtMost(70.0),
        bucket: Bucket::new(
            "Low blood sugar (hypoglycemia)",
            8,
            Some("Review nutrition and meal timing"),
        ),
    },
];

const HEART_RATE_NORMAL: Bucket = Bucket::new("Normal heart rate", 0, None);
const HEART_RATE_BANDS: &[Band] = &[
    Band {
        cutoff: Cutoff::AtLeast(120.0),
        bucket: Bucket::new("Tachycardia", 15, Some("Cardiac monitoring recommended")),
    },
    Band {
        cutoff: Cutoff::AtLeast(100.0),
        bucket: Bucket::new(
            "Elevated heart rate",
            10,
            Some("Cardiac monitoring recommended"),
        ),
    },
    Band {
        cutoff: Cutoff::AtMost(50.0),
        bucket: Bucket::new("Bradycardia", 12, Some("Cardiac monitoring recommended")),
    },
    Band {
        cutoff: Cutoff::AtMost(60.0),
        bucket: Bucket::new(
            "Low heart rate",
            5,
            Some("Recheck heart rate at rest"),
        ),
    },
];

const TEMP_NORMAL: Bucket = Bucket::new("Normal body temperature", 0, None);
const TEMP_BANDS: &[Band] = &[
    Band {
        cutoff: Cutoff::AtLeast(39.0),
        bucket: Bucket::new("High fever", 10, Some("Evaluate for infection")),
    },
    Band {
        cutoff: Cutoff::AtLeast(37.5),
        bucket: Bucket::new("Fever", 6, Some("Evaluate for infection")),
    },
    Band {
        cutoff: Cutoff::AtMost(35.0),
        bucket: Bucket::new("Hypothermia", 8, Some("Warm patient and reassess")),
    },
    Band {
        cutoff: Cutoff::AtMost(36.0),
        bucket: Bucket::new(
            "Low body temperature",
            3,
            Some("Recheck temperature"),
        ),
    },
];

pub fn age_bucket(age: f64) -> Bucket {
    classify(age, AGE_BANDS, AGE_NORMAL)
}

/// Larger of the hypertension and hypotension buckets; hypertension wins ties.
pub fn blood_pressure_bucket(systolic: f64, diastolic: f64) -> Bucket {
    let high = classify_pressure(systolic, diastolic, BP_HYPERTENSION_BANDS, BP_NORMAL);
    let low = classify(diastolic, BP_HYPOTENSION_BANDS, BP_NORMAL);
    if low.points > high.points {
        low
    } else {
        high
    }
}

pub fn blood_sugar_bucket(mg_dl: f64) -> Bucket {
    classify(mg_dl, SUGAR_BANDS, SUGAR_NORMAL)
}

pub fn heart_rate_bucket(bpm: f64) -> Bucket {
    classify(bpm, HEART_RATE_BANDS, HEART_RATE_NORMAL)
}

pub fn body_temp_bucket(celsius: f64) -> Bucket {
    classify(celsius, TEMP_BANDS, TEMP_NORMAL)
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

/// Weighted point scorer with configurable tier boundaries and confidence
/// shaping.
#[derive(Debug, Clone, Default)]
pub struct WeightedScorer {
    config: ScoringConfig,
}

impl WeightedScorer {
    pub const NAME: &'static str = "weighted";

    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Bucket every factor.
    pub fn score(&self, vitals: &VitalSigns) -> ScoreCard {
        ScoreCard {
            factors: vec![
                FactorScore::new(Factor::Age, age_bucket(vitals.age)),
                FactorScore::new(
                    Factor::BloodPressure,
                    blood_pressure_bucket(vitals.systolic_bp, vitals.diastolic_bp),
                ),
                FactorScore::new(Factor::BloodSugar, blood_sugar_bucket(vitals.blood_sugar)),
                FactorScore::new(Factor::HeartRate, heart_rate_bucket(vitals.heart_rate)),
                FactorScore::new(Factor::BodyTemperature, body_temp_bucket(vitals.body_temp)),
            ],
        }
    }

    pub fn tier_for_score(&self, score: u32) -> RiskTier {
        if score >= self.config.high_threshold {
            RiskTier::High
        } else if score >= self.config.mid_threshold {
            RiskTier::Mid
        } else {
            RiskTier::Low
        }
    }

    /// Confidence for `tier` before the residual is spread.
    pub fn base_confidence(&self, tier: RiskTier, score: u32) -> f64 {
        let score = f64::from(score);
        let mid = f64::from(self.config.mid_threshold);
        let high = f64::from(self.config.high_threshold);
        match tier {
            RiskTier::Low => self.config.low_confidence.at(mid - score),
            RiskTier::Mid => self.config.mid_confidence.at(score - mid),
            RiskTier::High => self.config.high_confidence.at(score - high),
        }
    }
}

impl RiskClassifier for WeightedScorer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn classify(&self, vitals: &VitalSigns) -> Result<Classification, CoreError> {
        let card = self.score(vitals);
        let total = card.total();
        let tier = self.tier_for_score(total);
        let confidence = self.base_confidence(tier, total);

        let (tier, confidence) =
            apply_normal_floor(&card, tier, confidence, self.config.normal_confidence_floor);

        let probabilities = normalize(spread_residual(
            tier,
            confidence,
            &self.config.residual_splits,
        ))?;

        Ok(Classification {
            tier,
            probabilities: Some(probabilities),
            card,
        })
    }
}
