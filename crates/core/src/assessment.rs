//! Assembly of a [`RiskAssessment`] from a classifier's output.
//!
//! Whatever classifier is plugged in, the assessment always carries all
//! three tiers, sums to 1 and reports the predicted tier's probability as
//! its confidence.

use serde::Serialize;

use crate::classifier::RiskClassifier;
use crate::error::CoreError;
use crate::scoring::{normalize, FactorScore};
use crate::tier::{ProbabilityDistribution, RiskTier};
use crate::vitals::VitalSigns;

/// Decimal places probabilities are reported with.
pub const PROBABILITY_DECIMALS: i32 = 4;

/// Result of scoring one set of vital signs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub predicted_risk: RiskTier,
    /// Equals `probability_distribution[predicted_risk]`.
    pub confidence: f64,
    pub probability_distribution: ProbabilityDistribution,
    /// Total points from the classifier's score card (0 if it has none).
    pub risk_score: u32,
    /// Labels of the factors that contributed points.
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    /// Per-factor breakdown.
    pub factors: Vec<FactorScore>,
    /// Name of the classifier that produced the assessment.
    pub model: &'static str,
}

/// Score `vitals` with `classifier` and build the full assessment.
///
/// Non-finite readings are rejected before the classifier runs.
pub fn assess(
    classifier: &dyn RiskClassifier,
    vitals: &VitalSigns,
) -> Result<RiskAssessment, CoreError> {
    vitals.ensure_finite()?;

    let classification = classifier.classify(vitals)?;
    let tier = classification.tier;

    let probabilities = match classification.probabilities {
        Some(p) => {
            check_probability_vector(&p)?;
            normalize(p)?
        }
        None => certain(tier),
    };

    let distribution = round_preserving_sum(probabilities);
    let confidence = distribution.get(tier);

    let card = classification.card;
    let risk_factors = card
        .contributing()
        .map(|f| f.label.to_string())
        .collect();

    let mut recommendations: Vec<String> = Vec::new();
    for advice in card
        .contributing()
        .filter_map(|f| f.recommendation)
        .chain(std::iter::once(tier.recommendation()))
    {
        if !recommendations.iter().any(|r| r == advice) {
            recommendations.push(advice.to_string());
        }
    }

    Ok(RiskAssessment {
        predicted_risk: tier,
        confidence,
        probability_distribution: distribution,
        risk_score: card.total(),
        risk_factors,
        recommendations,
        factors: card.factors,
        model: classifier.name(),
    })
}

/// All probability mass on `tier`, for classifiers without a probability output.
fn certain(tier: RiskTier) -> [f64; 3] {
    let mut p = [0.0; 3];
    p[tier.index()] = 1.0;
    p
}

fn check_probability_vector(p: &[f64; 3]) -> Result<(), CoreError> {
    if p.iter().any(|x| !x.is_finite() || *x < 0.0) {
        return Err(CoreError::InternalComputation(format!(
            "classifier returned an invalid probability vector {p:?}"
        )));
    }
    Ok(())
}

fn round_to_precision(value: f64) -> f64 {
    let scale = 10f64.powi(PROBABILITY_DECIMALS);
    (value * scale).round() / scale
}

/// Round every probability, then let the most likely tier absorb the
/// rounding residue so the reported values still sum to 1.
fn round_preserving_sum(probabilities: [f64; 3]) -> ProbabilityDistribution {
    let mut rounded = probabilities.map(round_to_precision);

    let largest = RiskTier::ALL
        .into_iter()
        .reduce(|best, t| {
            if probabilities[t.index()] > probabilities[best.index()] {
                t
            } else {
                best
            }
        })
        .unwrap_or(RiskTier::Low);

    let others: f64 = RiskTier::ALL
        .into_iter()
        .filter(|t| *t != largest)
        .map(|t| rounded[t.index()])
        .sum();
    rounded[largest.index()] = round_to_precision(1.0 - others);

    ProbabilityDistribution::from_array(rounded)
}
