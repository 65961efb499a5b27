//! The six vital-sign readings a risk assessment is computed from.
//!
//! All values are held in canonical units: blood sugar in mg/dL and body
//! temperature in degrees Celsius. Use [`VitalSigns::from_units`] when the
//! reading arrives in another unit.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::units::{BloodSugarUnit, TemperatureUnit};

/// Feature names in the order produced by [`VitalSigns::to_feature_vector`].
pub const FEATURE_NAMES: [&str; 6] = [
    "age",
    "systolic_bp",
    "diastolic_bp",
    "blood_sugar",
    "body_temp",
    "heart_rate",
];

/// One set of maternal vital signs.
///
/// The `validate` ranges are the plausibility bounds the HTTP service
/// enforces. The scorers themselves accept any finite value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct VitalSigns {
    /// Age in years.
    #[validate(range(min = 0.0, max = 120.0, message = "Age must be between 0 and 120"))]
    pub age: f64,
    /// Systolic blood pressure in mmHg.
    #[validate(range(
        min = 50.0,
        max = 300.0,
        message = "Systolic BP must be between 50 and 300"
    ))]
    pub systolic_bp: f64,
    /// Diastolic blood pressure in mmHg.
    #[validate(range(
        min = 30.0,
        max = 200.0,
        message = "Diastolic BP must be between 30 and 200"
    ))]
    pub diastolic_bp: f64,
    /// Blood sugar in mg/dL.
    #[validate(range(
        min = 50.0,
        max = 500.0,
        message = "Blood sugar must be between 50 and 500 mg/dL"
    ))]
    pub blood_sugar: f64,
    /// Body temperature in degrees Celsius.
    #[validate(range(
        min = 30.0,
        max = 45.0,
        message = "Body temperature must be between 30 and 45 degrees Celsius"
    ))]
    pub body_temp: f64,
    /// Resting heart rate in beats per minute.
    #[validate(range(
        min = 20.0,
        max = 250.0,
        message = "Heart rate must be between 20 and 250 bpm"
    ))]
    pub heart_rate: f64,
}

impl VitalSigns {
    pub fn new(
        age: f64,
        systolic_bp: f64,
        diastolic_bp: f64,
        blood_sugar: f64,
        body_temp: f64,
        heart_rate: f64,
    ) -> Self {
        Self {
            age,
            systolic_bp,
            diastolic_bp,
            blood_sugar,
            body_temp,
            heart_rate,
        }
    }

    /// Build vital signs from readings in arbitrary units, converting blood
    /// sugar to mg/dL and temperature to Celsius.
    #[allow(clippy::too_many_arguments)]
    pub fn from_units(
        age: f64,
        systolic_bp: f64,
        diastolic_bp: f64,
        blood_sugar: f64,
        blood_sugar_unit: BloodSugarUnit,
        body_temp: f64,
        body_temp_unit: TemperatureUnit,
        heart_rate: f64,
    ) -> Self {
        Self::new(
            age,
            systolic_bp,
            diastolic_bp,
            blood_sugar_unit.to_mg_dl(blood_sugar),
            body_temp_unit.to_celsius(body_temp),
            heart_rate,
        )
    }

    /// Feature vector in [`FEATURE_NAMES`] order, as consumed by learned models.
    pub fn to_feature_vector(&self) -> [f64; 6] {
        [
            self.age,
            self.systolic_bp,
            self.diastolic_bp,
            self.blood_sugar,
            self.body_temp,
            self.heart_rate,
        ]
    }

    /// Reject NaN and infinite readings.
    pub fn ensure_finite(&self) -> Result<(), CoreError> {
        let bad: Vec<&str> = FEATURE_NAMES
            .iter()
            .zip(self.to_feature_vector())
            .filter(|(_, value)| !value.is_finite())
            .map(|(name, _)| *name)
            .collect();

        if bad.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidInput(format!(
                "non-numeric value for: {}",
                bad.join(", ")
            )))
        }
    }

    /// Check every reading against the plausibility ranges.
    ///
    /// Non-finite values are rejected first since range checks let NaN through.
    pub fn validate_plausible(&self) -> Result<(), CoreError> {
        self.ensure_finite()?;
        self.validate().map_err(|errors| {
            let mut messages: Vec<String> = errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errs)| {
                    let field = field.to_string();
                    errs.iter().map(move |e| match &e.message {
                        Some(msg) => msg.to_string(),
                        None => format!("{field} is out of range"),
                    })
                })
                .collect();
            messages.sort();
            CoreError::InvalidInput(messages.join("; "))
        })
    }
}
