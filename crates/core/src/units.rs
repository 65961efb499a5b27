//! Unit conversion for blood sugar and body temperature.
//!
//! The scorers work in mg/dL and degrees Celsius. Readings taken in other
//! units are converted here, at the boundary, before any threshold is
//! compared.

use serde::{Deserialize, Serialize};

/// Milligrams per decilitre in one millimole per litre of glucose.
pub const MG_DL_PER_MMOL_L: f64 = 18.0;

/// Unit a blood sugar reading was taken in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BloodSugarUnit {
    #[default]
    #[serde(alias = "mg/dL", alias = "mg/dl")]
    MgDl,
    #[serde(alias = "mmol/L", alias = "mmol/l")]
    MmolL,
}

/// Unit a body temperature reading was taken in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    #[default]
    #[serde(alias = "C", alias = "c")]
    Celsius,
    #[serde(alias = "F", alias = "f")]
    Fahrenheit,
}

pub fn mg_dl_to_mmol_l(mg_dl: f64) -> f64 {
    mg_dl / MG_DL_PER_MMOL_L
}

pub fn mmol_l_to_mg_dl(mmol_l: f64) -> f64 {
    mmol_l * MG_DL_PER_MMOL_L
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

impl BloodSugarUnit {
    /// Convert a reading in this unit to mg/dL.
    pub fn to_mg_dl(self, value: f64) -> f64 {
        match self {
            Self::MgDl => value,
            Self::MmolL => mmol_l_to_mg_dl(value),
        }
    }
}

impl TemperatureUnit {
    /// Convert a reading in this unit to degrees Celsius.
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            Self::Celsius => value,
            Self::Fahrenheit => fahrenheit_to_celsius(value),
        }
    }
}
