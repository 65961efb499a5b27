//! Maternal health risk scoring domain.
//!
//! Pure logic only: unit conversion, vital-sign validation, the rule-based
//! scorers, the classifier capability trait and assessment assembly. The
//! HTTP service in `iyacare-api` is a thin layer over this crate.

pub mod assessment;
pub mod classifier;
pub mod error;
pub mod scoring;
pub mod tier;
pub mod units;
pub mod vitals;
