//! Ordered threshold tables used to bucket a single reading.
//!
//! Bands are checked top to bottom and the first match wins, so tables list
//! the most severe band first. `AtLeast` and `AtMost` are inclusive of the
//! cutoff; `Below` is exclusive.

use super::Bucket;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cutoff {
    /// `value >= cutoff`
    AtLeast(f64),
    /// `value <= cutoff`
    AtMost(f64),
    /// `value < cutoff`
    Below(f64),
}

impl Cutoff {
    pub fn matches(self, value: f64) -> bool {
        match self {
            Self::AtLeast(c) => value >= c,
            Self::AtMost(c) => value <= c,
            Self::Below(c) => value < c,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Band {
    pub cutoff: Cutoff,
    pub bucket: Bucket,
}

/// Blood-pressure band: matches when either reading reaches its cutoff.
#[derive(Debug, Clone, Copy)]
pub struct PressureBand {
    pub systolic: f64,
    pub diastolic: f64,
    pub bucket: Bucket,
}

/// First band matching `value`, or `normal` when none do.
pub fn classify(value: f64, bands: &[Band], normal: Bucket) -> Bucket {
    bands
        .iter()
        .find(|band| band.cutoff.matches(value))
        .map_or(normal, |band| band.bucket)
}

/// First pressure band where `systolic >= band.systolic || diastolic >= band.diastolic`.
pub fn classify_pressure(
    systolic: f64,
    diastolic: f64,
    bands: &[PressureBand],
    normal: Bucket,
) -> Bucket {
    bands
        .iter()
        .find(|band| systolic >= band.systolic || diastolic >= band.diastolic)
        .map_or(normal, |band| band.bucket)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NORMAL: Bucket = Bucket::new("normal", 0, None);
    const BANDS: &[Band] = &[
        Band {
            cutoff: Cutoff::AtLeast(100.0),
            bucket: Bucket::new("high", 2, None),
        },
        Band {
            cutoff: Cutoff::AtMost(10.0),
            bucket: Bucket::new("low", 1, None),
        },
    ];

    #[test]
    fn at_least_is_inclusive() {
        assert!(Cutoff::AtLeast(5.0).matches(5.0));
        assert!(!Cutoff::AtLeast(5.0).matches(4.999));
    }

    #[test]
    fn at_most_is_inclusive() {
        assert!(Cutoff::AtMost(5.0).matches(5.0));
        assert!(!Cutoff::AtMost(5.0).matches(5.001));
    }

    #[test]
    fn below_is_exclusive() {
        assert!(Cutoff::Below(18.0).matches(17.9));
        assert!(!Cutoff::Below(18.0).matches(18.0));
    }

    #[test]
    fn first_matching_band_wins() {
        assert_eq!(classify(150.0, BANDS, NORMAL).label, "high");
        assert_eq!(classify(10.0, BANDS, NORMAL).label, "low");
        assert_eq!(classify(50.0, BANDS, NORMAL), NORMAL);
    }

    #[test]
    fn pressure_band_matches_on_either_reading() {
        let bands = [PressureBand {
            systolic: 140.0,
            diastolic: 90.0,
            bucket: Bucket::new("hypertension", 15, None),
        }];
        assert_eq!(classify_pressure(140.0, 70.0, &bands, NORMAL).points, 15);
        assert_eq!(classify_pressure(120.0, 90.0, &bands, NORMAL).points, 15);
        assert_eq!(classify_pressure(139.0, 89.0, &bands, NORMAL), NORMAL);
    }
}
