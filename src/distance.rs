//! Database distance units and the conversion from decimal literals.

use std::fmt;

use anyhow::{Result, bail};

/// A distance in database units (DBU).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distance(pub i32);

impl Distance {
    pub fn dbu(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps a raw decimal literal (in microns) to a [`Distance`].
pub trait DistanceConverter {
    fn to_distance(&self, value: f64) -> Distance;
}

impl<F> DistanceConverter for F
where
    F: Fn(f64) -> Distance,
{
    fn to_distance(&self, value: f64) -> Distance {
        self(value)
    }
}

/// Fixed database resolution: `dbu_per_micron` units per micron.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DbuScale {
    dbu_per_micron: f64,
}

pub const DEFAULT_DBU_PER_MICRON: f64 = 1000.0;

impl Default for DbuScale {
    fn default() -> Self {
        Self {
            dbu_per_micron: DEFAULT_DBU_PER_MICRON,
        }
    }
}

impl DbuScale {
    pub fn new(dbu_per_micron: f64) -> Result<Self> {
        if !dbu_per_micron.is_finite() || dbu_per_micron <= 0.0 {
            bail!("Invalid database resolution: {dbu_per_micron} units per micron.");
        }
        Ok(Self { dbu_per_micron })
    }

    pub fn dbu_per_micron(&self) -> f64 {
        self.dbu_per_micron
    }

    /// Inverse of [`DistanceConverter::to_distance`], up to rounding.
    pub fn to_microns(&self, distance: Distance) -> f64 {
        f64::from(distance.0) / self.dbu_per_micron
    }
}

impl DistanceConverter for DbuScale {
    /// Rounds half away from zero, saturating at the `i32` range.
    fn to_distance(&self, value: f64) -> Distance {
        Distance((value * self.dbu_per_micron).round() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale_rounds_to_nearest() {
        let scale = DbuScale::default();
        assert_eq!(scale.to_distance(0.1), Distance(100));
        assert_eq!(scale.to_distance(0.0005), Distance(1));
        assert_eq!(scale.to_distance(-0.0005), Distance(-1));
        assert_eq!(scale.to_distance(1.2344), Distance(1234));
    }

    #[test]
    fn test_custom_scale() {
        let scale = DbuScale::new(2000.0).unwrap();
        assert_eq!(scale.to_distance(0.07), Distance(140));
        assert_eq!(scale.to_microns(Distance(140)), 0.07);
    }

    #[test]
    fn test_invalid_scale_rejected() {
        assert!(DbuScale::new(0.0).is_err());
        assert!(DbuScale::new(-10.0).is_err());
        assert!(DbuScale::new(f64::NAN).is_err());
    }

    #[test]
    fn test_closure_is_converter() {
        let conv = |v: f64| Distance((v * 10.0) as i32);
        assert_eq!(conv.to_distance(2.5), Distance(25));
    }
}
