//! IONEX map grid definition

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Linear space along one axis,
/// starting from `start` ranging to `end` (included)
/// with given spacing, in decimal degrees (or km for altitudes).
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Linspace {
    /// First coordinate
    pub start: f64,
    /// Last coordinate
    pub end: f64,
    /// Increment, may be negative (north to south latitudes)
    pub spacing: f64,
}

impl Linspace {
    /// Builds a new [Linspace] definition
    pub fn new(start: f64, end: f64, spacing: f64) -> Self {
        Self {
            start,
            end,
            spacing,
        }
    }

    /// Returns the number of cells this axis describes:
    /// `(|start| + |end|) / |spacing| + 1`.
    /// This is not rounded: a spacing that does not divide the
    /// span yields a fractional count, which will never match
    /// a real sample count.
    pub fn cells(&self) -> f64 {
        (self.start.abs() + self.end.abs()) / self.spacing.abs() + 1.0
    }

    /// Returns true if self is a single point space
    pub fn is_single_point(&self) -> bool {
        self.start == self.end && self.spacing == 0.0
    }

    /// Returns the nth coordinate of this axis
    pub(crate) fn coordinate(&self, nth: usize) -> f64 {
        self.start + self.spacing * nth as f64
    }
}

impl From<(f64, f64, f64)> for Linspace {
    fn from(tuple: (f64, f64, f64)) -> Self {
        Self::new(tuple.0, tuple.1, tuple.2)
    }
}

impl From<Linspace> for (f64, f64, f64) {
    fn from(linspace: Linspace) -> Self {
        (linspace.start, linspace.end, linspace.spacing)
    }
}

/// 2D sampling grid of a TEC map.
/// Map samples are stored as latitude slices (outer loop, `latitude.start`
/// to `latitude.end`), each slice running from `longitude.start`
/// to `longitude.end` (inner loop).
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid {
    /// Latitude axis (LAT1, LAT2, DLAT)
    pub latitude: Linspace,
    /// Longitude axis (LON1, LON2, DLON)
    pub longitude: Linspace,
}

impl Grid {
    /// Builds a new [Grid] from (lat1, lat2, dlat) and (lon1, lon2, dlon)
    pub fn new(latitude: impl Into<Linspace>, longitude: impl Into<Linspace>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// Total number of cells this grid describes
    pub fn cells(&self) -> f64 {
        self.latitude.cells() * self.longitude.cells()
    }

    /// Returns true if this grid describes exactly `samples` cells
    pub fn matches(&self, samples: usize) -> bool {
        self.cells() == samples as f64
    }
}
