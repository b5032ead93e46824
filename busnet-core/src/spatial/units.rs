use std::fmt;

use geo::{Distance, Euclidean, Geodesic, Point};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Coordinate reference a set of positions is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSystem {
    /// Longitude/latitude in degrees (x = lon, y = lat)
    #[default]
    Geographic,
    /// Planar easting/northing in meters
    Projected,
}

impl CoordinateSystem {
    /// Unit of raw coordinate differences in this system
    pub fn native_unit(self) -> LengthUnit {
        match self {
            Self::Geographic => LengthUnit::Degrees,
            Self::Projected => LengthUnit::Meters,
        }
    }

    /// Ground distance in meters between two positions
    pub fn distance_meters(self, a: Point<f64>, b: Point<f64>) -> f64 {
        match self {
            Self::Geographic => Geodesic.distance(a, b),
            Self::Projected => Euclidean.distance(a, b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    Degrees,
    Meters,
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degrees => write!(f, "degrees"),
            Self::Meters => write!(f, "meters"),
        }
    }
}

/// Distance threshold tagged with the unit it was tuned for.
///
/// Radius queries run on raw coordinates, so a threshold is only meaningful
/// in the unit of the coordinate system it is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub const fn meters(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Meters,
        }
    }

    pub const fn degrees(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Degrees,
        }
    }

    /// Raw value usable against coordinates in `crs`
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnitMismatch`] if the unit differs from the native
    /// unit of `crs`, and [`Error::InvalidConfig`] for non-finite values.
    pub fn in_system(self, crs: CoordinateSystem) -> Result<f64, Error> {
        let expected = crs.native_unit();
        if self.unit != expected {
            return Err(Error::UnitMismatch {
                expected,
                found: self.unit,
            });
        }
        if !self.value.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "distance threshold must be finite, got {}",
                self.value
            )));
        }
        Ok(self.value)
    }

    /// Like [`Length::in_system`], additionally rejecting values `<= 0`
    pub fn positive_in_system(self, crs: CoordinateSystem) -> Result<f64, Error> {
        let value = self.in_system(crs)?;
        if value <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "distance threshold must be positive, got {value} {}",
                self.unit
            )));
        }
        Ok(value)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}
