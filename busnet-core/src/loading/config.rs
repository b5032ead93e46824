use serde::{Deserialize, Serialize};

use crate::{BUS_SPEED, CoordinateSystem, Error, Length, WALK_SPEED};

/// Parameters of network construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Bus speed in m/s used for transit edge weights
    pub bus_speed: f64,
    /// Walking speed in m/s used for pedestrian edge weights
    pub walk_speed: f64,
    /// Maximum separation of stops joined by a pedestrian edge, in the unit
    /// of the stop table's coordinate system
    pub pedestrian_radius: Length,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bus_speed: BUS_SPEED,
            walk_speed: WALK_SPEED,
            pedestrian_radius: Length::degrees(0.0045),
        }
    }
}

impl NetworkConfig {
    /// Defaults with a pedestrian radius fitted to planar coordinates
    pub fn projected(pedestrian_radius_meters: f64) -> Self {
        Self {
            pedestrian_radius: Length::meters(pedestrian_radius_meters),
            ..Self::default()
        }
    }

    /// Checks speeds and returns the pedestrian radius in `crs` units
    ///
    /// # Errors
    ///
    /// Returns a configuration error for non-positive speeds or radius, and
    /// [`Error::UnitMismatch`] if the radius unit does not fit `crs`.
    pub fn validate(&self, crs: CoordinateSystem) -> Result<f64, Error> {
        self.validate_speeds()?;
        self.pedestrian_radius.positive_in_system(crs)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] unless both speeds are positive
    pub fn validate_speeds(&self) -> Result<(), Error> {
        validate_speed("bus_speed", self.bus_speed)?;
        validate_speed("walk_speed", self.walk_speed)
    }
}

fn validate_speed(name: &str, speed: f64) -> Result<(), Error> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{name} must be positive, got {speed}"
        )))
    }
}
