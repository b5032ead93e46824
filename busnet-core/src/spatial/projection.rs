//! Forward projection from WGS84 longitude/latitude to planar meters.

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Coordinate-reference transformer from geographic to planar coordinates
pub trait Projection {
    /// Project a (lon, lat) point in degrees to (easting, northing) in meters
    fn project(&self, point: Point<f64>) -> Point<f64>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hemisphere {
    #[default]
    North,
    South,
}

// WGS84 ellipsoid
const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
const FLATTENING: f64 = 1.0 / 298.257_223_563;
const SCALE_FACTOR: f64 = 0.9996;
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Universal Transverse Mercator zone on the WGS84 ellipsoid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utm {
    zone: u8,
    hemisphere: Hemisphere,
}

impl Utm {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `zone` is outside `1..=60`
    pub fn new(zone: u8, hemisphere: Hemisphere) -> Result<Self, Error> {
        if !(1..=60).contains(&zone) {
            return Err(Error::InvalidConfig(format!(
                "UTM zone must be within 1..=60, got {zone}"
            )));
        }
        Ok(Self { zone, hemisphere })
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    /// Central meridian of the zone in degrees
    pub fn central_meridian(&self) -> f64 {
        f64::from(self.zone) * 6.0 - 183.0
    }
}

impl Projection for Utm {
    // Series expansion after Snyder, "Map Projections: A Working Manual" (1987)
    fn project(&self, point: Point<f64>) -> Point<f64> {
        let e2 = FLATTENING * (2.0 - FLATTENING);
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        let ep2 = e2 / (1.0 - e2);

        let lat = point.y().to_radians();
        let dlon = (point.x() - self.central_meridian()).to_radians();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let tan_lat = lat.tan();

        let n = SEMI_MAJOR_AXIS / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let t = tan_lat * tan_lat;
        let c = ep2 * cos_lat * cos_lat;
        let a = cos_lat * dlon;

        let m = SEMI_MAJOR_AXIS
            * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * lat
                - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * lat).sin()
                + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * lat).sin()
                - (35.0 * e6 / 3072.0) * (6.0 * lat).sin());

        let easting = SCALE_FACTOR
            * n
            * (a + (1.0 - t + c) * a.powi(3) / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a.powi(5) / 120.0)
            + FALSE_EASTING;

        let mut northing = SCALE_FACTOR
            * (m + n
                * tan_lat
                * (a * a / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * a.powi(4) / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a.powi(6) / 720.0));
        if self.hemisphere == Hemisphere::South {
            northing += FALSE_NORTHING_SOUTH;
        }

        Point::new(easting, northing)
    }
}
