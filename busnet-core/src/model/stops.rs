use geo::Point;
use log::info;

use crate::{CoordinateSystem, Error, NodeId, spatial::Projection};

/// Bus stop with its cleaned route tokens
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub stop_id: NodeId,
    /// Stop position, `None` when the source row had no usable coordinates
    pub geometry: Option<Point<f64>>,
    /// Comma-joined, normalized route tokens served at this stop
    pub routes_served: String,
}

impl Stop {
    pub fn new(
        stop_id: impl Into<NodeId>,
        geometry: Option<Point<f64>>,
        routes_served: impl Into<String>,
    ) -> Self {
        Self {
            stop_id: stop_id.into(),
            geometry,
            routes_served: routes_served.into(),
        }
    }
}

/// Stops in source row order, together with the coordinate system their
/// positions are expressed in
#[derive(Debug, Clone, PartialEq)]
pub struct StopTable {
    stops: Vec<Stop>,
    crs: CoordinateSystem,
}

impl StopTable {
    pub fn new(stops: Vec<Stop>, crs: CoordinateSystem) -> Self {
        Self { stops, crs }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn crs(&self) -> CoordinateSystem {
        self.crs
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Converts geographic positions to planar ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the table is already projected.
    pub fn reproject(&self, projection: &dyn Projection) -> Result<Self, Error> {
        if self.crs == CoordinateSystem::Projected {
            return Err(Error::InvalidConfig(
                "stop table is already in a projected coordinate system".to_string(),
            ));
        }

        let stops = self
            .stops
            .iter()
            .map(|stop| Stop {
                geometry: stop.geometry.map(|p| projection.project(p)),
                ..stop.clone()
            })
            .collect::<Vec<_>>();
        info!("Reprojected {} stops to planar coordinates", stops.len());

        Ok(Self {
            stops,
            crs: CoordinateSystem::Projected,
        })
    }
}
