//! Transit network construction and accessibility metrics for bus-network
//! studies.
//!
//! Stops and routes are loaded from CSV, joined into an undirected graph of
//! transit and pedestrian edges, and scored with Dijkstra-based
//! reachability counts and population coverage ratios.

pub mod algo;
pub mod error;
pub mod export;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod spatial;

pub use error::Error;
pub use loading::{NetworkConfig, build_network};
pub use model::{EdgeKind, Route, RouteCategory, Stop, StopTable, TransitNetwork};
pub use spatial::{CoordinateSystem, Length, LengthUnit, SpatialIndex};

/// Travel time in seconds
pub type TravelTime = f64;

/// Identifier of a stop or synthetic node
pub type NodeId = String;

/// Assumed average bus speed, 29.3 km/h in m/s
pub const BUS_SPEED: f64 = 29_300.0 / 3_600.0;

/// Assumed walking speed in m/s
pub const WALK_SPEED: f64 = 1.4;

/// Default reachability budget in seconds (25 minutes)
pub const DEFAULT_TIME_THRESHOLD: TravelTime = 1_500.0;
