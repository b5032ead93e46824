pub use crate::{BUS_SPEED, DEFAULT_TIME_THRESHOLD, WALK_SPEED};

// Re-export key components
pub use crate::algo::{
    Accessibility, Coverage, DensifyConfig, NetworkStats, augment_network, calculate_accessibility,
    coverage_ratios, densify, sample_population, top_hubs,
};
pub use crate::export::{network_to_geojson, network_to_geojson_string};
pub use crate::loading::{NetworkConfig, build_network, load_routes, load_stops};
pub use crate::model::{EdgeKind, Route, RouteCategory, Stop, StopTable, TransitNetwork};
pub use crate::spatial::{CoordinateSystem, Hemisphere, Length, Projection, Utm};

// Core types
pub use crate::Error;
pub use crate::NodeId;
pub use crate::TravelTime; // seconds
