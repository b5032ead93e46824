//! This module is responsible for loading the route and stop tables,
//! cleaning their free-text fields, and building the transit network.

pub(crate) mod builder;
pub mod cleaning;
pub(crate) mod config;
pub mod matcher;
mod parser;
mod raw_types;

pub use builder::build_network;
pub use cleaning::{clean_routes_served, normalize_route_number};
pub use config::NetworkConfig;
pub use matcher::{RouteStopMatcher, stops_for_route};
pub use parser::{
    deserialize_csv, deserialize_csv_file, load_routes, load_stops, read_routes, read_stops,
};
pub use raw_types::{RawRoute, RawStop};
