//! Data model of the bus network study
//!
//! Stops and routes as loaded from the source tables, and the undirected
//! graph built from them.

pub mod network;
pub mod routes;
pub mod stops;

pub use network::{EdgeKind, NetworkEdge, NetworkNode, TransitNetwork};
pub use routes::{CityLinkLine, Route, RouteCategory};
pub use stops::{Stop, StopTable};
