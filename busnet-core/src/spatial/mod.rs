//! Coordinate systems, typed distance thresholds and point indexing

pub mod index;
pub mod projection;
pub mod units;

pub use index::{IndexedPoint, SpatialIndex};
pub use projection::{Hemisphere, Projection, Utm};
pub use units::{CoordinateSystem, Length, LengthUnit};
