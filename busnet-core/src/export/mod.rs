mod to_geojson;

pub use to_geojson::{network_to_geojson, network_to_geojson_string};
