use std::fs::File;
use std::io::Read;
use std::path::Path;

use geo::Point;
use log::{info, trace, warn};
use serde::de::DeserializeOwned;

use super::cleaning::{clean_routes_served, normalize_route_number};
use super::raw_types::{RawRoute, RawStop};
use crate::{CoordinateSystem, Error, Route, RouteCategory, Stop, StopTable};

/// Deserialize all well-formed rows of a CSV table; malformed rows are
/// skipped and counted
pub fn deserialize_csv<T, R>(reader: R) -> Vec<T>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut skipped = 0usize;
    let rows = csv::Reader::from_reader(reader)
        .deserialize()
        .filter_map(|row| match row {
            Ok(row) => Some(row),
            Err(e) => {
                trace!("Skipping malformed row: {e}");
                skipped += 1;
                None
            }
        })
        .collect::<Vec<T>>();

    if skipped > 0 {
        warn!("Skipped {skipped} malformed rows");
    }
    rows
}

pub fn deserialize_csv_file<T>(path: &Path) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
{
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    Ok(deserialize_csv(file))
}

/// Read the stop table, keeping source row order
pub fn read_stops<R: Read>(reader: R, crs: CoordinateSystem) -> StopTable {
    let raw: Vec<RawStop> = deserialize_csv(reader);
    StopTable::new(convert_stops(raw), crs)
}

pub fn load_stops(path: &Path, crs: CoordinateSystem) -> Result<StopTable, Error> {
    info!("Loading stops from {}", path.display());
    let raw: Vec<RawStop> = deserialize_csv_file(path)?;
    Ok(StopTable::new(convert_stops(raw), crs))
}

pub fn read_routes<R: Read>(reader: R) -> Vec<Route> {
    convert_routes(deserialize_csv(reader))
}

pub fn load_routes(path: &Path) -> Result<Vec<Route>, Error> {
    info!("Loading routes from {}", path.display());
    Ok(convert_routes(deserialize_csv_file(path)?))
}

fn convert_stops(raw: Vec<RawStop>) -> Vec<Stop> {
    let mut unpositioned = 0usize;
    let stops = raw
        .into_iter()
        .filter_map(|raw_stop| {
            let stop_id = raw_stop.stop_id.trim();
            if stop_id.is_empty() {
                warn!("Skipping stop row without stop_id");
                return None;
            }

            let geometry = match (parse_coordinate(&raw_stop.x), parse_coordinate(&raw_stop.y)) {
                (Some(x), Some(y)) => Some(Point::new(x, y)),
                _ => {
                    trace!("Stop {stop_id} has no usable coordinates");
                    unpositioned += 1;
                    None
                }
            };

            Some(Stop::new(
                stop_id,
                geometry,
                clean_routes_served(&raw_stop.routes_served),
            ))
        })
        .collect::<Vec<_>>();

    if unpositioned > 0 {
        warn!(
            "{unpositioned} of {} stops have no usable coordinates and will not get edges",
            stops.len()
        );
    }
    stops
}

fn convert_routes(raw: Vec<RawRoute>) -> Vec<Route> {
    raw.into_iter()
        .map(|raw_route| {
            let route_number = normalize_route_number(&raw_route.route_number);
            let category = RouteCategory::parse(&raw_route.route_type, &route_number);
            Route::new(route_number, raw_route.route_name.trim(), category)
        })
        .collect()
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        Ok(value) => {
            warn!("Non-finite coordinate '{value}'");
            None
        }
        Err(e) => {
            warn!("Invalid coordinate '{raw}': {e}");
            None
        }
    }
}
