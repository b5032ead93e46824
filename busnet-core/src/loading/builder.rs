use itertools::Itertools;
use log::{debug, info, warn};
use petgraph::graph::NodeIndex;

use super::config::NetworkConfig;
use super::matcher::stops_for_route;
use crate::model::NetworkEdge;
use crate::{Error, Route, SpatialIndex, Stop, StopTable, TransitNetwork, TravelTime};

/// Builds the transit network from the stop and route tables
///
/// Nodes are created for every stop, then each route chains its matched
/// stops with transit edges, then nearby stops are joined by pedestrian
/// edges. Earlier edges win over later ones for the same stop pair.
///
/// # Errors
///
/// Returns an error if the configuration is invalid for the coordinate
/// system of `stops`
pub fn build_network(
    stops: &StopTable,
    routes: &[Route],
    config: &NetworkConfig,
) -> Result<TransitNetwork, Error> {
    let pedestrian_radius = config.validate(stops.crs())?;

    info!(
        "Building network from {} stops and {} routes",
        stops.len(),
        routes.len()
    );

    let mut network = TransitNetwork::with_capacity(stops.crs(), stops.len(), stops.len() * 2);
    add_stop_nodes(&mut network, stops.stops());

    let transit = add_transit_edges(&mut network, stops.stops(), routes, config.bus_speed);
    info!(
        "Added {} transit edges ({} duplicates skipped)",
        transit.added, transit.existing
    );

    let pedestrian = add_pedestrian_edges(&mut network, pedestrian_radius, config.walk_speed);
    info!(
        "Added {} pedestrian edges within {} ({} pairs already connected)",
        pedestrian.added, config.pedestrian_radius, pedestrian.existing
    );

    let unpositioned = transit.unpositioned + pedestrian.unpositioned;
    if unpositioned > 0 {
        warn!("Skipped {unpositioned} edges touching stops without coordinates");
    }

    Ok(network)
}

fn add_stop_nodes(network: &mut TransitNetwork, stops: &[Stop]) {
    let mut duplicates = 0usize;
    for stop in stops {
        if network
            .add_node(stop.stop_id.clone(), stop.geometry, false)
            .is_none()
        {
            debug!("Duplicate stop id {} - keeping first row", stop.stop_id);
            duplicates += 1;
        }
    }
    if duplicates > 0 {
        warn!("Ignored {duplicates} rows with duplicate stop ids");
    }
}

fn add_transit_edges(
    network: &mut TransitNetwork,
    stops: &[Stop],
    routes: &[Route],
    bus_speed: f64,
) -> EdgeTally {
    let mut tally = EdgeTally::default();

    for route in routes {
        let color = route.color();
        let served = stops_for_route(&route.route_number, stops);
        debug!(
            "Route {} ({}) serves {} stops",
            route.route_number,
            route.route_name,
            served.len()
        );

        for (from, to) in served.iter().tuple_windows() {
            let (Some(a), Some(b)) = (
                network.node_index(&from.stop_id),
                network.node_index(&to.stop_id),
            ) else {
                continue;
            };
            tally.record(connect_by_distance(network, a, b, bus_speed, |weight| {
                NetworkEdge::transit(weight, color)
            }));
        }
    }

    tally
}

fn add_pedestrian_edges(network: &mut TransitNetwork, radius: f64, walk_speed: f64) -> EdgeTally {
    let positioned = network.positioned_nodes();
    let points: Vec<_> = positioned.iter().map(|(_, point)| *point).collect();
    let index = SpatialIndex::new(&points);

    let mut tally = EdgeTally::default();
    for (i, j) in index.pairs_within(radius) {
        tally.record(connect_by_distance(
            network,
            positioned[i].0,
            positioned[j].0,
            walk_speed,
            NetworkEdge::pedestrian,
        ));
    }
    tally
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Connection {
    Added,
    Existing,
    Unpositioned,
}

/// Joins `a` and `b` with an edge weighted by travel time at `speed`,
/// unless they are already connected or either lacks a position
pub(crate) fn connect_by_distance(
    network: &mut TransitNetwork,
    a: NodeIndex,
    b: NodeIndex,
    speed: f64,
    make_edge: impl FnOnce(TravelTime) -> NetworkEdge,
) -> Connection {
    if a == b || network.has_edge(a, b) {
        return Connection::Existing;
    }
    let (Some(pa), Some(pb)) = (network.position(a), network.position(b)) else {
        return Connection::Unpositioned;
    };

    let meters = network.crs().distance_meters(pa, pb);
    if network.add_edge(a, b, make_edge(meters / speed)) {
        Connection::Added
    } else {
        Connection::Existing
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct EdgeTally {
    pub(crate) added: usize,
    pub(crate) existing: usize,
    pub(crate) unpositioned: usize,
}

impl EdgeTally {
    pub(crate) fn record(&mut self, connection: Connection) {
        match connection {
            Connection::Added => self.added += 1,
            Connection::Existing => self.existing += 1,
            Connection::Unpositioned => self.unpositioned += 1,
        }
    }
}
