//! Network optimization pass: adds a few links where the network is thin.

use log::info;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::loading::builder::{EdgeTally, connect_by_distance};
use crate::loading::stops_for_route;
use crate::model::NetworkEdge;
use crate::{Error, Length, NetworkConfig, Route, SpatialIndex, Stop, TransitNetwork};

const LOW_DEGREE_COLOR: &str = "#0000ff";
const SKIP_STOP_COLOR: &str = "#ffa500";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensifyConfig {
    /// Nodes with fewer edges than this get extra links
    pub degree_threshold: usize,
    /// Extra links attempted per low-degree node
    pub links_per_node: usize,
    /// Additional pedestrian radius applied after low-degree linking
    pub extra_pedestrian_radius: Option<Length>,
    /// Join every stop to the one two places further along its route
    pub skip_stop_links: bool,
}

impl Default for DensifyConfig {
    fn default() -> Self {
        Self {
            degree_threshold: 4,
            links_per_node: 1,
            extra_pedestrian_radius: None,
            skip_stop_links: true,
        }
    }
}

/// Per-step counts of edges added by [`densify`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DensifySummary {
    pub low_degree_links: usize,
    pub pedestrian_links: usize,
    pub skip_stop_links: usize,
}

/// Returns a densified copy of `network`.
///
/// 1. Every node whose degree is below the threshold is linked to the first
///    other node (graph order) that is still below the threshold.
/// 2. Stops within the extra pedestrian radius get pedestrian edges.
/// 3. Along each route, stop `i` is linked to stop `i + 2`.
///
/// Existing connections are never replaced. Edge weights use the speeds of
/// `speeds`, the configuration the network was built with.
///
/// # Errors
///
/// Returns a configuration error for invalid speeds or radius
pub fn densify(
    network: &TransitNetwork,
    routes: &[Route],
    stops: &[Stop],
    speeds: &NetworkConfig,
    config: &DensifyConfig,
) -> Result<(TransitNetwork, DensifySummary), Error> {
    speeds.validate_speeds()?;
    let extra_radius = config
        .extra_pedestrian_radius
        .map(|radius| radius.positive_in_system(network.crs()))
        .transpose()?;

    let mut densified = network.clone();
    let summary = DensifySummary {
        low_degree_links: link_low_degree_nodes(&mut densified, config, speeds.bus_speed).added,
        pedestrian_links: extra_radius
            .map_or(0, |radius| add_walk_links(&mut densified, radius, speeds.walk_speed).added),
        skip_stop_links: if config.skip_stop_links {
            add_skip_stop_links(&mut densified, routes, stops, speeds.bus_speed).added
        } else {
            0
        },
    };

    info!(
        "Densified network: {} low-degree, {} pedestrian and {} skip-stop links",
        summary.low_degree_links, summary.pedestrian_links, summary.skip_stop_links
    );
    Ok((densified, summary))
}

fn link_low_degree_nodes(
    network: &mut TransitNetwork,
    config: &DensifyConfig,
    bus_speed: f64,
) -> EdgeTally {
    let threshold = config.degree_threshold;
    let low_degree: Vec<NodeIndex> = network
        .node_indices()
        .filter(|&idx| network.degree(idx) < threshold)
        .collect();

    let mut tally = EdgeTally::default();
    for node in low_degree {
        let candidates: Vec<NodeIndex> = network
            .node_indices()
            .filter(|&other| other != node && network.degree(other) < threshold)
            .take(config.links_per_node)
            .collect();

        for target in candidates {
            tally.record(connect_by_distance(
                network,
                node,
                target,
                bus_speed,
                |weight| NetworkEdge::transit(weight, LOW_DEGREE_COLOR),
            ));
        }
    }
    tally
}

fn add_walk_links(network: &mut TransitNetwork, radius: f64, walk_speed: f64) -> EdgeTally {
    let positioned = network.positioned_nodes();
    let points: Vec<_> = positioned.iter().map(|(_, point)| *point).collect();

    let mut tally = EdgeTally::default();
    for (i, j) in SpatialIndex::new(&points).pairs_within(radius) {
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

fn add_skip_stop_links(
    network: &mut TransitNetwork,
    routes: &[Route],
    stops: &[Stop],
    bus_speed: f64,
) -> EdgeTally {
    let mut tally = EdgeTally::default();
    for route in routes {
        let served = stops_for_route(&route.route_number, stops);
        for (from, to) in served.iter().zip(served.iter().skip(2)) {
            let (Some(a), Some(b)) = (
                network.node_index(&from.stop_id),
                network.node_index(&to.stop_id),
            ) else {
                continue;
            };
            tally.record(connect_by_distance(network, a, b, bus_speed, |weight| {
                NetworkEdge::transit(weight, SKIP_STOP_COLOR)
            }));
        }
    }
    tally
}
