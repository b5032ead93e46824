//! Reachability counts: how many other nodes each node reaches within a
//! travel-time budget.

use hashbrown::HashMap;
use log::info;
use petgraph::graph::NodeIndex;
use rayon::prelude::*;
use serde::Serialize;

use crate::routing::dijkstra_travel_times;
use crate::{Error, NodeId, TransitNetwork, TravelTime};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeAccessibility {
    pub node_id: NodeId,
    /// Other nodes reachable within the threshold
    pub reachable: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Accessibility {
    /// Travel-time budget in seconds
    pub threshold: TravelTime,
    /// One entry per node, in graph order
    pub nodes: Vec<NodeAccessibility>,
}

impl Accessibility {
    pub fn get(&self, node_id: &str) -> Option<usize> {
        self.nodes
            .iter()
            .find(|node| node.node_id == node_id)
            .map(|node| node.reachable)
    }

    /// Reachability counts keyed by node id
    pub fn counts_by_id(&self) -> HashMap<&str, usize> {
        self.nodes
            .iter()
            .map(|node| (node.node_id.as_str(), node.reachable))
            .collect()
    }

    pub fn max(&self) -> usize {
        self.nodes.iter().map(|n| n.reachable).max().unwrap_or(0)
    }

    pub fn min(&self) -> usize {
        self.nodes.iter().map(|n| n.reachable).min().unwrap_or(0)
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> f64 {
        if self.nodes.is_empty() {
            return 0.0;
        }
        self.nodes.iter().map(|n| n.reachable).sum::<usize>() as f64 / self.nodes.len() as f64
    }
}

/// Number of nodes other than `source` within `threshold` seconds
pub fn reachable_count(
    network: &TransitNetwork,
    source: NodeIndex,
    threshold: TravelTime,
) -> usize {
    dijkstra_travel_times(network, source, Some(threshold))
        .into_iter()
        .filter(|&(node, time)| node != source && time <= threshold)
        .count()
}

/// Reachability count for every node of the network.
///
/// One Dijkstra search runs per node; searches are independent and run in
/// parallel over the read-only network.
///
/// # Errors
///
/// Returns [`Error::EmptyNetwork`] for a network without nodes and
/// [`Error::InvalidConfig`] for a non-positive or non-finite threshold
pub fn calculate_accessibility(
    network: &TransitNetwork,
    threshold: TravelTime,
) -> Result<Accessibility, Error> {
    if network.is_empty() {
        return Err(Error::EmptyNetwork);
    }
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(Error::InvalidConfig(format!(
            "time threshold must be positive, got {threshold}"
        )));
    }

    info!(
        "Calculating accessibility within {threshold}s for {} nodes",
        network.node_count()
    );

    let sources: Vec<NodeIndex> = network.node_indices().collect();
    let nodes = sources
        .par_iter()
        .map(|&source| NodeAccessibility {
            node_id: network.node(source).id.clone(),
            reachable: reachable_count(network, source, threshold),
        })
        .collect();

    Ok(Accessibility { threshold, nodes })
}
