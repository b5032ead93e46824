//! Structural summary of a network: size, density, clustering and hubs.

use hashbrown::HashSet;
use petgraph::graph::NodeIndex;
use serde::Serialize;

use crate::{EdgeKind, NodeId, TransitNetwork};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub transit_edges: usize,
    pub pedestrian_edges: usize,
    pub synthetic_edges: usize,
    /// Edges over the number of possible node pairs
    pub density: f64,
    pub average_degree: f64,
    /// Mean local clustering coefficient, nodes of degree < 2 count as 0
    pub average_clustering: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hub {
    pub node_id: NodeId,
    pub degree: usize,
}

impl NetworkStats {
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(network: &TransitNetwork) -> Self {
        let n = network.node_count();
        let m = network.edge_count();

        let (density, average_degree, average_clustering) = if n == 0 {
            (0.0, 0.0, 0.0)
        } else {
            let density = if n > 1 {
                2.0 * m as f64 / (n as f64 * (n as f64 - 1.0))
            } else {
                0.0
            };
            let clustering: f64 = network
                .node_indices()
                .map(|idx| local_clustering(network, idx))
                .sum();
            (density, 2.0 * m as f64 / n as f64, clustering / n as f64)
        };

        Self {
            node_count: n,
            edge_count: m,
            transit_edges: network.count_edges(EdgeKind::Transit),
            pedestrian_edges: network.count_edges(EdgeKind::Pedestrian),
            synthetic_edges: network.count_edges(EdgeKind::Synthetic),
            density,
            average_degree,
            average_clustering,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn local_clustering(network: &TransitNetwork, idx: NodeIndex) -> f64 {
    let neighbors: Vec<NodeIndex> = network
        .neighbors(idx)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let k = neighbors.len();
    if k < 2 {
        return 0.0;
    }

    let mut links = 0usize;
    for (i, &a) in neighbors.iter().enumerate() {
        for &b in &neighbors[i + 1..] {
            if network.has_edge(a, b) {
                links += 1;
            }
        }
    }
    2.0 * links as f64 / (k * (k - 1)) as f64
}

/// The `n` nodes of highest degree; ties keep graph order
pub fn top_hubs(network: &TransitNetwork, n: usize) -> Vec<Hub> {
    let mut hubs: Vec<Hub> = network
        .node_indices()
        .map(|idx| Hub {
            node_id: network.node(idx).id.clone(),
            degree: network.degree(idx),
        })
        .collect();
    hubs.sort_by(|a, b| b.degree.cmp(&a.degree));
    hubs.truncate(n);
    hubs
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::CoordinateSystem;
    use crate::model::NetworkEdge;

    /// Triangle a-b-c with a pendant d hanging off c
    fn paw() -> TransitNetwork {
        let mut network = TransitNetwork::new(CoordinateSystem::Projected);
        let [a, b, c, d] = ["a", "b", "c", "d"].map(|id| network.add_node(id, None, false).unwrap());
        network.add_edge(a, b, NetworkEdge::transit(1.0, "#2ca02c"));
        network.add_edge(b, c, NetworkEdge::transit(1.0, "#2ca02c"));
        network.add_edge(c, a, NetworkEdge::pedestrian(1.0));
        network.add_edge(c, d, NetworkEdge::synthetic(4.0));
        network
    }

    #[test]
    fn counts_and_density() {
        let stats = NetworkStats::compute(&paw());
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.edge_count, 4);
        assert_eq!(stats.transit_edges, 2);
        assert_eq!(stats.pedestrian_edges, 1);
        assert_eq!(stats.synthetic_edges, 1);
        assert_relative_eq!(stats.density, 4.0 / 6.0);
        assert_relative_eq!(stats.average_degree, 2.0);
    }

    #[test]
    fn clustering_of_paw_graph() {
        // a, b: 1.0; c: 1/3; d: 0
        let stats = NetworkStats::compute(&paw());
        assert_relative_eq!(stats.average_clustering, (2.0 + 1.0 / 3.0) / 4.0);
    }

    #[test]
    fn hubs_sorted_by_degree() {
        let hubs = top_hubs(&paw(), 2);
        assert_eq!(
            hubs,
            vec![
                Hub {
                    node_id: "c".to_string(),
                    degree: 3
                },
                Hub {
                    node_id: "a".to_string(),
                    degree: 2
                },
            ]
        );
    }

    #[test]
    fn empty_network_has_zero_stats() {
        let stats = NetworkStats::compute(&TransitNetwork::new(CoordinateSystem::Geographic));
        assert_eq!(stats.node_count, 0);
        assert_eq!(stats.density, 0.0);
        assert_eq!(stats.average_clustering, 0.0);
        assert!(top_hubs(&TransitNetwork::new(CoordinateSystem::Geographic), 5).is_empty());
    }
}
