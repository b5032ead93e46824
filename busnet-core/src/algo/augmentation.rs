//! Synthetic expansion of the network with randomly placed stations.

use log::info;
use petgraph::graph::NodeIndex;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::model::NetworkEdge;
use crate::{Error, NodeId, TransitNetwork};

/// Returns a copy of `network` with `count` synthetic nodes.
///
/// Each new node gets a numeric id above the largest numeric id present, a
/// position drawn uniformly from the bounding box of positioned nodes, and
/// one edge to a randomly chosen pre-existing node with an integer weight in
/// `[1, 10]`. The same `seed` always yields the same expansion.
///
/// # Errors
///
/// Returns [`Error::EmptyNetwork`] if `count > 0` and no node has a position
pub fn augment_network(
    network: &TransitNetwork,
    count: usize,
    seed: u64,
) -> Result<TransitNetwork, Error> {
    let mut augmented = network.clone();
    if count == 0 {
        return Ok(augmented);
    }

    let rect = network.bounding_rect().ok_or(Error::EmptyNetwork)?;
    let (min, max) = (rect.min(), rect.max());
    let existing: Vec<NodeIndex> = network.node_indices().collect();

    let mut rng = StdRng::seed_from_u64(seed);
    let mut next_id = next_numeric_id(network);

    for _ in 0..count {
        let id = loop {
            let candidate = next_id.to_string();
            next_id += 1;
            if augmented.node_index(&candidate).is_none() {
                break candidate;
            }
        };

        let position = geo::Point::new(
            rng.random_range(min.x..=max.x),
            rng.random_range(min.y..=max.y),
        );
        let weight = f64::from(rng.random_range(1u8..=10));
        let Some(&target) = existing.choose(&mut rng) else {
            return Err(Error::EmptyNetwork);
        };

        let Some(node) = augmented.add_node(id, Some(position), true) else {
            continue;
        };
        augmented.add_edge(node, target, NetworkEdge::synthetic(weight));
    }

    info!(
        "Added {count} synthetic nodes, network now has {} nodes",
        augmented.node_count()
    );
    Ok(augmented)
}

/// Smallest integer above every numeric node id, `1` if there is none
fn next_numeric_id(network: &TransitNetwork) -> u64 {
    network
        .node_indices()
        .filter_map(|idx| network.node(idx).id.trim().parse::<u64>().ok())
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

/// Ids of all synthetic nodes, in graph order
pub fn synthetic_node_ids(network: &TransitNetwork) -> Vec<NodeId> {
    network
        .node_indices()
        .map(|idx| network.node(idx))
        .filter(|node| node.synthetic)
        .map(|node| node.id.clone())
        .collect()
}
