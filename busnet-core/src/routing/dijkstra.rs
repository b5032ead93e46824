use std::collections::BinaryHeap;

use hashbrown::HashMap;
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use super::state::State;
use crate::{Error, TransitNetwork, TravelTime};

/// Dijkstra's algorithm over edge travel times.
///
/// Returns the shortest travel time to every node settled from `start`.
/// With `max_cost`, nodes farther than the budget are not returned and the
/// search stops expanding past it.
pub fn dijkstra_travel_times(
    network: &TransitNetwork,
    start: NodeIndex,
    max_cost: Option<TravelTime>,
) -> HashMap<NodeIndex, TravelTime> {
    let graph = network.graph();
    let mut distances: HashMap<NodeIndex, TravelTime> = HashMap::new();
    let mut heap = BinaryHeap::new();

    // Start node has distance 0
    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        // Skip if we've found a better path
        if let Some(&best) = distances.get(&node)
            && cost > best
        {
            continue;
        }

        for edge in graph.edges(node) {
            let next = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            let next_cost = cost + edge.weight().weight;

            if let Some(max) = max_cost
                && next_cost > max
            {
                continue;
            }

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    distances
}

/// Shortest travel time between two nodes, `None` if disconnected
pub fn travel_time_between(
    network: &TransitNetwork,
    from: NodeIndex,
    to: NodeIndex,
) -> Option<TravelTime> {
    dijkstra_travel_times(network, from, None).get(&to).copied()
}

/// [`travel_time_between`] for node ids
///
/// # Errors
///
/// Returns [`Error::UnknownNode`] if either id is not in the network
pub fn travel_time_by_id(
    network: &TransitNetwork,
    from: &str,
    to: &str,
) -> Result<Option<TravelTime>, Error> {
    let lookup = |id: &str| {
        network
            .node_index(id)
            .ok_or_else(|| Error::UnknownNode(id.to_string()))
    };
    Ok(travel_time_between(network, lookup(from)?, lookup(to)?))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo::Point;

    use super::*;
    use crate::CoordinateSystem;
    use crate::model::NetworkEdge;

    /// a - b - c in a line plus a slow direct a - c shortcut, and an
    /// isolated d
    fn triangle() -> (TransitNetwork, [NodeIndex; 4]) {
        let mut network = TransitNetwork::new(CoordinateSystem::Projected);
        let ids = ["a", "b", "c", "d"].map(|id| {
            network
                .add_node(id, Some(Point::new(0.0, 0.0)), false)
                .unwrap()
        });
        let [a, b, c, _] = ids;
        network.add_edge(a, b, NetworkEdge::transit(10.0, "#2ca02c"));
        network.add_edge(b, c, NetworkEdge::transit(5.0, "#2ca02c"));
        network.add_edge(a, c, NetworkEdge::pedestrian(40.0));
        (network, ids)
    }

    #[test]
    fn shortest_path_prefers_cheaper_route() {
        let (network, [a, b, c, d]) = triangle();
        let times = dijkstra_travel_times(&network, a, None);
        assert_relative_eq!(times[&a], 0.0);
        assert_relative_eq!(times[&b], 10.0);
        assert_relative_eq!(times[&c], 15.0);
        assert!(!times.contains_key(&d));
    }

    #[test]
    fn budget_cuts_off_far_nodes() {
        let (network, [a, b, c, _]) = triangle();
        let times = dijkstra_travel_times(&network, a, Some(12.0));
        assert!(times.contains_key(&b));
        assert!(!times.contains_key(&c));

        let inclusive = dijkstra_travel_times(&network, a, Some(15.0));
        assert_relative_eq!(inclusive[&c], 15.0);
    }

    #[test]
    fn graph_is_undirected() {
        let (network, [a, _, c, d]) = triangle();
        assert_eq!(travel_time_between(&network, c, a), Some(15.0));
        assert_eq!(travel_time_between(&network, a, d), None);
    }

    #[test]
    fn lookup_by_id() {
        let (network, _) = triangle();
        assert_eq!(travel_time_by_id(&network, "a", "c").unwrap(), Some(15.0));
        assert!(matches!(
            travel_time_by_id(&network, "a", "zz"),
            Err(Error::UnknownNode(id)) if id == "zz"
        ));
    }
}
