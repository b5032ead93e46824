//! Undirected, weighted graph of stops joined by transit and pedestrian edges

use geo::{BoundingRect, MultiPoint, Point, Rect};
use hashbrown::HashMap;
use log::warn;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;

use crate::{CoordinateSystem, NodeId, TravelTime};

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkNode {
    pub id: NodeId,
    pub geometry: Option<Point<f64>>,
    /// Node added by augmentation rather than loaded from the stop table
    pub synthetic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Consecutive stops on a bus route
    Transit,
    /// Walkable link between nearby stops
    Pedestrian,
    /// Projected expansion link to a synthetic node
    Synthetic,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transit => "transit",
            Self::Pedestrian => "pedestrian",
            Self::Synthetic => "synthetic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkEdge {
    pub kind: EdgeKind,
    /// Travel time in seconds
    pub weight: TravelTime,
    pub color: &'static str,
}

impl NetworkEdge {
    pub const PEDESTRIAN_COLOR: &'static str = "#cccccc";

    pub fn transit(weight: TravelTime, color: &'static str) -> Self {
        Self {
            kind: EdgeKind::Transit,
            weight,
            color,
        }
    }

    pub fn pedestrian(weight: TravelTime) -> Self {
        Self {
            kind: EdgeKind::Pedestrian,
            weight,
            color: Self::PEDESTRIAN_COLOR,
        }
    }

    pub fn synthetic(weight: TravelTime) -> Self {
        Self {
            kind: EdgeKind::Synthetic,
            weight,
            color: "#888888",
        }
    }
}

/// Simple graph: no self-loops and at most one edge per node pair
#[derive(Debug, Clone)]
pub struct TransitNetwork {
    graph: UnGraph<NetworkNode, NetworkEdge>,
    node_lookup: HashMap<NodeId, NodeIndex>,
    crs: CoordinateSystem,
}

impl TransitNetwork {
    pub fn new(crs: CoordinateSystem) -> Self {
        Self::with_capacity(crs, 0, 0)
    }

    pub fn with_capacity(crs: CoordinateSystem, nodes: usize, edges: usize) -> Self {
        Self {
            graph: UnGraph::with_capacity(nodes, edges),
            node_lookup: HashMap::with_capacity(nodes),
            crs,
        }
    }

    pub fn crs(&self) -> CoordinateSystem {
        self.crs
    }

    pub fn graph(&self) -> &UnGraph<NetworkNode, NetworkEdge> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Adds a node, returning `None` if the id is already present
    pub fn add_node(
        &mut self,
        id: impl Into<NodeId>,
        geometry: Option<Point<f64>>,
        synthetic: bool,
    ) -> Option<NodeIndex> {
        let id = id.into();
        if self.node_lookup.contains_key(&id) {
            return None;
        }
        let idx = self.graph.add_node(NetworkNode {
            id: id.clone(),
            geometry,
            synthetic,
        });
        self.node_lookup.insert(id, idx);
        Some(idx)
    }

    /// Adds an edge unless one already joins `a` and `b`.
    ///
    /// Self-loops and negative or non-finite weights are refused. Returns
    /// whether the edge was inserted.
    pub fn add_edge(&mut self, a: NodeIndex, b: NodeIndex, edge: NetworkEdge) -> bool {
        if a == b || self.graph.contains_edge(a, b) {
            return false;
        }
        if !edge.weight.is_finite() || edge.weight < 0.0 {
            warn!(
                "Refusing {} edge {} - {} with weight {}",
                edge.kind.as_str(),
                self.graph[a].id,
                self.graph[b].id,
                edge.weight
            );
            return false;
        }
        self.graph.add_edge(a, b, edge);
        true
    }

    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_lookup.get(id).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &NetworkNode {
        &self.graph[idx]
    }

    pub fn position(&self, idx: NodeIndex) -> Option<Point<f64>> {
        self.graph[idx].geometry
    }

    pub fn has_edge(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.graph.contains_edge(a, b)
    }

    pub fn edge_between(&self, a: &str, b: &str) -> Option<&NetworkEdge> {
        let a = self.node_index(a)?;
        let b = self.node_index(b)?;
        self.graph.find_edge(a, b).map(|e| &self.graph[e])
    }

    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges(idx).count()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    /// Edges as `(edge, endpoint a, endpoint b, attributes)`
    pub fn edges(
        &self,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex, NodeIndex, &NetworkEdge)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.id(), e.source(), e.target(), e.weight()))
    }

    pub fn count_edges(&self, kind: EdgeKind) -> usize {
        self.graph
            .edge_weights()
            .filter(|edge| edge.kind == kind)
            .count()
    }

    /// Nodes that have a position, in graph order
    pub fn positioned_nodes(&self) -> Vec<(NodeIndex, Point<f64>)> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph[idx].geometry.map(|p| (idx, p)))
            .collect()
    }

    /// Bounding box of all node positions
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        let points: MultiPoint<f64> = self
            .graph
            .node_weights()
            .filter_map(|node| node.geometry)
            .collect();
        points.bounding_rect()
    }
}
