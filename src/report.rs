use std::fmt;

use busnet_core::algo::{Accessibility, Coverage, DensifySummary, Hub, NetworkStats};
use busnet_core::{NodeId, TransitNetwork};
use serde::Serialize;

/// Results of one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Network as built from the stop and route tables
    pub base_stats: NetworkStats,
    /// Network after densification and augmentation
    pub stats: NetworkStats,
    pub hubs: Vec<Hub>,
    pub densify: Option<DensifySummary>,
    pub synthetic_nodes: Vec<NodeId>,
    /// Reachability of the stop network, before synthetic nodes are added
    pub accessibility: Accessibility,
    /// Coverage of the augmented network
    pub coverage: Vec<Coverage>,
    #[serde(skip)]
    pub network: TransitNetwork,
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.stats;
        writeln!(
            f,
            "Network: {} nodes, {} edges ({} transit, {} pedestrian, {} synthetic)",
            stats.node_count,
            stats.edge_count,
            stats.transit_edges,
            stats.pedestrian_edges,
            stats.synthetic_edges
        )?;
        if self.base_stats.edge_count != stats.edge_count {
            writeln!(
                f,
                "  base network had {} nodes and {} edges",
                self.base_stats.node_count, self.base_stats.edge_count
            )?;
        }
        writeln!(
            f,
            "Density {:.5}, average degree {:.2}, average clustering {:.4}",
            stats.density, stats.average_degree, stats.average_clustering
        )?;

        if !self.hubs.is_empty() {
            let hubs = self
                .hubs
                .iter()
                .map(|hub| format!("{} ({})", hub.node_id, hub.degree))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "Hubs: {hubs}")?;
        }

        writeln!(
            f,
            "Reachable within {}s: mean {:.1}, min {}, max {}",
            self.accessibility.threshold,
            self.accessibility.mean(),
            self.accessibility.min(),
            self.accessibility.max()
        )?;
        for coverage in &self.coverage {
            writeln!(
                f,
                "Coverage within {}: {:.1}%",
                coverage.radius,
                coverage.ratio * 100.0
            )?;
        }
        Ok(())
    }
}
