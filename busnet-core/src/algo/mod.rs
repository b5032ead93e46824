pub mod accessibility;
pub mod augmentation;
pub mod coverage;
pub mod densify;
pub mod stats;

pub use accessibility::{Accessibility, NodeAccessibility, calculate_accessibility, reachable_count};
pub use augmentation::{augment_network, synthetic_node_ids};
pub use coverage::{Coverage, coverage_ratio, coverage_ratios, sample_population};
pub use densify::{DensifyConfig, DensifySummary, densify};
pub use stats::{Hub, NetworkStats, top_hubs};
