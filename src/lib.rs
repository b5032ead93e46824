//! End-to-end bus network study: load the stop and route tables, build the
//! network, and measure it.

pub mod config;
pub mod pipeline;
pub mod report;

pub use config::{AnalysisConfig, ProjectionConfig};
pub use pipeline::{analyze, run_analysis};
pub use report::AnalysisReport;
