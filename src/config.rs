use std::path::PathBuf;

use busnet_core::algo::DensifyConfig;
use busnet_core::spatial::{Hemisphere, Utm};
use busnet_core::{DEFAULT_TIME_THRESHOLD, Error, Length, NetworkConfig, TravelTime};
use serde::{Deserialize, Serialize};

/// Coordinate handling of the stop table before the network is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProjectionConfig {
    /// Keep longitude/latitude; distance thresholds are in degrees
    None,
    /// Project into a UTM zone; distance thresholds are in meters
    Utm { zone: u8, hemisphere: Hemisphere },
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self::Utm {
            zone: 18,
            hemisphere: Hemisphere::North,
        }
    }
}

impl ProjectionConfig {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a zone outside `1..=60`
    pub fn projection(self) -> Result<Option<Utm>, Error> {
        match self {
            Self::None => Ok(None),
            Self::Utm { zone, hemisphere } => Utm::new(zone, hemisphere).map(Some),
        }
    }
}

/// Everything one analysis run needs.
///
/// Read from TOML by the CLI; every field has a default so a config file
/// only has to name the input tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub stops_path: PathBuf,
    pub routes_path: PathBuf,
    pub projection: ProjectionConfig,
    pub network: NetworkConfig,
    /// Reachability budget in seconds
    pub time_threshold: TravelTime,
    pub synthetic_nodes: usize,
    pub seed: u64,
    pub population_size: usize,
    pub coverage_radii: Vec<Length>,
    pub densify: Option<DensifyConfig>,
    pub top_hubs: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stops_path: PathBuf::from("stops.csv"),
            routes_path: PathBuf::from("routes.csv"),
            projection: ProjectionConfig::default(),
            network: NetworkConfig::projected(500.0),
            time_threshold: DEFAULT_TIME_THRESHOLD,
            synthetic_nodes: 5,
            seed: 42,
            population_size: 1_000,
            coverage_radii: [100.0, 200.0, 500.0, 1_000.0]
                .map(Length::meters)
                .to_vec(),
            densify: None,
            top_hubs: 5,
        }
    }
}

impl AnalysisConfig {
    /// Checks settings that do not depend on the loaded data
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for an empty population sample or an
    /// invalid UTM zone
    pub fn validate(&self) -> Result<(), Error> {
        if self.population_size == 0 {
            return Err(Error::InvalidConfig(
                "population_size must be at least 1".to_string(),
            ));
        }
        self.projection.projection()?;
        Ok(())
    }
}
