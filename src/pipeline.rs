use busnet_core::algo::{
    NetworkStats, augment_network, calculate_accessibility, coverage_ratios, densify,
    sample_population, synthetic_node_ids, top_hubs,
};
use busnet_core::loading::{load_routes, load_stops};
use busnet_core::{CoordinateSystem, Error, Route, StopTable, build_network};
use log::info;

use crate::config::AnalysisConfig;
use crate::report::AnalysisReport;

/// Loads the tables named in `config` and runs [`analyze`] on them
///
/// # Errors
///
/// Returns I/O errors for unreadable tables, and everything [`analyze`]
/// returns
pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisReport, Error> {
    config.validate()?;
    let stops = load_stops(&config.stops_path, CoordinateSystem::Geographic)?;
    let routes = load_routes(&config.routes_path)?;
    analyze(config, &stops, &routes)
}

/// Runs the full study on loaded tables.
///
/// The stop table is projected if configured, the network built and
/// optionally densified. Reachability is measured on that stop network,
/// before synthetic nodes are added. Coverage is measured on the augmented
/// network.
///
/// # Errors
///
/// Returns a configuration error if a threshold does not fit the coordinate
/// system of the stops, and [`Error::EmptyNetwork`] if no stop is usable
pub fn analyze(
    config: &AnalysisConfig,
    stops: &StopTable,
    routes: &[Route],
) -> Result<AnalysisReport, Error> {
    config.validate()?;
    let projected;
    let stops = match config.projection.projection()? {
        Some(utm) if stops.crs() == CoordinateSystem::Geographic => {
            info!("Projecting stops into UTM zone {}", utm.zone());
            projected = stops.reproject(&utm)?;
            &projected
        }
        _ => stops,
    };

    let mut network = build_network(stops, routes, &config.network)?;
    let base_stats = NetworkStats::compute(&network);

    let mut densify_summary = None;
    if let Some(densify_config) = &config.densify {
        let (densified, summary) =
            densify(&network, routes, stops.stops(), &config.network, densify_config)?;
        network = densified;
        densify_summary = Some(summary);
    }

    let accessibility = calculate_accessibility(&network, config.time_threshold)?;
    network = augment_network(&network, config.synthetic_nodes, config.seed)?;

    let population = sample_population(&network, config.population_size, config.seed)?;
    let coverage = coverage_ratios(&network, &population, &config.coverage_radii)?;

    let report = AnalysisReport {
        base_stats,
        stats: NetworkStats::compute(&network),
        hubs: top_hubs(&network, config.top_hubs),
        densify: densify_summary,
        synthetic_nodes: synthetic_node_ids(&network),
        accessibility,
        coverage,
        network,
    };
    info!("Analysis finished for {} nodes", report.stats.node_count);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use busnet_core::algo::DensifyConfig;
    use busnet_core::loading::{read_routes, read_stops};
    use busnet_core::{EdgeKind, Length, NetworkConfig};

    use super::*;
    use crate::config::ProjectionConfig;

    // Four stops along a north-south street in Baltimore, about 110 m apart
    const STOPS: &str = "\
stop_id,Y,X,Routes_Ser
1,39.2900,-76.6100,\"CityLink Blue\"
2,39.2910,-76.6100,\"CityLink Blue, 22\"
3,39.2920,-76.6100,22
4,39.2930,-76.6100,\"22, 26\"
";

    const ROUTES: &str = "\
Route_Name,Route_Numb,Route_Type
Blue,CityLink Blue,MTA Local Bus - CityLink
Twenty Two,22,MTA Local Bus - LocalLink
";

    fn tables() -> (StopTable, Vec<Route>) {
        (
            read_stops(STOPS.as_bytes(), CoordinateSystem::Geographic),
            read_routes(ROUTES.as_bytes()),
        )
    }

    #[test]
    fn default_study_runs_in_utm() {
        let (stops, routes) = tables();
        let config = AnalysisConfig {
            network: NetworkConfig::projected(50.0),
            ..AnalysisConfig::default()
        };
        let report = analyze(&config, &stops, &routes).unwrap();

        assert_eq!(report.network.crs(), CoordinateSystem::Projected);
        assert_eq!(report.base_stats.node_count, 4);
        assert_eq!(report.base_stats.transit_edges, 3);
        assert_eq!(report.stats.node_count, 9);
        assert_eq!(report.stats.synthetic_edges, 5);
        assert_eq!(report.synthetic_nodes, vec!["5", "6", "7", "8", "9"]);
        assert_eq!(report.accessibility.nodes.len(), 4);
        for id in &report.synthetic_nodes {
            assert_eq!(report.accessibility.get(id), None);
        }
        assert_eq!(report.coverage.len(), 4);
        assert!(report.coverage.windows(2).all(|w| w[0].ratio <= w[1].ratio));
        assert_relative_eq!(report.coverage[3].ratio, 1.0);
    }

    #[test]
    fn same_seed_same_report() {
        let (stops, routes) = tables();
        let config = AnalysisConfig {
            network: NetworkConfig::projected(50.0),
            ..AnalysisConfig::default()
        };
        let first = analyze(&config, &stops, &routes).unwrap();
        let second = analyze(&config, &stops, &routes).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn geographic_study_needs_degree_thresholds() {
        let (stops, routes) = tables();
        let meters = AnalysisConfig {
            projection: ProjectionConfig::None,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            analyze(&meters, &stops, &routes),
            Err(Error::UnitMismatch { .. })
        ));

        let degrees = AnalysisConfig {
            projection: ProjectionConfig::None,
            network: NetworkConfig::default(),
            coverage_radii: vec![Length::degrees(0.001), Length::degrees(1.0)],
            synthetic_nodes: 0,
            ..AnalysisConfig::default()
        };
        let report = analyze(&degrees, &stops, &routes).unwrap();
        assert_eq!(report.network.crs(), CoordinateSystem::Geographic);
        assert!(report.synthetic_nodes.is_empty());
        assert_relative_eq!(report.coverage[1].ratio, 1.0);
    }

    #[test]
    fn densification_is_reported() {
        let (stops, routes) = tables();
        let config = AnalysisConfig {
            network: NetworkConfig::projected(50.0),
            densify: Some(DensifyConfig {
                degree_threshold: 0,
                ..DensifyConfig::default()
            }),
            synthetic_nodes: 0,
            ..AnalysisConfig::default()
        };
        let report = analyze(&config, &stops, &routes).unwrap();
        let summary = report.densify.unwrap();

        // Route 22 serves 2, 3, 4: one skip link 2 - 4
        assert_eq!(summary.skip_stop_links, 1);
        assert_eq!(
            report.network.edge_between("2", "4").map(|e| e.kind),
            Some(EdgeKind::Transit)
        );
        assert!(report.to_string().contains("base network had 4 nodes"));
    }

    #[test]
    fn densified_links_use_the_network_bus_speed() {
        let (stops, routes) = tables();
        let config = AnalysisConfig {
            network: NetworkConfig {
                bus_speed: 2.0,
                ..NetworkConfig::projected(50.0)
            },
            densify: Some(DensifyConfig {
                degree_threshold: 0,
                ..DensifyConfig::default()
            }),
            synthetic_nodes: 0,
            ..AnalysisConfig::default()
        };
        let report = analyze(&config, &stops, &routes).unwrap();
        let weight = |a, b| report.network.edge_between(a, b).unwrap().weight;

        // About 111 m per hop at 2 m/s
        assert!((50.0..60.0).contains(&weight("2", "3")));
        assert_relative_eq!(
            weight("2", "4"),
            weight("2", "3") + weight("3", "4"),
            max_relative = 1e-3
        );
    }

    #[test]
    fn missing_files_are_io_errors() {
        let config = AnalysisConfig {
            stops_path: "does/not/exist.csv".into(),
            ..AnalysisConfig::default()
        };
        assert!(matches!(run_analysis(&config), Err(Error::IoError(_))));
    }
}
