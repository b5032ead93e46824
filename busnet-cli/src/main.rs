use std::error::Error;
use std::fs;
use std::path::PathBuf;

use busnet::run_analysis;
use busnet_core::export::network_to_geojson_string;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

#[derive(Debug, Parser)]
#[command(
    name = "busnet-cli",
    about = "Build a bus network from stop and route tables and measure its accessibility"
)]
struct Cli {
    /// Analysis config in TOML
    #[arg(long)]
    config: PathBuf,

    /// Write the JSON report here instead of only printing a summary
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the final network as GeoJSON
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// Override the seed for synthetic nodes and population sampling
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut analysis = config::load_config(&cli.config)?;
    if let Some(seed) = cli.seed {
        analysis.seed = seed;
    }

    info!(
        stops = %analysis.stops_path.display(),
        routes = %analysis.routes_path.display(),
        seed = analysis.seed,
        "Starting analysis"
    );
    let report = run_analysis(&analysis)?;
    print!("{report}");

    if let Some(path) = &cli.output {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        info!("Report written to {}", path.display());
    }
    if let Some(path) = &cli.geojson {
        let geojson = network_to_geojson_string(&report.network, Some(&report.accessibility))?;
        fs::write(path, geojson)?;
        info!("Network written to {}", path.display());
    }
    Ok(())
}
