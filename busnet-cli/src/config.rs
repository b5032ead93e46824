use std::error::Error;
use std::fs;
use std::path::Path;

use busnet::AnalysisConfig;

/// Reads an analysis config from TOML.
///
/// Relative table paths are taken relative to the directory of the config
/// file.
pub fn load_config(path: &Path) -> Result<AnalysisConfig, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config '{}': {e}", path.display()))?;
    let mut config = parse_config(&text)?;

    if let Some(base) = path.parent() {
        if config.stops_path.is_relative() {
            config.stops_path = base.join(&config.stops_path);
        }
        if config.routes_path.is_relative() {
            config.routes_path = base.join(&config.routes_path);
        }
    }
    Ok(config)
}

pub fn parse_config(text: &str) -> Result<AnalysisConfig, Box<dyn Error>> {
    let config: AnalysisConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}
