use crate::error::{PipelineError, Result};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub shapes: ShapesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_path")]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShapesConfig {
    /// How many materials the network view keeps, ranked by total weight
    #[serde(default = "default_top_materials")]
    pub top_materials: usize,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_source_path() -> String {
    "data/waste_records.csv".to_string()
}

fn default_top_materials() -> usize {
    10
}

fn default_output_dir() -> String {
    "output".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: default_source_path(),
        }
    }
}

impl Default for ShapesConfig {
    fn default() -> Self {
        Self {
            top_materials: default_top_materials(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            shapes: ShapesConfig::default(),
        }
    }
}

impl Config {
    pub fn load(config_path: &str) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path, e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_for_missing_sections() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.shapes.top_materials, 10);
        assert_eq!(config.source.path, "data/waste_records.csv");
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config: Config = toml::from_str("[shapes]\ntop_materials = 12\n").unwrap();
        assert_eq!(config.shapes.top_materials, 12);
        assert_eq!(config.shapes.output_dir, "output");
    }
}
