//! Configuration loading for the casf binary.
//! Reads casf.toml from `--config`, the path in the CASF_CONFIG env var, or
//! the current directory. Every field has a default, so the file is optional.

use std::path::{Path, PathBuf};

use anyhow::Context;
use casf_io::PlotOptions;
use casf_metrics::DockingPowerConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_CONFIG_FILE: &str = "casf.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub docking_power: DockingPowerConfig,
    #[serde(default)]
    pub plot: PlotOptions,
}


impl Config {
    /// Load configuration, falling back to defaults when no file is present.
    /// A path given explicitly on the command line must exist.
    pub fn load_or_default(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let (path, from_env) = match explicit {
            Some(path) => (path.to_path_buf(), false),
            None => match std::env::var("CASF_CONFIG") {
                Ok(path) => (PathBuf::from(path), true),
                Err(_) => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
            },
        };

        if !path.exists() {
            if explicit.is_some() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            if from_env {
                warn!("CASF_CONFIG points to missing file {}; using defaults", path.display());
            } else {
                debug!("No {} in the current directory; using defaults", DEFAULT_CONFIG_FILE);
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.docking_power.validate()?;
        Ok(config)
    }
}
