//! `roadnet.toml` configuration.
//!
//! ```toml
//! [sampling]
//! seed = 42
//! load_sample_size = 10
//! efficiency_sample_size = 20
//!
//! [network]
//! path = "network.json"
//! synthetic_degree = 4
//! ```
//!
//! Every key is optional. Command-line flags override the file.

use anyhow::{Context, Result};
use roadnet_core::metrics::{DEFAULT_EFFICIENCY_SAMPLE_SIZE, DEFAULT_LOAD_SAMPLE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "roadnet.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub network: NetworkConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Fixed RNG seed. Unset means a fresh seed per run.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_load_sample_size")]
    pub load_sample_size: usize,
    #[serde(default = "default_efficiency_sample_size")]
    pub efficiency_sample_size: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            seed: None,
            load_sample_size: default_load_sample_size(),
            efficiency_sample_size: default_efficiency_sample_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network JSON used when neither `--network` nor `--synthetic` is given.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_synthetic_degree")]
    pub synthetic_degree: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            path: None,
            synthetic_degree: default_synthetic_degree(),
        }
    }
}

const fn default_load_sample_size() -> usize {
    DEFAULT_LOAD_SAMPLE_SIZE
}

const fn default_efficiency_sample_size() -> usize {
    DEFAULT_EFFICIENCY_SAMPLE_SIZE
}

const fn default_synthetic_degree() -> usize {
    4
}

/// Load configuration.
///
/// An explicit `path` must exist. Without one, `./roadnet.toml` is read if
/// present and defaults are used otherwise.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    if !required && !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str::<Config>(content)?)
}
