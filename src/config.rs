//! Configuration loading.
//!
//! Precedence, lowest to highest: built-in defaults, an optional TOML file,
//! a `CAPSAMPLE_*` environment overlay (`__` separates nested keys, e.g.
//! `CAPSAMPLE_CLUSTER__PASSWORD`), then CLI flags applied by the CLI layer.

use crate::error::ReportError;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Connection settings for the cluster REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    #[serde(default = "default_cluster")]
    pub cluster: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_credential")]
    pub user: String,

    #[serde(default = "default_credential")]
    pub password: String,

    /// Skip TLS verification; clusters commonly run self-signed certificates.
    #[serde(default = "default_true")]
    pub accept_invalid_certs: bool,
}

/// Sampling volume and parallelism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingDefaults {
    #[serde(default = "default_samples")]
    pub samples: u64,

    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

/// Per-owner tree display budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDefaults {
    /// Maximum number of leaves to show per owner.
    #[serde(default = "default_max_leaves")]
    pub max_leaves: usize,

    /// Minimum number of samples to show at a leaf.
    #[serde(default = "default_min_samples")]
    pub min_samples: u64,

    /// Show capacity in dollars at this $/TB/month conversion rate.
    #[serde(default)]
    pub dollars_per_terabyte: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub cluster: ClusterConfig,

    #[serde(default)]
    pub sampling: SamplingDefaults,

    #[serde(default)]
    pub report: ReportDefaults,
}

fn default_cluster() -> String {
    "qumulo".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_credential() -> String {
    "admin".to_string()
}

fn default_true() -> bool {
    true
}

fn default_samples() -> u64 {
    2000
}

fn default_concurrency() -> usize {
    10
}

fn default_max_leaves() -> usize {
    30
}

fn default_min_samples() -> u64 {
    5
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            cluster: default_cluster(),
            port: default_port(),
            user: default_credential(),
            password: default_credential(),
            accept_invalid_certs: default_true(),
        }
    }
}

impl Default for SamplingDefaults {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            concurrency: default_concurrency(),
        }
    }
}

impl Default for ReportDefaults {
    fn default() -> Self {
        Self {
            max_leaves: default_max_leaves(),
            min_samples: default_min_samples(),
            dollars_per_terabyte: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cluster: ClusterConfig::default(),
            sampling: SamplingDefaults::default(),
            report: ReportDefaults::default(),
        }
    }
}

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration, optionally from a specific file, with the
    /// environment overlay applied on top.
    pub fn load(file: Option<&Path>) -> Result<AppConfig, ReportError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            let path = path.to_str().ok_or_else(|| {
                ReportError::ConfigError("config file path is not valid UTF-8".to_string())
            })?;
            builder = builder.add_source(File::with_name(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix("CAPSAMPLE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_the_cli_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.cluster.cluster, "qumulo");
        assert_eq!(config.cluster.port, 8000);
        assert_eq!(config.sampling.samples, 2000);
        assert_eq!(config.sampling.concurrency, 10);
        assert_eq!(config.report.max_leaves, 30);
        assert_eq!(config.report.min_samples, 5);
        assert!(config.report.dollars_per_terabyte.is_none());
    }
}
