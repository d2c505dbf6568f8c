//! CLI Tooling
//!
//! Command-line interface for capacity-by-owner reporting: argument
//! parsing, config resolution, and the end-to-end pipeline (login, sample,
//! attribute owners, build the report).

use crate::client::{RestClient, SampleSource};
use crate::config::{AppConfig, ConfigLoader};
use crate::error::ReportError;
use crate::report::{self, ReportOptions};
use crate::sampling::{self, SamplingConfig};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Capsample CLI - per-owner storage estimation by capacity-weighted sampling
#[derive(Parser)]
#[command(name = "capsample")]
#[command(about = "Estimate per-owner storage use from capacity-weighted file samples")]
pub struct Cli {
    /// Directory to sample under
    pub path: String,

    /// The user to connect as
    #[arg(short = 'U', long)]
    pub user: Option<String>,

    /// The password to connect with
    #[arg(short = 'P', long)]
    pub password: Option<String>,

    /// The cluster to connect to
    #[arg(short = 'C', long)]
    pub cluster: Option<String>,

    /// The port to connect to
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// The number of samples to take
    #[arg(short = 's', long)]
    pub samples: Option<u64>,

    /// The number of concurrent requests to query with
    #[arg(short = 'c', long)]
    pub concurrency: Option<usize>,

    /// The minimum number of samples to show at a leaf in output
    #[arg(short = 'm', long)]
    pub min_samples: Option<u64>,

    /// The maximum number of leaves to show per owner
    #[arg(short = 'x', long)]
    pub max_leaves: Option<usize>,

    /// Show capacity in dollars. Set conversion factor in $/TB/month
    #[arg(short = 'D', long)]
    pub dollars_per_terabyte: Option<f64>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Resolved execution context: file/env config with CLI overrides applied.
pub struct CliContext {
    config: AppConfig,
    path: String,
}

impl CliContext {
    pub fn new(cli: &Cli) -> Result<Self, ReportError> {
        let mut config = ConfigLoader::load(cli.config.as_deref())?;
        if let Some(ref user) = cli.user {
            config.cluster.user = user.clone();
        }
        if let Some(ref password) = cli.password {
            config.cluster.password = password.clone();
        }
        if let Some(ref cluster) = cli.cluster {
            config.cluster.cluster = cluster.clone();
        }
        if let Some(port) = cli.port {
            config.cluster.port = port;
        }
        if let Some(samples) = cli.samples {
            config.sampling.samples = samples;
        }
        if let Some(concurrency) = cli.concurrency {
            config.sampling.concurrency = concurrency;
        }
        if let Some(min_samples) = cli.min_samples {
            config.report.min_samples = min_samples;
        }
        if let Some(max_leaves) = cli.max_leaves {
            config.report.max_leaves = max_leaves;
        }
        if cli.dollars_per_terabyte.is_some() {
            config.report.dollars_per_terabyte = cli.dollars_per_terabyte;
        }
        Ok(Self {
            config,
            path: cli.path.clone(),
        })
    }

    /// Run the full pipeline and return the report text.
    pub async fn execute(&self) -> Result<String, ReportError> {
        let cluster = &self.config.cluster;
        let client = Arc::new(RestClient::new(
            &cluster.cluster,
            cluster.port,
            cluster.accept_invalid_certs,
        )?);
        client.login(&cluster.user, &cluster.password).await?;

        let total_capacity = client.total_capacity(&self.path).await?;
        info!(total_capacity, path = %self.path, "aggregates fetched");

        let sampling_config = SamplingConfig {
            samples: self.config.sampling.samples,
            concurrency: self.config.sampling.concurrency,
        };
        let samples = sampling::gather(&client, &self.path, &sampling_config).await?;

        let options = ReportOptions {
            max_leaves: self.config.report.max_leaves,
            min_weight: self.config.report.min_samples,
            dollars_per_terabyte: self.config.report.dollars_per_terabyte,
        };
        report::build_report(&samples, sampling_config.samples, total_capacity, &options)
    }
}
