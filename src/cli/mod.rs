//! CLI module for Auth Store
//!
//! Provides subcommands:
//! - `serve`: run the public and internal listeners
//! - `check`: validate a single credential and exit

pub mod check;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Auth Store - API key validation gateway
#[derive(Parser)]
#[command(name = "auth-store")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Additional configuration file, applied before environment overrides
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the validation service
    Serve,

    /// Validate one account/API key pair against the identity provider
    Check(check::CheckArgs),
}

/// Load, validate and log configuration, then install the tracing subscriber
pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load(config_path)?;
    config.validate()?;

    logging::init_logging(&config.logging)?;

    info!(
        host = %config.server.host,
        external_port = config.server.external_port,
        internal_port = config.server.internal_port,
        log_level = %config.logging.level,
        log_colors = config.logging.colors,
        cache_size = config.cache.size,
        identity_endpoint = %config.identity.endpoint,
        identity_timeout_secs = config.identity.timeout_secs,
        metrics_enabled = config.metrics.enabled,
        "Initializing with loaded settings."
    );

    Ok(config)
}
