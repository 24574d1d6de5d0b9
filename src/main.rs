//! statdash: live statistics dashboard for the forward proxy.
//!
//! Run with:  `RUST_LOG=info statdash --endpoint http://proxy:3128/stat/stats.json`

use anyhow::{Context, Result};
use clap::Parser;
use statdash_app::Launch;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "statdash", version, about = "Live statistics dashboard for the proxy")]
struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/statdash/statdash.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Stats endpoint URL, overrides `poll.endpoint`.
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Poll interval in milliseconds, overrides `poll.interval_ms`.
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Structured logging; RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("statdash v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = args.config.unwrap_or_else(statdash_config::default_path);
    let mut config = statdash_config::load(&config_path)
        .with_context(|| format!("loading config from '{}'", config_path.display()))?;

    if let Some(endpoint) = args.endpoint {
        config.poll.endpoint = endpoint;
    }
    if let Some(interval_ms) = args.interval_ms {
        config.poll.interval_ms = interval_ms;
    }
    config.validate().context("invalid settings")?;

    statdash_app::run(Launch {
        config,
        config_path,
        prefs_path: statdash_config::default_prefs_path(),
    })
    .map_err(Into::into)
}
