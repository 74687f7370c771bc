use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sable_engine::EngineConfig;
use sable_uci::UciEngine;

fn main() -> Result<()> {
    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = EngineConfig::from_env();
    info!(?config, "sable starting");

    let engine = UciEngine::new(config).context("failed to initialise engine")?;
    engine.run().context("UCI loop failed")?;
    Ok(())
}
