//! # Ares Spawn
//!
//! Headless spawn picker. Loads a config, renders the minimap backdrop,
//! replays pointer input and prints the committed spawn coordinates.
//!
//! Usage: `ares-spawn [config.toml]`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod app;
mod config;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{EngineConfig, CONFIG_FILE};

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("ares=info".parse()?))
        .init();

    info!("Ares spawn picker starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_FILE.to_string());
    let config = EngineConfig::load_from(&path);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let point = runtime.block_on(app::run(&config))?;

    println!("{point}");
    info!("Spawn picker finished");
    Ok(())
}
