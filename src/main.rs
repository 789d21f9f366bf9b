//! # Sensor Feed
//!
//! Live rolling feed of synthesized environmental, power and location
//! sensor readings.
//!
//! The feed seeds a bounded window with a small backlog, then generates
//! and ingests one reading per tick, always retaining only the most
//! recent N readings, newest-first. Every updated snapshot is rendered
//! to the terminal.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber;

mod config;
mod error;
mod reading;
mod generator;
mod feed;
mod display;

use config::Config;
use display::{OutputFormat, Renderer};
use feed::Feed;
use generator::SampleGenerator;

/// Configuration path used when none is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main entry point for the Sensor Feed viewer
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration (CLI argument, default path, or built-in defaults)
///    - Seed the rolling window and start the periodic producer
///
/// 2. **Main Loop**
///    - Wait for the next published window snapshot
///    - Render it (text or jsonl, per configuration)
///    - Handle Ctrl+C for graceful shutdown
///
/// 3. **Graceful Shutdown**
///    - Tear the feed down (stops the producer timer)
///    - Log the readings retained at exit
///
/// # Errors
///
/// Returns error if the configuration file exists but cannot be parsed or
/// fails validation, or if rendering to stdout fails.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .init();

    info!("Sensor Feed v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    let format = OutputFormat::parse(&config.display.format).unwrap_or_default();

    let mut feed = Feed::new(&config, SampleGenerator::from_config(config.generator.clone()));
    feed.initialize();
    let mut updates = feed.subscribe();

    let mut renderer = Renderer::new(std::io::stdout(), format);
    renderer.render_view(&updates.borrow_and_update().clone())?;

    info!(
        "Streaming readings every {}ms, retaining the latest {}",
        config.feed.tick_interval_ms, config.feed.window_capacity
    );
    info!("Press Ctrl+C to exit");

    // Main display loop
    loop {
        tokio::select! {
            // Render each updated snapshot as the producer publishes it
            changed = updates.changed() => {
                if changed.is_err() {
                    debug!("feed update channel closed");
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                renderer.render_view(&snapshot)?;
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    let retained = feed.current_view().len();
    feed.teardown();
    info!("Feed stopped with {} reading(s) retained", retained);

    Ok(())
}

/// Loads configuration from the CLI argument or default path.
///
/// A missing file at the default path is not an error; built-in defaults
/// apply. An explicitly named file must exist and parse.
fn load_config() -> Result<Config> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            Ok(Config::load(path)?)
        }
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            info!("Loading configuration from {}", DEFAULT_CONFIG_PATH);
            Ok(Config::load(DEFAULT_CONFIG_PATH)?)
        }
        None => {
            debug!("No configuration file found, using built-in defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path() {
        assert_eq!(DEFAULT_CONFIG_PATH, "config/default.toml");
    }

    #[test]
    fn test_default_format_parses() {
        let config = Config::default();
        assert_eq!(
            OutputFormat::parse(&config.display.format),
            Some(OutputFormat::Text)
        );
    }
}
