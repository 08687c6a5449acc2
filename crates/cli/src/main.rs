//! Unknown Fallback - Main Entry Point
//!
//! Usage: `unknown-fallback [config.toml] < utterances.txt`

use anyhow::Context;
use cli::{build_fallback, init_logging, parse_input, AppConfig};
use metrics_exporter_prometheus::PrometheusBuilder;
use skill_host::ChannelBus;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;

    init_logging(&config.log_level)?;
    info!("=== Unknown Fallback v{} ===", env!("CARGO_PKG_VERSION"));

    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install metrics recorder")?;

    let (bus, mut rx) = ChannelBus::new();
    let drain = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            match serde_json::to_string(&message) {
                Ok(json) => println!("bus: {}", json),
                Err(e) => error!("Failed to serialize bus message: {}", e),
            }
        }
    });

    let fallback = build_fallback(&config, bus);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(message) = parse_input(&line, config.assume_addressed) else {
            continue;
        };
        match fallback.handle(&message) {
            Ok(outcome) => println!("{:?}", outcome),
            Err(e) => error!("Fallback failed: {}", e),
        }
    }

    // Closes the bus so the drain task finishes
    drop(fallback);
    drain.await?;

    if config.print_metrics {
        eprintln!("{}", metrics.render());
    }

    info!("Input closed, exiting");
    Ok(())
}
