//! Standalone HTTP server for the score simulator
//! Reads bench.toml and BENCH_* overrides like `benching-machine serve`

use anyhow::{Context, Result};

use benching_machine::config::BenchConfig;
use benching_machine::panic_handler;
use benching_machine::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    panic_handler::install_panic_handler();

    let config = BenchConfig::load(None).context("Failed to load configuration")?;
    let simulator = config.simulator.build();
    log::info!(
        "Simulator latency {}",
        if simulator.simulates_latency() { "on" } else { "off" }
    );

    let state = AppState::new(simulator);
    server::serve(&config.server, state).await?;
    Ok(())
}
