//! Layered configuration
//!
//! Precedence, lowest first: built-in defaults, then the TOML file (an
//! explicit `--config` path, or `bench.toml` in the working directory when
//! present), then `BENCH_*` environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::config::DEFAULT_CONFIG_FILE;
use crate::constants::server::{DEFAULT_HOST, DEFAULT_PORT, HOST_ENV, PORT_ENV};
use crate::error::{BenchError, BenchErrorContext, BenchResult};
use crate::harness::HarnessConfig;
use crate::loader::LoaderConfig;
use crate::simulator::ScoreSimulator;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Sleep before each simulated configuration
    pub simulate_latency: bool,
    /// Fixed seed for reproducible scores
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            simulate_latency: true,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    pub fn build(&self) -> ScoreSimulator {
        let simulator = match self.seed {
            Some(seed) => ScoreSimulator::with_seed(seed),
            None => ScoreSimulator::new(),
        };
        simulator.with_latency(self.simulate_latency)
    }
}

/// Top-level configuration, one section per subsystem
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub server: ServerConfig,
    pub simulator: SimulatorConfig,
    pub harness: HarnessConfig,
    pub loader: LoaderConfig,
}

impl BenchConfig {
    /// Resolve the file layer, then apply process environment overrides
    pub fn load(explicit: Option<&Path>) -> BenchResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE)?,
            None => {
                log::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                Self::default()
            }
        };

        config.apply_overrides(&|key: &str| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> BenchResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).io_context(path)?;
        let config = Self::from_toml(&content).map_err(|message| BenchError::Config {
            path: path.to_path_buf(),
            message,
        })?;

        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Apply `BENCH_*` overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: &F) -> BenchResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port.trim().parse().map_err(|_| BenchError::Config {
                path: PathBuf::from(PORT_ENV),
                message: format!("'{}' is not a valid port", port),
            })?;
        }

        if let Some(host) = lookup(HOST_ENV) {
            self.server.host = host;
        }

        self.loader.apply_overrides(lookup);
        Ok(())
    }
}
