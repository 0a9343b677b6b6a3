//! CLI command definitions

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::execute;

/// Compare JavaScript and WebAssembly delivery strategies
#[derive(Debug, Parser)]
#[command(name = "benching-machine", author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to ./bench.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the real micro-benchmarks (all suites when none is selected)
    Run {
        /// CPU suite
        #[arg(short, long)]
        cpu: bool,

        /// Memory suite
        #[arg(short, long)]
        memory: bool,

        /// Compilation suite
        #[arg(short = 't', long)]
        compilation: bool,

        /// GPU-class suite
        #[arg(short, long)]
        gpu: bool,

        /// Save results as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the available micro-benchmarks
    List,

    /// Simulate scores for configuration ids, in order
    Simulate {
        #[arg(required = true)]
        ids: Vec<String>,

        /// Skip the artificial per-configuration delay
        #[arg(long)]
        no_latency: bool,

        /// Fixed seed for reproducible scores
        #[arg(long)]
        seed: Option<u64>,

        /// Save the run as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the configuration catalog
    Configs,

    /// Compare two saved `run` reports
    Compare { first: PathBuf, second: PathBuf },

    /// Try to load the WebAssembly artifact behind each id
    Probe {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Start the HTTP server
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
}

impl Commands {
    /// Suites selected by `run`'s flags; empty selection means all
    pub fn selected_suites(cpu: bool, memory: bool, compilation: bool, gpu: bool) -> Vec<crate::harness::SuiteKind> {
        use crate::harness::SuiteKind;

        let picked: Vec<SuiteKind> = [
            (cpu, SuiteKind::Cpu),
            (memory, SuiteKind::Memory),
            (compilation, SuiteKind::Compilation),
            (gpu, SuiteKind::Gpu),
        ]
        .into_iter()
        .filter_map(|(on, kind)| on.then_some(kind))
        .collect();

        if picked.is_empty() {
            SuiteKind::ALL.to_vec()
        } else {
            picked
        }
    }
}
