//! benching-machine
//!
//! Compares JavaScript and WebAssembly delivery strategies. The score
//! simulator turns a configuration id into a fixed list of synthetic
//! measurements and is served over HTTP for the browser UI. The harness runs
//! real CPU, memory, compilation and GPU-class micro-benchmarks from the CLI.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod harness;
pub mod loader;
pub mod panic_handler;
pub mod report;
pub mod results;
pub mod server;
pub mod simulator;

pub use catalog::Configuration;
pub use config::BenchConfig;
pub use error::{BenchError, BenchResult};
pub use results::{TestResult, TestStats};
pub use simulator::{ConfigurationRun, RunResult, ScoreSimulator};
