//! Console formatting, JSON persistence and run-to-run comparison

pub mod format;

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{json_error, BenchErrorContext, BenchResult};
use crate::results::TestResult;

pub use format::{format_number, format_results, render_comparison, render_results};

/// Output of one CLI `run`: suite key -> results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub timestamp: String,
    pub benchmarks: BTreeMap<String, Vec<TestResult>>,
}

impl BenchmarkReport {
    pub fn new() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            benchmarks: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, results: Vec<TestResult>) {
        self.benchmarks.insert(key.into(), results);
    }
}

impl Default for BenchmarkReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-test change between two reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Difference {
    pub name: String,
    pub ops_per_sec1: f64,
    pub ops_per_sec2: f64,
    /// `None` when the baseline is zero (failed or empty)
    pub percent_change: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub timestamp1: String,
    pub timestamp2: String,
    pub differences: BTreeMap<String, Vec<Difference>>,
}

/// Index-aligned comparison; categories absent from `second` are skipped
pub fn compare_results(first: &BenchmarkReport, second: &BenchmarkReport) -> Comparison {
    let mut differences = BTreeMap::new();

    for (category, baseline) in &first.benchmarks {
        let Some(current) = second.benchmarks.get(category) else {
            continue;
        };

        let diffs = baseline
            .iter()
            .zip(current.iter())
            .map(|(a, b)| Difference {
                name: a.name.clone(),
                ops_per_sec1: a.ops_per_sec,
                ops_per_sec2: b.ops_per_sec,
                percent_change: (a.ops_per_sec != 0.0)
                    .then(|| (b.ops_per_sec - a.ops_per_sec) / a.ops_per_sec * 100.0),
            })
            .collect();
        differences.insert(category.clone(), diffs);
    }

    Comparison {
        timestamp1: first.timestamp.clone(),
        timestamp2: second.timestamp.clone(),
        differences,
    }
}

/// Pretty-printed JSON
pub fn save_results<T: Serialize>(results: &T, path: impl AsRef<Path>) -> BenchResult<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(results).map_err(|e| json_error(path.display().to_string(), e))?;
    std::fs::write(path, json).io_context(path)?;
    log::info!("Saved results to {}", path.display());
    Ok(())
}

pub fn load_results<T: DeserializeOwned>(path: impl AsRef<Path>) -> BenchResult<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).io_context(path)?;
    serde_json::from_str(&content).map_err(|e| json_error(path.display().to_string(), e))
}
