//! Result records shared by the score simulator and the real harness

use serde::{Deserialize, Serialize};

/// Summary statistics attached to every test result
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TestStats {
    /// Seconds per operation (simulated results: base score / 1e6)
    pub mean: f64,
    /// Sample standard deviation of `mean`
    pub deviation: f64,
    /// Relative margin of error, percent
    pub margin: f64,
}

/// One named measurement within a suite or configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub name: String,
    pub ops_per_sec: f64,
    pub stats: TestStats,
    /// Set when the benchmark could not run; `ops_per_sec` is then zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TestResult {
    pub fn new(name: impl Into<String>, ops_per_sec: f64, stats: TestStats) -> Self {
        Self {
            name: name.into(),
            ops_per_sec,
            stats,
            error: None,
        }
    }

    /// Entry for a benchmark that failed; keeps the aggregate shape intact
    pub fn failed(name: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self {
            name: name.into(),
            ops_per_sec: 0.0,
            stats: TestStats::default(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_are_camel_case() {
        let result = TestResult::new(
            "Prime Check",
            85_123.0,
            TestStats {
                mean: 0.085,
                deviation: 0.01,
                margin: 2.0,
            },
        );
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["opsPerSec"], 85_123.0);
        assert_eq!(value["stats"]["margin"], 2.0);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_failed_entry() {
        let result = TestResult::failed("WASM Compilation (Real)", "runtime unavailable");
        assert!(result.is_failure());
        assert_eq!(result.ops_per_sec, 0.0);
        assert_eq!(result.stats, TestStats::default());

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["error"], "runtime unavailable");
    }
}
