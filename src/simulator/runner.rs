use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::constants::simulation::{BASE_DELAY_MS, DELAY_JITTER_MS, SIMULATED_MARGIN, STATS_SCALE};
use crate::results::{TestResult, TestStats};
use crate::simulator::tables::{self, TestKind};

/// One configuration's entry in a run: the catalog record plus its tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationRun {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub tests: Vec<TestResult>,
}

impl ConfigurationRun {
    /// Unknown ids are still runnable; they carry their id as the name
    fn for_id(id: &str, tests: Vec<TestResult>) -> Self {
        match catalog::find(id) {
            Some(config) => Self {
                id: config.id.to_string(),
                name: config.name.to_string(),
                desc: Some(config.desc.to_string()),
                color: Some(config.color.to_string()),
                tests,
            },
            None => Self {
                id: id.to_string(),
                name: id.to_string(),
                desc: None,
                color: None,
                tests,
            },
        }
    }
}

/// Aggregate result of one `run_many` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// RFC 3339 with milliseconds, UTC
    pub timestamp: String,
    pub configurations: Vec<ConfigurationRun>,
}

/// Shape one synthetic measurement: `round(base + random * variance)`
pub fn generate_result<R: Rng + ?Sized>(rng: &mut R, base: f64, variance: f64, name: &str) -> TestResult {
    let ops_per_sec = (base + rng.gen::<f64>() * variance).round();
    let mean = if base != 0.0 { base / STATS_SCALE } else { 0.0 };

    TestResult::new(
        name,
        ops_per_sec,
        TestStats {
            mean,
            deviation: variance / STATS_SCALE,
            margin: SIMULATED_MARGIN,
        },
    )
}

/// Stands in for a benchmark run: table lookups, jitter and a fake delay
pub struct ScoreSimulator {
    rng: Mutex<StdRng>,
    simulate_latency: bool,
}

impl ScoreSimulator {
    /// Simulator seeded from OS entropy, with artificial latency
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            simulate_latency: true,
        }
    }

    /// Reproducible simulator for tests and demos
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            simulate_latency: true,
        }
    }

    /// Enable or disable the artificial per-configuration delay
    pub fn with_latency(mut self, simulate_latency: bool) -> Self {
        self.simulate_latency = simulate_latency;
        self
    }

    pub fn simulates_latency(&self) -> bool {
        self.simulate_latency
    }

    pub fn multiplier_for(&self, id: &str) -> f64 {
        tables::multiplier_for(id)
    }

    /// Base delay + id constant + uniform jitter
    pub fn simulate_delay(&self, id: &str) -> Duration {
        let jitter = self.rng.lock().gen::<f64>() * DELAY_JITTER_MS;
        let base = BASE_DELAY_MS + tables::startup_delay_ms(id);
        Duration::from_millis(base) + Duration::from_secs_f64(jitter / 1000.0)
    }

    /// The synchronous half of a run: one result per test, in order
    pub fn sample_tests(&self, id: &str) -> Vec<TestResult> {
        let mut rng = self.rng.lock();
        TestKind::ALL
            .iter()
            .map(|&test| {
                generate_result(
                    &mut *rng,
                    tables::adjusted_base(id, test),
                    test.variance(),
                    test.name(),
                )
            })
            .collect()
    }

    /// Simulate a single configuration
    pub async fn run_one(&self, id: &str) -> Vec<TestResult> {
        if self.simulate_latency {
            let delay = self.simulate_delay(id);
            log::debug!("Simulating {} for {:?}", id, delay);
            tokio::time::sleep(delay).await;
        }
        self.sample_tests(id)
    }

    /// Simulate each id in order, one at a time
    pub async fn run_many<S: AsRef<str>>(&self, ids: &[S]) -> RunResult {
        self.run_many_with_progress(ids, |_, _| {}).await
    }

    /// Like `run_many`, reporting each configuration as soon as it completes
    pub async fn run_many_with_progress<S, F>(&self, ids: &[S], mut on_complete: F) -> RunResult
    where
        S: AsRef<str>,
        F: FnMut(usize, &ConfigurationRun),
    {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut configurations = Vec::with_capacity(ids.len());

        for (index, id) in ids.iter().enumerate() {
            let id = id.as_ref();
            let tests = self.run_one(id).await;
            let run = ConfigurationRun::for_id(id, tests);
            on_complete(index, &run);
            configurations.push(run);
        }

        log::info!("Simulated {} configuration(s)", configurations.len());

        RunResult {
            timestamp,
            configurations,
        }
    }
}

impl Default for ScoreSimulator {
    fn default() -> Self {
        Self::new()
    }
}
