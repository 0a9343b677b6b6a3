//! Micro-benchmark harness
//!
//! Real measurements for the CLI `run` mode. Each benchmark closure is run in
//! calibrated batches until the time budget is spent, then summarised as
//! ops/sec plus mean, deviation and relative margin of error.
//!
//! A benchmark that returns an error is recorded as a failed entry with zero
//! throughput; the rest of the suite still runs.

pub mod compilation;
pub mod cpu;
pub mod gpu;
pub mod memory;
pub mod stats;

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::constants::harness::{MAX_SAMPLES, MAX_TIME_MS, MIN_SAMPLES, MIN_SAMPLE_TIME_MS};
use crate::error::BenchResult;
use crate::results::TestResult;

pub use compilation::CompilationBenchmark;
pub use cpu::CpuBenchmark;
pub use gpu::GpuBenchmark;
pub use memory::MemoryBenchmark;

/// Iteration counts stop doubling here even if a batch is still too fast
const MAX_BATCH_ITERATIONS: u64 = 1 << 24;

/// Timing budget for each benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub max_time_ms: u64,
    pub min_sample_time_ms: u64,
    pub min_samples: usize,
    pub max_samples: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            max_time_ms: MAX_TIME_MS,
            min_sample_time_ms: MIN_SAMPLE_TIME_MS,
            min_samples: MIN_SAMPLES,
            max_samples: MAX_SAMPLES,
        }
    }
}

impl HarnessConfig {
    fn max_time(&self) -> Duration {
        Duration::from_millis(self.max_time_ms)
    }

    fn min_sample_time(&self) -> Duration {
        Duration::from_millis(self.min_sample_time_ms)
    }
}

/// Runs and summarises individual benchmarks
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Measure one benchmark; failures become a zero-throughput entry
    pub fn measure<F>(&self, name: &str, mut f: F) -> TestResult
    where
        F: FnMut() -> BenchResult<()>,
    {
        match self.collect_samples(&mut f) {
            Ok(samples) => {
                let stats = stats::sample_stats(&samples);
                log::debug!(
                    "{}: {} samples, mean {:.3e}s ±{:.2}%",
                    name,
                    samples.len(),
                    stats.mean,
                    stats.margin
                );
                TestResult::new(name, stats::hz(stats.mean), stats)
            }
            Err(e) => {
                log::warn!("Benchmark '{}' failed: {}", name, e);
                TestResult::failed(name, e)
            }
        }
    }

    /// Per-operation times (seconds), one per sample
    fn collect_samples<F>(&self, f: &mut F) -> BenchResult<Vec<f64>>
    where
        F: FnMut() -> BenchResult<()>,
    {
        // Warm-up call doubles as an early failure check
        f()?;

        let min_sample_time = self.config.min_sample_time();
        let mut iterations = 1u64;
        loop {
            let elapsed = time_batch(f, iterations)?;
            if elapsed >= min_sample_time || iterations >= MAX_BATCH_ITERATIONS {
                break;
            }
            iterations *= 2;
        }

        let max_time = self.config.max_time();
        let min_samples = self.config.min_samples.max(1);
        let max_samples = self.config.max_samples.max(min_samples);
        let start = Instant::now();
        let mut samples = Vec::with_capacity(min_samples);

        while samples.len() < max_samples && (samples.len() < min_samples || start.elapsed() < max_time) {
            let elapsed = time_batch(f, iterations)?;
            samples.push(elapsed.as_secs_f64() / iterations as f64);
        }

        Ok(samples)
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(HarnessConfig::default())
    }
}

fn time_batch<F>(f: &mut F, iterations: u64) -> BenchResult<Duration>
where
    F: FnMut() -> BenchResult<()>,
{
    let start = Instant::now();
    for _ in 0..iterations {
        f()?;
    }
    Ok(start.elapsed())
}

/// A fixed, ordered group of benchmarks
pub trait BenchmarkSuite {
    /// Category label used in reports ("CPU", "Memory", ...)
    fn category(&self) -> &'static str;

    /// Human-readable descriptions for `list`
    fn descriptions(&self) -> &'static [&'static str];

    fn run(&self, harness: &Harness) -> Vec<TestResult>;
}

/// The suites the CLI knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuiteKind {
    Cpu,
    Memory,
    Compilation,
    Gpu,
}

impl SuiteKind {
    pub const ALL: [SuiteKind; 4] = [
        SuiteKind::Cpu,
        SuiteKind::Memory,
        SuiteKind::Compilation,
        SuiteKind::Gpu,
    ];

    /// Key under which results are stored in a saved report
    pub fn key(self) -> &'static str {
        match self {
            SuiteKind::Cpu => "cpu",
            SuiteKind::Memory => "memory",
            SuiteKind::Compilation => "compilation",
            SuiteKind::Gpu => "gpu",
        }
    }

    pub fn suite(self) -> Box<dyn BenchmarkSuite> {
        match self {
            SuiteKind::Cpu => Box::new(CpuBenchmark::new()),
            SuiteKind::Memory => Box::new(MemoryBenchmark::new()),
            SuiteKind::Compilation => Box::new(CompilationBenchmark::new()),
            SuiteKind::Gpu => Box::new(GpuBenchmark::new()),
        }
    }
}

#[cfg(test)]
pub(crate) fn quick_harness() -> Harness {
    Harness::new(HarnessConfig {
        max_time_ms: 5,
        min_sample_time_ms: 1,
        min_samples: 2,
        max_samples: 4,
    })
}
