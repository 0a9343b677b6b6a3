// Benching Machine Constants - SINGLE SOURCE OF TRUTH
//
// Every tunable number shared between the simulator, the harness, the
// server and the CLI lives here. Lookup tables keyed by configuration id
// live in `simulator::tables`, not here.

/// Score simulator timing and shaping
pub mod simulation {
    /// Base artificial delay for every simulated run (ms)
    pub const BASE_DELAY_MS: u64 = 800;

    /// Upper bound (exclusive) of the uniform delay jitter (ms)
    pub const DELAY_JITTER_MS: f64 = 800.0;

    /// Fixed margin reported for every simulated test (percent)
    pub const SIMULATED_MARGIN: f64 = 2.0;

    /// Scores are reported in ops/sec; stats are scaled down by this
    pub const STATS_SCALE: f64 = 1_000_000.0;

    /// Base score of the load test for ids without an override
    pub const DEFAULT_LOAD_SCORE: f64 = 150_000.0;
}

/// HTTP server defaults
pub mod server {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 4000;

    /// Environment overrides
    pub const PORT_ENV: &str = "BENCH_SERVER_PORT";
    pub const HOST_ENV: &str = "BENCH_SERVER_HOST";

    pub const INVALID_CONFIGS_MESSAGE: &str = r#"Please provide configs: ["id1","id2"]"#;
}

/// Micro-benchmark harness defaults
pub mod harness {
    /// Total time budget per benchmark (ms)
    pub const MAX_TIME_MS: u64 = 1_000;

    /// Minimum wall time of one sample (ms); iteration counts grow until met
    pub const MIN_SAMPLE_TIME_MS: u64 = 10;

    /// A benchmark keeps sampling past its budget until it has this many
    pub const MIN_SAMPLES: usize = 5;

    /// Hard cap on samples per benchmark
    pub const MAX_SAMPLES: usize = 200;

    /// Two-tailed 95% Student-t critical values, df 1..=30
    pub const T_TABLE: [f64; 30] = [
        12.706, 4.303, 3.182, 2.776, 2.571, 2.447, 2.365, 2.306, 2.262, 2.228,
        2.201, 2.179, 2.16, 2.145, 2.131, 2.12, 2.11, 2.101, 2.093, 2.086,
        2.08, 2.074, 2.069, 2.064, 2.06, 2.056, 2.052, 2.048, 2.045, 2.042,
    ];

    /// Critical value beyond the table
    pub const T_INFINITY: f64 = 1.96;
}

/// Module loader defaults
pub mod loader {
    pub const DEFAULT_ARTIFACT_ROOT: &str = "public";
    pub const ARTIFACT_ROOT_ENV: &str = "BENCH_ARTIFACT_ROOT";
}

/// Config file defaults
pub mod config {
    pub const DEFAULT_CONFIG_FILE: &str = "bench.toml";
}
