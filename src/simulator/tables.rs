//! Fixed lookup tables behind the score simulator
//!
//! Everything here is a constant keyed by configuration id. The numbers are
//! presentation tuning carried over value-for-value; none of them is derived
//! from a model.

use crate::constants::simulation::DEFAULT_LOAD_SCORE;

/// Configuration id -> score multiplier. Ids not listed run at 1.0.
pub static MULTIPLIERS: &[(&str, f64)] = &[
    ("js_inline", 1.0),
    ("js_external", 1.05),
    ("js_wasm_std", 2.5),
    ("js_terser", 1.05),
    ("js_closure", 1.4),
    ("js_roadroller", 1.0),
    ("js_bigint", 0.8),
    ("wasm_i64", 2.8),
    ("wasm_rust", 2.5),
    ("wasm_cheerp", 2.45),
    ("wasm_as", 2.3),
    ("wasm_asc", 2.3),
    ("wasm_asc_opt", 2.8),
    ("wasm_opt", 2.8),
    ("wasmedge_aot", 4.5),
    ("wasm_simd", 3.5),
    ("wasm_threads", 4.0),
    ("wasm_openmp", 4.2),
    ("wasm_max", 5.5),
    ("webgl_compute", 15.0),
    ("webgpu_compute", 25.0),
    ("utf16_1ijs", 2.6),
    ("utf16_html", 2.7),
];

/// Configuration id -> base score of the load test
pub static LOAD_SCORES: &[(&str, f64)] = &[
    ("wasmedge_aot", 200_000.0),
    ("js_closure", 190_000.0),
    ("js_roadroller", 50_000.0),
    // shader compilation
    ("webgl_compute", 100_000.0),
    ("webgpu_compute", 80_000.0),
];

/// Configuration id -> extra artificial startup delay (ms)
pub static STARTUP_DELAYS_MS: &[(&str, u64)] = &[("utf16_html", 100), ("utf16_1ijs", 50)];

pub static GPU_IDS: &[&str] = &["webgl_compute", "webgpu_compute"];

pub static WASM_THREAD_IDS: &[&str] = &[
    "js_wasm_std",
    "utf16_1ijs",
    "utf16_html",
    "wasm_threads",
    "wasm_simd",
    "wasm_rust",
    "wasm_as",
    "wasm_cheerp",
    "wasm_max",
];

pub static OPENMP_IDS: &[&str] = &[
    "utf16_1ijs",
    "utf16_html",
    "wasm_rust",
    "wasm_cheerp",
    "wasm_max",
    "wasm_openmp",
];

/// The fixed, ordered set of simulated workloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestKind {
    FibonacciRecursive,
    FibonacciBigInt,
    MatrixMultiply,
    MatrixMultiplyThreads,
    MatrixMultiplyOpenMp,
    PrimeCheck,
    StartupLoad,
}

impl TestKind {
    /// Output order of every simulated run
    pub const ALL: [TestKind; 7] = [
        TestKind::FibonacciRecursive,
        TestKind::FibonacciBigInt,
        TestKind::MatrixMultiply,
        TestKind::MatrixMultiplyThreads,
        TestKind::MatrixMultiplyOpenMp,
        TestKind::PrimeCheck,
        TestKind::StartupLoad,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TestKind::FibonacciRecursive => "Fibonacci (Recursive)",
            TestKind::FibonacciBigInt => "Fibonacci (BigInt/i64)",
            TestKind::MatrixMultiply => "Matrix Multiply",
            TestKind::MatrixMultiplyThreads => "Matrix Multiply (WASM Threads)",
            TestKind::MatrixMultiplyOpenMp => "Matrix Multiply (OpenMP SIMD)",
            TestKind::PrimeCheck => "Prime Check",
            TestKind::StartupLoad => "Startup/Load Efficiency",
        }
    }

    /// Score before the multiplier and any override
    pub fn base_score(self) -> f64 {
        match self {
            TestKind::FibonacciRecursive => 120_000.0,
            TestKind::FibonacciBigInt => 90_000.0,
            TestKind::MatrixMultiply => 45_000.0,
            TestKind::MatrixMultiplyThreads => 45_000.0,
            TestKind::MatrixMultiplyOpenMp => 60_000.0,
            TestKind::PrimeCheck => 85_000.0,
            TestKind::StartupLoad => DEFAULT_LOAD_SCORE,
        }
    }

    /// Width of the uniform noise added on top of the adjusted base
    pub fn variance(self) -> f64 {
        match self {
            TestKind::FibonacciRecursive => 20_000.0,
            TestKind::FibonacciBigInt => 15_000.0,
            TestKind::MatrixMultiply => 5_000.0,
            TestKind::MatrixMultiplyThreads => 8_000.0,
            TestKind::MatrixMultiplyOpenMp => 10_000.0,
            TestKind::PrimeCheck => 10_000.0,
            TestKind::StartupLoad => 10_000.0,
        }
    }

    /// Adjustment applied when no override matches the id
    fn default_adjustment(self) -> Adjustment {
        match self {
            TestKind::MatrixMultiplyThreads => Adjustment::Factor(0.5),
            TestKind::MatrixMultiplyOpenMp => Adjustment::Factor(0.4),
            TestKind::StartupLoad => Adjustment::FixedBase(DEFAULT_LOAD_SCORE),
            _ => Adjustment::Factor(1.0),
        }
    }
}

/// How one (id, test) pair departs from `base * multiplier`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// `base * multiplier * factor`
    Factor(f64),
    /// `base * scale`, ignoring the id multiplier
    ReplaceMultiplier(f64),
    /// Use this value as the base outright
    FixedBase(f64),
}

struct OverrideRule {
    test: TestKind,
    ids: &'static [&'static str],
    adjustment: Adjustment,
}

/// (id, test) -> adjustment. First matching rule wins.
static OVERRIDES: &[OverrideRule] = &[
    // recursion does not map onto shaders
    OverrideRule {
        test: TestKind::FibonacciRecursive,
        ids: GPU_IDS,
        adjustment: Adjustment::FixedBase(5_000.0),
    },
    OverrideRule {
        test: TestKind::FibonacciBigInt,
        ids: &["js_bigint"],
        adjustment: Adjustment::Factor(0.6),
    },
    OverrideRule {
        test: TestKind::FibonacciBigInt,
        ids: GPU_IDS,
        adjustment: Adjustment::Factor(0.5),
    },
    OverrideRule {
        test: TestKind::MatrixMultiply,
        ids: &["webgl_compute"],
        adjustment: Adjustment::ReplaceMultiplier(20.0),
    },
    OverrideRule {
        test: TestKind::MatrixMultiply,
        ids: &["webgpu_compute"],
        adjustment: Adjustment::ReplaceMultiplier(40.0),
    },
    OverrideRule {
        test: TestKind::MatrixMultiplyThreads,
        ids: WASM_THREAD_IDS,
        adjustment: Adjustment::Factor(1.8),
    },
    OverrideRule {
        test: TestKind::MatrixMultiplyOpenMp,
        ids: OPENMP_IDS,
        adjustment: Adjustment::Factor(2.2),
    },
];

fn lookup<T: Copy>(table: &[(&str, T)], id: &str) -> Option<T> {
    table.iter().find(|(key, _)| *key == id).map(|(_, value)| *value)
}

/// Score multiplier for a configuration id; unknown ids run at 1.0
pub fn multiplier_for(id: &str) -> f64 {
    lookup(MULTIPLIERS, id).unwrap_or(1.0)
}

/// Base score of the load test for a configuration id
pub fn load_score_for(id: &str) -> f64 {
    lookup(LOAD_SCORES, id).unwrap_or(DEFAULT_LOAD_SCORE)
}

/// Extra startup delay for a configuration id (ms)
pub fn startup_delay_ms(id: &str) -> u64 {
    lookup(STARTUP_DELAYS_MS, id).unwrap_or(0)
}

pub fn supports_wasm_threads(id: &str) -> bool {
    WASM_THREAD_IDS.contains(&id)
}

pub fn supports_openmp(id: &str) -> bool {
    OPENMP_IDS.contains(&id)
}

/// Override for one (id, test) pair
pub fn special_case_adjustment(id: &str, test: TestKind) -> Adjustment {
    if test == TestKind::StartupLoad {
        return Adjustment::FixedBase(load_score_for(id));
    }

    OVERRIDES
        .iter()
        .find(|rule| rule.test == test && rule.ids.contains(&id))
        .map(|rule| rule.adjustment)
        .unwrap_or_else(|| test.default_adjustment())
}

/// Noise-free score for one (id, test) pair
pub fn adjusted_base(id: &str, test: TestKind) -> f64 {
    match special_case_adjustment(id, test) {
        Adjustment::Factor(factor) => test.base_score() * multiplier_for(id) * factor,
        Adjustment::ReplaceMultiplier(scale) => test.base_score() * scale,
        Adjustment::FixedBase(base) => base,
    }
}
