use crate::constants::harness::{T_INFINITY, T_TABLE};
use crate::results::TestStats;

/// Two-tailed 95% critical value for `df` degrees of freedom
pub fn critical_value(df: usize) -> f64 {
    match df {
        0 => 0.0,
        1..=30 => T_TABLE[df - 1],
        _ => T_INFINITY,
    }
}

/// Mean, sample deviation and relative margin of error (percent) of
/// per-operation times in seconds
pub fn sample_stats(samples: &[f64]) -> TestStats {
    let n = samples.len();
    if n == 0 {
        return TestStats::default();
    }

    let mean = samples.iter().sum::<f64>() / n as f64;
    if n == 1 {
        return TestStats {
            mean,
            deviation: 0.0,
            margin: 0.0,
        };
    }

    let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let deviation = variance.sqrt();
    let sem = deviation / (n as f64).sqrt();
    let moe = sem * critical_value(n - 1);
    let margin = if mean > 0.0 { moe / mean * 100.0 } else { 0.0 };

    TestStats {
        mean,
        deviation,
        margin,
    }
}

/// Operations per second for a mean time per operation
pub fn hz(mean: f64) -> f64 {
    if mean > 0.0 {
        1.0 / mean
    } else {
        0.0
    }
}
