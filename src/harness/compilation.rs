//! Call overhead, runtime function construction and WebAssembly compilation

use std::hint::black_box;

use crate::harness::{BenchmarkSuite, Harness};
use crate::loader::wasm::{self, MINIMAL_ADD_MODULE};
use crate::results::TestResult;

pub struct CompilationBenchmark;

impl CompilationBenchmark {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CompilationBenchmark {
    fn default() -> Self {
        Self::new()
    }
}

/// Baseline: one closure called `iterations` times
pub fn regular_function(iterations: i64) -> i64 {
    let f = |x: i64, y: i64| x * 2 + y;
    (0..iterations).fold(0, |acc, i| acc.wrapping_add(black_box(f(i, i))))
}

fn double(x: i64) -> i64 {
    x * 2
}

/// Closure and plain fn called back to back
pub fn closure_vs_fn(iterations: i64) -> i64 {
    let closure = |x: i64| x * 2;
    (0..iterations).fold(0, |acc, i| {
        acc.wrapping_add(black_box(closure(i)))
            .wrapping_add(black_box(double(i)))
    })
}

/// Build a fresh boxed function per iteration and call it once
pub fn dynamic_function(iterations: i64) -> i64 {
    (0..iterations).fold(0, |acc, i| {
        let f: Box<dyn Fn(i64) -> i64> = Box::new(move |x| x * 2 + i);
        acc.wrapping_add(black_box(f(i)))
    })
}

impl BenchmarkSuite for CompilationBenchmark {
    fn category(&self) -> &'static str {
        "Compilation"
    }

    fn descriptions(&self) -> &'static [&'static str] {
        &[
            "Regular Function: 10k function calls",
            "Arrow vs Regular: Compare function types",
            "Dynamic Function Creation: Runtime function generation",
            "WASM Compilation: Real WebAssembly compile + instantiate",
        ]
    }

    fn run(&self, harness: &Harness) -> Vec<TestResult> {
        vec![
            harness.measure("Regular Function (10k calls)", || {
                black_box(regular_function(10_000));
                Ok(())
            }),
            harness.measure("Arrow vs Regular (10k calls)", || {
                black_box(closure_vs_fn(10_000));
                Ok(())
            }),
            harness.measure("Dynamic Function Creation (100 calls)", || {
                black_box(dynamic_function(100));
                Ok(())
            }),
            harness.measure("WASM Compilation (Real)", || {
                black_box(wasm::compile_and_verify(&MINIMAL_ADD_MODULE)?);
                Ok(())
            }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::quick_harness;

    #[test]
    fn test_workloads() {
        assert_eq!(regular_function(3), 0 + 3 + 6);
        assert_eq!(closure_vs_fn(3), 2 * (0 + 2 + 4));
        assert_eq!(dynamic_function(3), (0 + 0) + (2 + 1) + (4 + 2));
    }

    #[test]
    fn test_suite_keeps_shape() {
        let results = CompilationBenchmark::new().run(&quick_harness());
        assert_eq!(results.len(), 4);
        assert_eq!(results[3].name, "WASM Compilation (Real)");

        if wasm::runtime_available() {
            assert!(!results[3].is_failure(), "{:?}", results[3].error);
        } else {
            assert!(results[3].is_failure());
            assert_eq!(results[3].ops_per_sec, 0.0);
        }
    }
}
