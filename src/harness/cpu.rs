//! CPU-bound workloads: recursion, integer loops, small matrices

use std::hint::black_box;

use rand::Rng;

use crate::harness::{BenchmarkSuite, Harness};
use crate::results::TestResult;

pub struct CpuBenchmark;

impl CpuBenchmark {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CpuBenchmark {
    fn default() -> Self {
        Self::new()
    }
}

pub fn fibonacci(n: u32) -> u64 {
    if n <= 1 {
        return n as u64;
    }
    fibonacci(n - 1) + fibonacci(n - 2)
}

/// 6k ± 1 trial division
pub fn is_prime(num: u64) -> bool {
    if num <= 1 {
        return false;
    }
    if num <= 3 {
        return true;
    }
    if num % 2 == 0 || num % 3 == 0 {
        return false;
    }

    let mut i = 5;
    while i * i <= num {
        if num % i == 0 || num % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Naive row-major product of `a` (n×m) and `b` (m×p)
pub fn matrix_multiply(a: &[Vec<f64>], b: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let inner = b.len();
    let cols = b.first().map_or(0, |row| row.len());

    a.iter()
        .map(|row| {
            (0..cols)
                .map(|j| (0..inner).map(|k| row[k] * b[k][j]).sum())
                .collect()
        })
        .collect()
}

pub(crate) fn random_matrix<R: Rng>(rng: &mut R, size: usize) -> Vec<Vec<f64>> {
    (0..size)
        .map(|_| (0..size).map(|_| rng.gen::<f64>()).collect())
        .collect()
}

impl BenchmarkSuite for CpuBenchmark {
    fn category(&self) -> &'static str {
        "CPU"
    }

    fn descriptions(&self) -> &'static [&'static str] {
        &[
            "Fibonacci(20): Recursive calculation",
            "Prime Check: Test 10,000 numbers for primality",
            "Matrix Multiply: 10x10 matrix multiplication",
        ]
    }

    fn run(&self, harness: &Harness) -> Vec<TestResult> {
        let mut rng = rand::thread_rng();

        vec![
            harness.measure("Fibonacci(20)", || {
                black_box(fibonacci(black_box(20)));
                Ok(())
            }),
            harness.measure("Prime Check (10000 iterations)", || {
                for i in 0..10_000u64 {
                    black_box(is_prime(black_box(i)));
                }
                Ok(())
            }),
            harness.measure("Matrix Multiply (10x10)", || {
                let a = random_matrix(&mut rng, 10);
                let b = random_matrix(&mut rng, 10);
                black_box(matrix_multiply(&a, &b));
                Ok(())
            }),
        ]
    }
}
