//! Allocation-heavy workloads

use std::hint::black_box;

use chrono::Utc;
use rand::Rng;

use crate::harness::{BenchmarkSuite, Harness};
use crate::results::TestResult;

pub struct MemoryBenchmark;

impl MemoryBenchmark {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MemoryBenchmark {
    fn default() -> Self {
        Self::new()
    }
}

struct Record {
    id: usize,
    name: String,
    data: Vec<usize>,
    timestamp: i64,
}

/// Fill a vector with random values and sum it
pub fn array_operations<R: Rng>(rng: &mut R, size: usize) -> f64 {
    let values: Vec<f64> = (0..size).map(|_| rng.gen()).collect();
    values.iter().sum()
}

/// Allocate `count` small records and total their payload lengths
pub fn object_operations(count: usize) -> usize {
    let records: Vec<Record> = (0..count)
        .map(|i| Record {
            id: i,
            name: format!("Object {}", i),
            data: vec![i; 10],
            timestamp: Utc::now().timestamp_millis(),
        })
        .collect();

    black_box(records.iter().map(|r| (r.id, r.name.len(), r.timestamp)).last());
    records.iter().map(|r| r.data.len()).sum()
}

/// Grow one string piece by piece
pub fn string_operations(iterations: usize) -> usize {
    let mut s = String::new();
    for i in 0..iterations {
        s.push_str(&format!("Iteration {} ", i));
    }
    s.len()
}

/// Fill and sum a flat f32 buffer
pub fn typed_array_operations<R: Rng>(rng: &mut R, size: usize) -> f32 {
    let mut buffer = vec![0.0f32; size];
    for value in buffer.iter_mut() {
        *value = rng.gen();
    }
    buffer.iter().sum()
}

impl BenchmarkSuite for MemoryBenchmark {
    fn category(&self) -> &'static str {
        "Memory"
    }

    fn descriptions(&self) -> &'static [&'static str] {
        &[
            "Array Operations: 10k element array manipulation",
            "Object Creation: Create 1k objects",
            "String Concatenation: 1k string operations",
            "Typed Array Operations: 10k element typed array",
        ]
    }

    fn run(&self, harness: &Harness) -> Vec<TestResult> {
        let mut rng = rand::thread_rng();
        let mut results = Vec::with_capacity(4);

        results.push(harness.measure("Array Operations (10k elements)", || {
            black_box(array_operations(&mut rng, 10_000));
            Ok(())
        }));
        results.push(harness.measure("Object Creation (1k objects)", || {
            black_box(object_operations(1_000));
            Ok(())
        }));
        results.push(harness.measure("String Concatenation (1k iterations)", || {
            black_box(string_operations(1_000));
            Ok(())
        }));
        results.push(harness.measure("Typed Array Operations (10k elements)", || {
            black_box(typed_array_operations(&mut rng, 10_000));
            Ok(())
        }));

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::quick_harness;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_workloads() {
        let mut rng = StdRng::seed_from_u64(4);
        let sum = array_operations(&mut rng, 1_000);
        assert!(sum > 0.0 && sum < 1_000.0);

        assert_eq!(object_operations(1_000), 10_000);
        assert_eq!(string_operations(3), "Iteration 0 Iteration 1 Iteration 2 ".len());

        let sum = typed_array_operations(&mut rng, 100);
        assert!(sum > 0.0 && sum < 100.0);
    }

    #[test]
    fn test_suite_runs_in_order() {
        let results = MemoryBenchmark::new().run(&quick_harness());
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].name, "Array Operations (10k elements)");
        assert_eq!(results[3].name, "Typed Array Operations (10k elements)");
        assert!(results.iter().all(|r| !r.is_failure()));
    }
}
