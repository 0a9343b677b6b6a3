//! End-to-end checks across simulator, harness, report and loader.

use std::time::Duration;

use benching_machine::catalog;
use benching_machine::cli::commands::run_suites;
use benching_machine::harness::{Harness, HarnessConfig, SuiteKind};
use benching_machine::loader::{LoadOutcome, LoaderConfig, ModuleLoader};
use benching_machine::report::{self, BenchmarkReport};
use benching_machine::{RunResult, ScoreSimulator};

fn fast_harness() -> Harness {
    Harness::new(HarnessConfig {
        max_time_ms: 5,
        min_sample_time_ms: 1,
        min_samples: 2,
        max_samples: 4,
    })
}

#[tokio::test]
async fn test_same_seed_same_scores() {
    let ids = ["js_inline", "wasm_rust", "webgl_compute"];
    let a = ScoreSimulator::with_seed(99).with_latency(false).run_many(&ids).await;
    let b = ScoreSimulator::with_seed(99).with_latency(false).run_many(&ids).await;

    assert_eq!(a.configurations, b.configurations);
}

#[tokio::test]
async fn test_progress_reports_each_configuration_in_order() {
    let simulator = ScoreSimulator::with_seed(4).with_latency(false);
    let ids: Vec<&str> = catalog::all().iter().map(|c| c.id).collect();
    let mut seen = Vec::new();

    let run = simulator
        .run_many_with_progress(&ids, |index, completed| seen.push((index, completed.id.clone())))
        .await;

    assert_eq!(run.configurations.len(), 23);
    for (i, (index, id)) in seen.iter().enumerate() {
        assert_eq!(*index, i);
        assert_eq!(id.as_str(), ids[i]);
    }
    assert!(run
        .configurations
        .iter()
        .all(|c| c.tests.iter().all(|t| t.ops_per_sec >= 0.0)));
}

#[tokio::test(start_paused = true)]
async fn test_latency_is_sequential() {
    let simulator = ScoreSimulator::with_seed(8);
    let start = tokio::time::Instant::now();
    simulator.run_many(&["js_inline", "js_inline", "js_inline"]).await;

    assert!(start.elapsed() >= Duration::from_millis(2_400));
}

#[tokio::test]
async fn test_saved_run_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.json");

    let run = ScoreSimulator::with_seed(2)
        .with_latency(false)
        .run_many(&["wasm_simd"])
        .await;
    report::save_results(&run, &path).unwrap();

    let loaded: RunResult = report::load_results(&path).unwrap();
    assert_eq!(loaded, run);
}

#[test]
fn test_run_then_compare() {
    let dir = tempfile::tempdir().unwrap();
    let first_path = dir.path().join("first.json");
    let second_path = dir.path().join("second.json");

    let harness = fast_harness();
    report::save_results(&run_suites(&[SuiteKind::Cpu], &harness), &first_path).unwrap();
    report::save_results(&run_suites(&[SuiteKind::Cpu, SuiteKind::Memory], &harness), &second_path).unwrap();

    let first: BenchmarkReport = report::load_results(&first_path).unwrap();
    let second: BenchmarkReport = report::load_results(&second_path).unwrap();
    let comparison = report::compare_results(&first, &second);

    assert_eq!(comparison.differences.len(), 1);
    let cpu = &comparison.differences["cpu"];
    assert_eq!(cpu.len(), 3);
    assert_eq!(cpu[0].name, "Fibonacci(20)");
    assert!(cpu.iter().all(|d| d.percent_change.is_some()));
}

#[test]
fn test_loader_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    let loader = ModuleLoader::new(LoaderConfig {
        artifact_root: dir.path().to_path_buf(),
    });

    assert!(matches!(loader.load("js_terser"), LoadOutcome::Unsupported { .. }));

    let outcome = loader.load("wasm_asc_opt");
    assert!(!outcome.is_loaded());
    assert!(!outcome.summary().is_empty());
}
