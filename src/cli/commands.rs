use anyhow::{Context, Result};

use crate::catalog;
use crate::cli::{Cli, Commands};
use crate::config::BenchConfig;
use crate::harness::{Harness, SuiteKind};
use crate::loader::ModuleLoader;
use crate::report::{self, BenchmarkReport};
use crate::server::{self, AppState};
use crate::simulator::{self, RunResult};

/// Dispatch a parsed command line
pub async fn execute(cli: Cli) -> Result<()> {
    let mut config = BenchConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Run {
            cpu,
            memory,
            compilation,
            gpu,
            output,
        } => {
            let suites = Commands::selected_suites(cpu, memory, compilation, gpu);
            let harness = Harness::new(config.harness.clone());

            // Measurements are CPU-bound; keep them off the async workers
            let report = tokio::task::spawn_blocking(move || run_suites(&suites, &harness))
                .await
                .context("Benchmark thread panicked")?;

            if let Some(path) = output {
                report::save_results(&report, &path)?;
                println!("\n💾 Results saved to {}", path.display());
            }
        }

        Commands::List => list_benchmarks(),

        Commands::Simulate {
            ids,
            no_latency,
            seed,
            output,
        } => {
            if no_latency {
                config.simulator.simulate_latency = false;
            }
            if seed.is_some() {
                config.simulator.seed = seed;
            }

            let run = simulate(&config, &ids).await;
            if let Some(path) = output {
                report::save_results(&run, &path)?;
                println!("\n💾 Run saved to {}", path.display());
            }
        }

        Commands::Configs => print_configurations(),

        Commands::Compare { first, second } => {
            let a: BenchmarkReport = report::load_results(&first)
                .with_context(|| format!("Failed to load {}", first.display()))?;
            let b: BenchmarkReport = report::load_results(&second)
                .with_context(|| format!("Failed to load {}", second.display()))?;
            print!("{}", report::render_comparison(&report::compare_results(&a, &b)));
        }

        Commands::Probe { ids } => {
            let loader = ModuleLoader::new(config.loader.clone());
            log::debug!("Artifact root: {}", loader.artifact_root().display());
            for id in &ids {
                println!("{:<16} {}", id, loader.load(id).summary());
            }
        }

        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let state = AppState::new(config.simulator.build());
            server::serve(&config.server, state).await?;
        }
    }

    Ok(())
}

/// Run each suite in order, printing results as they arrive
pub fn run_suites(suites: &[SuiteKind], harness: &Harness) -> BenchmarkReport {
    let mut report = BenchmarkReport::new();

    for &kind in suites {
        let suite = kind.suite();
        println!("\n⏱  Running {} benchmarks...", suite.category());

        let results = suite.run(harness);
        report::format_results(suite.category(), &results);
        report.insert(kind.key(), results);
    }

    report
}

fn list_benchmarks() {
    println!("Available benchmarks:");
    for kind in SuiteKind::ALL {
        let suite = kind.suite();
        println!("\n{} (--{}):", suite.category(), kind.key());
        for description in suite.descriptions() {
            println!("  • {}", description);
        }
    }
}

fn print_configurations() {
    println!("{:<16} {:<28} {:>6}  {}", "ID", "NAME", "MULT", "DESCRIPTION");
    for config in catalog::all() {
        println!(
            "{:<16} {:<28} {:>5.2}x  {}",
            config.id,
            config.name,
            simulator::multiplier_for(config.id),
            config.desc
        );
    }
}

async fn simulate(config: &BenchConfig, ids: &[String]) -> RunResult {
    let simulator = config.simulator.build();
    let total = ids.len();

    let run = simulator
        .run_many_with_progress(ids, |index, completed| {
            println!("\n[{}/{}] {} complete", index + 1, total, completed.name);
            print!(
                "{}",
                report::render_results(&format!("{} [{}]", completed.name, completed.id), &completed.tests)
            );
        })
        .await;

    println!("\nSimulated run at {}", run.timestamp);
    run
}
