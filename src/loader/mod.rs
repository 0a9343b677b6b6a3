//! Capability-checked module loader
//!
//! Resolves a configuration id to its prebuilt WebAssembly artifact and
//! compiles it. The outcome is always a tagged value, never a panic or a bare
//! lookup failure: the module loaded, the id has nothing to load, or loading
//! was attempted and failed.

pub mod wasm;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::loader::{ARTIFACT_ROOT_ENV, DEFAULT_ARTIFACT_ROOT};
use crate::error::{BenchError, BenchErrorContext, BenchResult};

pub use wasm::{compile_and_verify, runtime_available, CompiledModule, WasmRuntime, MINIMAL_ADD_MODULE};

/// Loader settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory the artifact paths are relative to
    pub artifact_root: PathBuf,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            artifact_root: PathBuf::from(DEFAULT_ARTIFACT_ROOT),
        }
    }
}

impl LoaderConfig {
    /// `lookup` is `std::env::var` in production
    pub fn apply_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(ARTIFACT_ROOT_ENV) {
            self.artifact_root = PathBuf::from(root);
        }
    }
}

/// Ids that reuse another id's artifact
static ALIASES: &[(&str, &str)] = &[("wasm_opt", "wasm_as"), ("wasmedge_aot", "wasm_opt")];

/// Id -> artifact path relative to the artifact root
static ARTIFACTS: &[(&str, &str)] = &[
    ("wasm_as", "benchmarks/physics/candy_physics.wasm"),
    ("wasm_asc_opt", "benchmarks/physics/candy_physics.wasm"),
    ("wasm_rust", "benchmarks/rust/rust_benchmark_bg.wasm"),
    ("wasm_cheerp", "benchmarks/cheerp/cheerp_benchmark.wasm"),
    ("wasm_threads", "wasm/swarm.wasm"),
    ("wasm_simd", "wasm/swarm.wasm"),
    ("wasm_openmp", "wasm/swarm.wasm"),
    ("wasm_max", "wasm/swarm.wasm"),
];

/// Follow aliases until an id with its own artifact (or none) is reached
fn resolve(id: &str) -> &str {
    let mut current = id;
    // The alias chain is acyclic and short
    for _ in 0..ALIASES.len() {
        match ALIASES.iter().find(|(from, _)| *from == current) {
            Some((_, to)) => current = to,
            None => break,
        }
    }
    current
}

/// Artifact path for an id, if it has one
pub fn artifact_for(id: &str) -> Option<&'static str> {
    let resolved = resolve(id);
    ARTIFACTS
        .iter()
        .find(|(key, _)| *key == resolved)
        .map(|(_, path)| *path)
}

/// Handle to a compiled module
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModule {
    pub id: String,
    pub path: PathBuf,
    pub size_bytes: usize,
    pub compile_time: Duration,
    pub exports: Vec<String>,
}

/// Result of a load attempt
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(LoadedModule),
    Unsupported { reason: String },
    Failed { error: BenchError },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }

    /// One-line summary for console output
    pub fn summary(&self) -> String {
        match self {
            LoadOutcome::Loaded(module) => format!(
                "loaded {} ({} bytes, {:.2} ms, exports: {})",
                module.path.display(),
                module.size_bytes,
                module.compile_time.as_secs_f64() * 1000.0,
                module.exports.join(", ")
            ),
            LoadOutcome::Unsupported { reason } => format!("unsupported: {}", reason),
            LoadOutcome::Failed { error } => format!("failed: {}", error),
        }
    }
}

pub struct ModuleLoader {
    config: LoaderConfig,
}

impl ModuleLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn artifact_root(&self) -> &Path {
        &self.config.artifact_root
    }

    /// Load and compile the artifact behind `id`
    pub fn load(&self, id: &str) -> LoadOutcome {
        let Some(relative) = artifact_for(id) else {
            return LoadOutcome::Unsupported {
                reason: format!("No loader for {}", id),
            };
        };

        if !runtime_available() {
            return LoadOutcome::Unsupported {
                reason: "built without the wasm-runtime feature".to_string(),
            };
        }

        let path = self.config.artifact_root.join(relative);
        match self.compile_file(id, &path) {
            Ok(module) => {
                log::info!("Loaded {} from {}", id, path.display());
                LoadOutcome::Loaded(module)
            }
            Err(error) => {
                log::warn!("Failed to load {}: {}", id, error);
                LoadOutcome::Failed { error }
            }
        }
    }

    fn compile_file(&self, id: &str, path: &Path) -> BenchResult<LoadedModule> {
        let bytes = std::fs::read(path).io_context(path)?;
        let runtime = WasmRuntime::new()?;
        let compiled = runtime.compile(&bytes)?;

        Ok(LoadedModule {
            id: id.to_string(),
            path: path.to_path_buf(),
            size_bytes: bytes.len(),
            compile_time: compiled.compile_time,
            exports: compiled.exports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_mapping() {
        assert_eq!(artifact_for("wasm_as"), Some("benchmarks/physics/candy_physics.wasm"));
        assert_eq!(artifact_for("wasm_opt"), Some("benchmarks/physics/candy_physics.wasm"));
        assert_eq!(artifact_for("wasmedge_aot"), Some("benchmarks/physics/candy_physics.wasm"));
        assert_eq!(artifact_for("wasm_max"), Some("wasm/swarm.wasm"));
        assert_eq!(artifact_for("js_inline"), None);
        assert_eq!(artifact_for("webgpu_compute"), None);
    }

    #[test]
    fn test_unknown_id_is_unsupported() {
        let loader = ModuleLoader::new(LoaderConfig::default());
        match loader.load("js_inline") {
            LoadOutcome::Unsupported { reason } => assert!(reason.contains("js_inline")),
            other => panic!("expected Unsupported, got {:?}", other),
        }
    }

    #[cfg(feature = "wasm-runtime")]
    #[test]
    fn test_missing_artifact_fails() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ModuleLoader::new(LoaderConfig {
            artifact_root: dir.path().to_path_buf(),
        });

        match loader.load("wasm_rust") {
            LoadOutcome::Failed {
                error: BenchError::NotFound { path },
            } => assert!(path.ends_with("benchmarks/rust/rust_benchmark_bg.wasm")),
            other => panic!("expected NotFound failure, got {:?}", other),
        }
    }

    #[cfg(feature = "wasm-runtime")]
    #[test]
    fn test_loads_real_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let wasm_dir = dir.path().join("wasm");
        std::fs::create_dir_all(&wasm_dir).unwrap();
        std::fs::write(wasm_dir.join("swarm.wasm"), MINIMAL_ADD_MODULE).unwrap();

        let loader = ModuleLoader::new(LoaderConfig {
            artifact_root: dir.path().to_path_buf(),
        });
        let outcome = loader.load("wasm_threads");
        assert!(outcome.is_loaded(), "{}", outcome.summary());

        if let LoadOutcome::Loaded(module) = outcome {
            assert_eq!(module.id, "wasm_threads");
            assert_eq!(module.size_bytes, MINIMAL_ADD_MODULE.len());
            assert_eq!(module.exports, vec!["add".to_string()]);
        }
    }

    #[cfg(feature = "wasm-runtime")]
    #[test]
    fn test_corrupt_artifact_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cheerp_dir = dir.path().join("benchmarks/cheerp");
        std::fs::create_dir_all(&cheerp_dir).unwrap();
        std::fs::write(cheerp_dir.join("cheerp_benchmark.wasm"), b"\0asm garbage").unwrap();

        let loader = ModuleLoader::new(LoaderConfig {
            artifact_root: dir.path().to_path_buf(),
        });
        assert!(matches!(
            loader.load("wasm_cheerp"),
            LoadOutcome::Failed {
                error: BenchError::Wasm { .. }
            }
        ));
    }
}
