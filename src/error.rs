//! Crate-wide error handling
//!
//! Every fallible operation in the library returns [`BenchResult`]. The
//! binaries wrap these in `anyhow` at the top level.

use std::path::{Path, PathBuf};

/// Result type for benching-machine operations
pub type BenchResult<T> = Result<T, BenchError>;

/// Errors that can occur while configuring, running or reporting benchmarks
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid JSON in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config file {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Benchmark '{name}' failed: {message}")]
    BenchmarkFailed { name: String, message: String },

    #[error("WebAssembly error: {message}")]
    Wasm { message: String },

    #[error("Unsupported: {message}")]
    Unsupported { message: String },

    #[error("Server error: {message}")]
    Server { message: String },
}

/// Helper trait attaching a path to IO failures
pub trait BenchErrorContext<T> {
    fn io_context(self, path: impl AsRef<Path>) -> BenchResult<T>;
}

impl<T> BenchErrorContext<T> for Result<T, std::io::Error> {
    fn io_context(self, path: impl AsRef<Path>) -> BenchResult<T> {
        self.map_err(|source| {
            let path = path.as_ref().to_path_buf();
            if source.kind() == std::io::ErrorKind::NotFound {
                BenchError::NotFound { path }
            } else {
                BenchError::Io { path, source }
            }
        })
    }
}

/// Create a benchmark failure error
pub fn benchmark_failed(name: &str, message: impl std::fmt::Display) -> BenchError {
    BenchError::BenchmarkFailed {
        name: name.to_string(),
        message: message.to_string(),
    }
}

/// Create a WebAssembly error
pub fn wasm_error(message: impl std::fmt::Display) -> BenchError {
    BenchError::Wasm {
        message: message.to_string(),
    }
}

/// Create a JSON error with context
pub fn json_error(context: impl Into<String>, source: serde_json::Error) -> BenchError {
    BenchError::Json {
        context: context.into(),
        source,
    }
}
