//! Panic hook that records a report before the process unwinds
//!
//! Reports are appended to `logs/panic.log` so a crash during a long
//! benchmark run or inside the server leaves something behind.

use std::backtrace::Backtrace;
use std::fs::OpenOptions;
use std::io::Write;
use std::panic::{self, PanicHookInfo};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Local};

static PANIC_COUNT: AtomicUsize = AtomicUsize::new(0);

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "panic.log";

#[derive(Debug)]
pub struct PanicReport {
    pub timestamp: DateTime<Local>,
    pub thread: String,
    pub location: String,
    pub message: String,
    pub backtrace: String,
    pub panic_count: usize,
}

impl PanicReport {
    fn from_hook_info(info: &PanicHookInfo) -> Self {
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        let message = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic message".to_string()
        };

        Self {
            timestamp: Local::now(),
            thread: std::thread::current().name().unwrap_or("<unnamed>").to_string(),
            location,
            message,
            backtrace: Backtrace::capture().to_string(),
            panic_count: PANIC_COUNT.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Append this report to `log_path`
    pub fn append_to(&self, log_path: &Path) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(log_path)?;

        writeln!(file, "=== PANIC #{} ===", self.panic_count)?;
        writeln!(file, "Timestamp: {}", self.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"))?;
        writeln!(file, "Thread: {}", self.thread)?;
        writeln!(file, "Location: {}", self.location)?;
        writeln!(file, "Message: {}", self.message)?;
        writeln!(file, "Backtrace:\n{}", self.backtrace)?;
        writeln!(file, "================\n")?;
        file.flush()
    }
}

/// Install the hook, writing reports under `logs/`
pub fn install_panic_handler() {
    install_panic_handler_in(LOG_DIR);
}

pub fn install_panic_handler_in(log_dir: impl Into<PathBuf>) {
    let log_dir = log_dir.into();
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        log::warn!("Could not create {}: {}", log_dir.display(), e);
    }
    let log_path = log_dir.join(LOG_FILE);
    log::debug!("Panic reports go to {}", log_path.display());

    panic::set_hook(Box::new(move |info| {
        let report = PanicReport::from_hook_info(info);

        if let Err(e) = report.append_to(&log_path) {
            eprintln!("Failed to write panic log: {}", e);
        }

        eprintln!("\n💥 benching-machine panicked 💥");
        eprintln!(
            "Panic #{} in thread '{}' at {}",
            report.panic_count, report.thread, report.location
        );
        eprintln!("Message: {}", report.message);
        eprintln!("Report written to {}", log_path.display());

        if std::env::var("RUST_BACKTRACE").is_err() {
            eprintln!("\nHint: set RUST_BACKTRACE=1 for a full backtrace");
        }

        #[cfg(debug_assertions)]
        eprintln!("\n{}", report.backtrace);
    }));
}

pub fn panic_count() -> usize {
    PANIC_COUNT.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> PanicReport {
        PanicReport {
            timestamp: Local::now(),
            thread: "bench-worker".to_string(),
            location: "src/harness/cpu.rs:42:10".to_string(),
            message: "index out of bounds".to_string(),
            backtrace: "disabled backtrace".to_string(),
            panic_count: 1,
        }
    }

    #[test]
    fn test_report_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panic.log");

        let report = sample_report();
        report.append_to(&path).unwrap();
        report.append_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("=== PANIC #1 ===").count(), 2);
        assert!(content.contains("Thread: bench-worker"));
        assert!(content.contains("Location: src/harness/cpu.rs:42:10"));
        assert!(content.contains("Message: index out of bounds"));
    }

    #[test]
    fn test_append_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/panic.log");
        assert!(sample_report().append_to(&path).is_err());
    }
}
