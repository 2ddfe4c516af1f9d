//! Logging system initialization
//!
//! Sets up the tracing subscriber according to the loaded configuration:
//! stdout by default, an append-only file when `LOG_FILE` is set.

use crate::config::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;

/// Initialize the global tracing subscriber.
///
/// Call exactly once during startup, after configuration is loaded. The
/// returned `WorkerGuard` must be kept alive for the duration of the
/// program so buffered log lines are flushed on shutdown.
///
/// # Panics
/// * If the log file cannot be opened
/// * If a global subscriber is already installed
pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let writer: Box<dyn std::io::Write + Send + Sync> = match config.logging.file.as_deref() {
        Some(log_file) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
                .expect("Failed to open log file");
            Box::new(file)
        }
        None => Box::new(std::io::stdout()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::new(config.logging.level.clone());

    tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(config.logging.file.is_none())
        .init();

    guard
}
