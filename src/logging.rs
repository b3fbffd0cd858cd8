//! Tracing setup
//!
//! `RUST_LOG` wins when it is set. Otherwise only this crate logs, at the
//! level given on the command line. The TUI owns the terminal, so its logs go
//! to a file instead of stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::{ReturnsError, ReturnsResult};

fn env_filter(level: LevelFilter) -> EnvFilter {
    match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    }
}

/// Log to stderr, for CLI commands
pub fn init_logger(level: LevelFilter) {
    // A second init (tests, embedding) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Append logs to `path`, for the TUI
pub fn init_file_logger(level: LevelFilter, path: &Path) -> ReturnsResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ReturnsError::Io(format!("Failed to open log file: {}", e)))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_logger_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("returns.log");
        init_file_logger(LevelFilter::INFO, &path).unwrap();
        assert!(path.exists());
    }
}
