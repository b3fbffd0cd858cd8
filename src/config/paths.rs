//! Path management for returns-cli
//!
//! ## Path Resolution Order
//!
//! 1. `RETURNS_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/returns-cli` on Linux, `%APPDATA%\returns-cli` on Windows)

use directories::ProjectDirs;
use std::path::PathBuf;

use crate::error::ReturnsError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "RETURNS_CLI_DATA_DIR";

/// Manages all paths used by returns-cli
#[derive(Debug, Clone)]
pub struct ReturnsPaths {
    base_dir: PathBuf,
}

impl ReturnsPaths {
    /// Resolve the base directory from the environment or the platform
    pub fn new() -> Result<Self, ReturnsError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "returns-cli")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    ReturnsError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create ReturnsPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Accounts of the local identity provider
    pub fn users_file(&self) -> PathBuf {
        self.base_dir.join("users.json")
    }

    /// One sub-directory per delivered message
    pub fn outbox_dir(&self) -> PathBuf {
        self.base_dir.join("outbox")
    }

    /// Log file written by the TUI
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("returns.log")
    }

    /// Create the base and outbox directories
    pub fn ensure_directories(&self) -> Result<(), ReturnsError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ReturnsError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.outbox_dir())
            .map_err(|e| ReturnsError::Io(format!("Failed to create outbox directory: {}", e)))?;

        Ok(())
    }

    /// Check if returns-cli has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReturnsPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.users_file(), temp_dir.path().join("users.json"));
        assert_eq!(paths.outbox_dir(), temp_dir.path().join("outbox"));
        assert_eq!(paths.log_file(), temp_dir.path().join("returns.log"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var(DATA_DIR_ENV, temp_dir.path());
        let paths = ReturnsPaths::new().unwrap();
        std::env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReturnsPaths::with_base_dir(temp_dir.path().join("nested"));

        assert!(!paths.is_initialized());
        paths.ensure_directories().unwrap();
        assert!(paths.outbox_dir().exists());
    }
}
