//! User settings for returns-cli
//!
//! Where reports are delivered, who signs users in, and the presets used
//! when a new sheet is started.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::paths::ReturnsPaths;
use crate::error::ReturnsError;
use crate::export::ReportFormat;
use crate::storage::write_json_atomic;

/// Where submitted reports go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeliverySettings {
    /// Write each message into the outbox directory
    #[default]
    Outbox,
    /// POST each message as JSON to an HTTP endpoint
    Webhook { url: String },
}

/// Which identity provider signs users in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuthSettings {
    /// Accounts stored in `users.json`
    #[default]
    Local,
    /// Hosted identity provider REST API
    IdentityToolkit {
        api_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        endpoint: Option<String>,
    },
}

/// User settings for returns-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Address reports are addressed to
    #[serde(default)]
    pub recipient_email: String,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Seconds to wait for the delivery collaborator
    #[serde(default = "default_submit_timeout_secs")]
    pub submit_timeout_secs: u64,

    #[serde(default)]
    pub delivery: DeliverySettings,

    /// Formats the monthly report is rendered in for each delivery
    #[serde(default = "default_report_formats")]
    pub report_formats: Vec<ReportFormat>,

    #[serde(default)]
    pub auth: AuthSettings,

    /// District preset for a new sheet
    #[serde(default)]
    pub default_district: String,

    /// Congregation preset for a new sheet
    #[serde(default)]
    pub default_congregation: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_submit_timeout_secs() -> u64 {
    30
}

fn default_report_formats() -> Vec<ReportFormat> {
    vec![ReportFormat::Text, ReportFormat::Csv]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            recipient_email: String::new(),
            currency_symbol: default_currency(),
            submit_timeout_secs: default_submit_timeout_secs(),
            delivery: DeliverySettings::default(),
            report_formats: default_report_formats(),
            auth: AuthSettings::default(),
            default_district: String::new(),
            default_congregation: String::new(),
        }
    }
}

impl Settings {
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs.max(1))
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ReturnsPaths) -> Result<Self, ReturnsError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ReturnsError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ReturnsError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Not persisted until the caller saves
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ReturnsPaths) -> Result<(), ReturnsError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.submit_timeout_secs, 30);
        assert_eq!(settings.delivery, DeliverySettings::Outbox);
        assert_eq!(settings.auth, AuthSettings::Local);
        assert_eq!(
            settings.report_formats,
            vec![ReportFormat::Text, ReportFormat::Csv]
        );
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReturnsPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.recipient_email = "office@example.org".into();
        settings.delivery = DeliverySettings::Webhook {
            url: "https://hooks.example.org/reports".into(),
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.recipient_email, "office@example.org");
        assert_eq!(loaded.delivery, settings.delivery);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"auth": {"kind": "identity_toolkit", "api_key": "k"}}"#)
                .unwrap();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.submit_timeout(), Duration::from_secs(30));
        assert!(matches!(settings.auth, AuthSettings::IdentityToolkit { .. }));
    }
}
