//! Configuration module for returns-cli
//!
//! - Path resolution (env override, platform config dir)
//! - Settings persistence

pub mod paths;
pub mod settings;

pub use paths::ReturnsPaths;
pub use settings::{AuthSettings, DeliverySettings, Settings};
