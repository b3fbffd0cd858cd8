//! returns-cli - church service returns and return requests from the terminal
//!
//! An operator signs in, records a month of service attendance and offerings
//! for one district and congregation, and submits the sheet to a delivery
//! collaborator. Return requests with attached documents go through the same
//! submission workflow.
//!
//! # Architecture
//!
//! - `config`: Paths and settings
//! - `error`: Error types
//! - `models`: Entries, months, money, return requests, sessions
//! - `validation`: Keystroke filters and submit-time field checks
//! - `services`: Entry draft, monthly ledger, submission workflow, forms
//! - `reports` / `export`: Text, CSV, JSON and YAML renditions of a sheet
//! - `delivery`: Where submitted reports go (outbox or webhook)
//! - `auth`: Local and hosted identity providers, the session context
//! - `storage`: Atomic JSON file helpers
//! - `cli` / `tui`: The two front ends
//!
//! # Example
//!
//! ```rust,ignore
//! use returns_cli::config::{ReturnsPaths, Settings};
//!
//! let paths = ReturnsPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod delivery;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tui;
pub mod validation;

pub use error::{ReturnsError, ReturnsResult};
