//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod outbox;
pub mod sheet;
pub mod user;

use std::io::{self, BufRead, Write};

use crate::error::{ReturnsError, ReturnsResult};
use crate::models::Secret;

pub use outbox::{handle_outbox_command, OutboxCommands};
pub use sheet::{handle_sheet_command, SheetCommands};
pub use user::{handle_user_command, UserCommands};

/// Environment variable read instead of prompting for a password
pub const PASSWORD_ENV: &str = "RETURNS_CLI_PASSWORD";

/// Read one line from stdin after printing `prompt`
fn prompt_line(prompt: &str) -> ReturnsResult<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prompt for a password (hidden input)
fn prompt_secret(prompt: &str) -> ReturnsResult<Secret> {
    rpassword::prompt_password(prompt)
        .map(Secret::new)
        .map_err(|e| ReturnsError::Io(format!("Failed to read password: {}", e)))
}

/// Use the given value or ask for it
fn value_or_prompt(value: Option<String>, prompt: &str) -> ReturnsResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => prompt_line(prompt),
    }
}

fn secret_or_prompt(value: Option<String>, prompt: &str) -> ReturnsResult<Secret> {
    match value {
        Some(v) => Ok(Secret::new(v)),
        None => prompt_secret(prompt),
    }
}
