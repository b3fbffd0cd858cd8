//! Storage helpers
//!
//! JSON and raw file writes used by the settings file, the local user store
//! and the outbox. Every write is atomic and creates missing directories.

pub mod file_io;

pub use file_io::{read_json, read_json_required, write_bytes_atomic, write_json_atomic};
