//! Human-readable reports
//!
//! Text bodies for delivered messages and for the terminal.

pub mod monthly;
pub mod return_summary;

pub use monthly::{entries_table, MonthlyRow};
