//! Terminal User Interface module
//!
//! Login and sign-up, a dashboard, the monthly attendance sheet and the
//! returns form, built on ratatui. Deliveries run on the tokio runtime and
//! report back through the event channel.

pub mod app;
pub mod dialogs;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
