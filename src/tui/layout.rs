//! Layout definitions for the TUI
//!
//! Header, main panel and status bar for every screen, plus the splits
//! inside the attendance and returns screens.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the TUI
pub struct AppLayout {
    /// App title and signed-in user
    pub header: Rect,
    /// Main content area
    pub main: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            header: vertical[0],
            main: vertical[1],
            status_bar: vertical[2],
        }
    }
}

/// Layout for the attendance screen
pub struct AttendanceLayout {
    /// District and congregation
    pub location: Rect,
    /// The entry being typed
    pub form: Rect,
    /// Ledger table with totals
    pub entries: Rect,
    /// Submission summary
    pub summary: Rect,
}

impl AttendanceLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),  // Location
                Constraint::Length(11), // Entry form
                Constraint::Min(5),     // Entries and summary
            ])
            .split(area);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(50),    // Entries table
                Constraint::Length(34), // Summary
            ])
            .split(rows[2]);

        Self {
            location: rows[0],
            form: rows[1],
            entries: bottom[0],
            summary: bottom[1],
        }
    }
}

/// Layout for the returns screen
pub struct ReturnsLayout {
    /// Customer, product and reason fields
    pub form: Rect,
    /// Path input and attached files
    pub attachments: Rect,
}

impl ReturnsLayout {
    pub fn new(area: Rect) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        Self {
            form: columns[0],
            attachments: columns[1],
        }
    }
}

/// One-line rows for form fields inside `area`
pub fn field_rows(area: Rect, count: usize) -> Vec<Rect> {
    (0..count as u16)
        .take_while(|i| *i < area.height)
        .map(|i| Rect::new(area.x, area.y + i, area.width, 1))
        .collect()
}

/// Create a fixed-size centered rect for dialogs
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
