//! TUI Views module
//!
//! One view per screen (login, dashboard, attendance sheet, returns form),
//! plus the header, status bar and toast overlay drawn around them.

pub mod attendance;
pub mod dashboard;
pub mod login;
pub mod returns;
pub mod status_bar;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{App, Screen};
use super::dialogs;
use super::layout::AppLayout;
use super::widgets::ToastWidget;

const APP_TITLE: &str = "DataSender App";
const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    render_header(frame, app, layout.header);

    match app.screen {
        Screen::Login => login::render(frame, app, layout.main),
        Screen::Dashboard => dashboard::render(frame, app, layout.main),
        Screen::Attendance => attendance::render(frame, app, layout.main),
        Screen::Returns => returns::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if let Some(action) = app.pending_confirm {
        dialogs::confirm::render(frame, action);
    }

    render_toasts(frame, app);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let mut spans = vec![Span::styled(
        format!(" {} ", APP_TITLE),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if let Some(ref name) = app.user_name {
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(
            format!("Welcome, {}", name),
            Style::default().fg(Color::White),
        ));
        spans.push(Span::styled(
            "  Ctrl+L Logout",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}

/// Stack toasts in the top-right corner, newest first
fn render_toasts(frame: &mut Frame, app: &App) {
    let area = frame.area();
    if area.width < TOAST_WIDTH + 2 {
        return;
    }

    let x = area.x + area.width - TOAST_WIDTH - 1;
    let mut y = area.y + 1;
    for toast in app.toasts.iter() {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, TOAST_WIDTH, TOAST_HEIGHT);
        frame.render_widget(ToastWidget::new(toast), rect);
        y += TOAST_HEIGHT;
    }
}

/// Border color for a panel depending on focus
pub(crate) fn border_color(focused: bool) -> Color {
    if focused {
        Color::Cyan
    } else {
        Color::DarkGray
    }
}
