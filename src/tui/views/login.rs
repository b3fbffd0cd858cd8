//! Login and sign-up view

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::tui::app::{App, AuthTab};
use crate::tui::layout::{centered_rect_fixed, field_rows};
use crate::tui::widgets::TextInput;

const LABEL_WIDTH: u16 = 18;

/// Render the auth panel centered in `area`
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let form = &app.auth_form;
    let fields = form.fields();
    let height = fields.len() as u16 + 9;
    let panel = centered_rect_fixed(56, height, area);

    frame.render_widget(Clear, panel);
    let block = Block::default()
        .title(" Welcome ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                   // Tabs
            Constraint::Length(fields.len() as u16), // Fields
            Constraint::Length(1),
            Constraint::Length(2), // Error
            Constraint::Min(1),    // Hints
        ])
        .split(inner);

    let selected = match form.tab {
        AuthTab::Login => 0,
        AuthTab::SignUp => 1,
    };
    let tabs = Tabs::new(vec!["Login", "Sign Up"])
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .divider("|");
    frame.render_widget(tabs, chunks[0]);

    let focused = form.focused();
    for (field, row) in fields.iter().zip(field_rows(chunks[1], fields.len())) {
        let input = TextInput::new(field.label())
            .content(form.value(*field))
            .masked(field.is_secret())
            .focused(*field == focused)
            .label_width(LABEL_WIDTH);
        frame.render_widget(input, row);
    }

    if let Some(ref error) = form.error {
        let error = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        frame.render_widget(error, chunks[3]);
    }

    let action = match form.tab {
        AuthTab::Login => "Enter: Login",
        AuthTab::SignUp => "Enter: Create Account",
    };
    let hints = Paragraph::new(format!("{}  Tab: Next field  F2: Switch tab  Esc: Quit", action))
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    frame.render_widget(hints, chunks[4]);
}
