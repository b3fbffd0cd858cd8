//! Status bar view
//!
//! Shows the current screen, the reporting month, submission state and key
//! hints.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::services::SubmissionState;
use crate::tui::app::{App, Screen};

const CONFIRM_HINTS: &str = " y/Enter:Confirm  n/Esc:Cancel ";

fn key_hints(screen: Screen) -> &'static str {
    match screen {
        Screen::Login => " Tab:Next  F2:Sign Up/Login  Enter:Submit  Esc:Quit ",
        Screen::Dashboard => " j/k:Move  Enter:Open  1/2:Jump  q:Quit ",
        Screen::Attendance => " Tab:Next  Enter:Add  d:Delete  ^K:Clear  ^S:Submit  Esc:Back ",
        Screen::Returns => " Tab:Next  Enter:Attach  d:Remove  ^S:Submit  Esc:Back ",
    }
}

fn state_color(state: &SubmissionState) -> Color {
    match state {
        SubmissionState::Idle => Color::White,
        SubmissionState::Validating | SubmissionState::Submitting => Color::Yellow,
        SubmissionState::Succeeded(_) => Color::Green,
        SubmissionState::Failed { .. } => Color::Red,
    }
}

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut spans = vec![];

    let (title, state) = match app.screen {
        Screen::Login => ("Sign in", None),
        Screen::Dashboard => ("Dashboard", None),
        Screen::Attendance => ("Attendance", Some(app.sheet.state())),
        Screen::Returns => ("Returns", Some(app.returns.state())),
    };

    spans.push(Span::styled(
        format!(" {} ", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));

    if app.screen == Screen::Attendance {
        let month = app
            .sheet
            .ledger()
            .month()
            .map(|m| m.to_string())
            .unwrap_or_else(|| {
                let draft = app.sheet.draft();
                format!("{}/{}", draft.month, draft.year)
            });
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(month, Style::default().fg(Color::White)));
    }

    if let Some(state) = state {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            state.to_string(),
            Style::default().fg(state_color(state)),
        ));
    }

    // Key hints (right-aligned)
    let hints = if app.pending_confirm.is_some() {
        CONFIRM_HINTS
    } else {
        key_hints(app.screen)
    };
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
