//! Confirmation dialog
//!
//! Yes/no prompt shown before a destructive action runs

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::ConfirmAction;
use crate::tui::layout::centered_rect_fixed;

const DIALOG_WIDTH: u16 = 56;
const DIALOG_HEIGHT: u16 = 7;

/// Render the prompt for a pending action over the current screen
pub fn render(frame: &mut Frame, action: ConfirmAction) {
    let area = centered_rect_fixed(DIALOG_WIDTH, DIALOG_HEIGHT, frame.area());
    if area.is_empty() {
        return;
    }

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            action.message(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y]", Style::default().fg(Color::Green)),
            Span::raw(" Yes  "),
            Span::styled("[N]", Style::default().fg(Color::Red)),
            Span::raw(" No  "),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
