//! Returns form view

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::models::attachment::format_megabytes;
use crate::models::{MAX_ATTACHMENTS, MAX_TOTAL_BYTES};
use crate::services::{ReturnField, SubmissionState};
use crate::tui::app::{App, ReturnsFocus};
use crate::tui::layout::{field_rows, ReturnsLayout};
use crate::tui::widgets::TextInput;

use super::border_color;

const LABEL_WIDTH: u16 = 18;

/// Form rows in screen order
const FORM_ROWS: [ReturnsFocus; 11] = [
    ReturnsFocus::Field(ReturnField::CustomerName),
    ReturnsFocus::Field(ReturnField::CustomerEmail),
    ReturnsFocus::Field(ReturnField::CustomerPhone),
    ReturnsFocus::Field(ReturnField::OrderNumber),
    ReturnsFocus::Field(ReturnField::ReturnDate),
    ReturnsFocus::Field(ReturnField::ProductSku),
    ReturnsFocus::Field(ReturnField::ProductName),
    ReturnsFocus::Field(ReturnField::Quantity),
    ReturnsFocus::Reason,
    ReturnsFocus::Urgency,
    ReturnsFocus::Field(ReturnField::Notes),
];

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = ReturnsLayout::new(area);

    render_form(frame, app, layout.form);
    render_attachments(frame, app, layout.attachments);
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let focus = app.returns_focus();
    let focused = FORM_ROWS.contains(&focus);

    let block = Block::default()
        .title(" Return Request ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(focused)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FORM_ROWS.len() as u16),
            Constraint::Length(1),
            Constraint::Min(1), // Status
        ])
        .split(inner);

    let draft = app.returns.draft();
    let reason = format!("{}  ←/→", draft.reason);
    let urgency = format!("{}  ←/→", draft.urgency);

    for (target, row) in FORM_ROWS.iter().zip(field_rows(chunks[0], FORM_ROWS.len())) {
        let input = match target {
            ReturnsFocus::Field(field) => TextInput::new(field.label())
                .content(draft.get(*field))
                .placeholder(placeholder(*field)),
            ReturnsFocus::Reason => TextInput::new("Reason").content(&reason),
            _ => TextInput::new("Urgency").content(&urgency),
        };
        frame.render_widget(input.focused(focus == *target).label_width(LABEL_WIDTH), row);
    }

    let state = app.returns.state();
    let color = match state {
        SubmissionState::Succeeded(_) => Color::Green,
        SubmissionState::Failed { .. } => Color::Red,
        SubmissionState::Idle => Color::DarkGray,
        _ => Color::Yellow,
    };
    let text = app
        .returns
        .status_message()
        .unwrap_or_else(|| state.to_string());
    let status = Paragraph::new(text)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[2]);
}

fn placeholder(field: ReturnField) -> &'static str {
    match field {
        ReturnField::CustomerEmail => "name@example.com",
        ReturnField::OrderNumber => "ORD-12345",
        ReturnField::ReturnDate => "YYYY-MM-DD",
        _ => "",
    }
}

fn render_attachments(frame: &mut Frame, app: &App, area: Rect) {
    let focus = app.returns_focus();
    let focused = matches!(focus, ReturnsFocus::AttachPath | ReturnsFocus::Attachments);
    let attachments = app.returns.attachments();

    let block = Block::default()
        .title(format!(
            " Documents ({}/{}) ",
            attachments.len(),
            MAX_ATTACHMENTS
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(focused)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Path
            Constraint::Length(1),
            Constraint::Min(1),    // Files
            Constraint::Length(1), // Total size
        ])
        .split(inner);

    let path = TextInput::new("File")
        .content(&app.attach_path)
        .placeholder("path to PDF, image or document, then Enter")
        .focused(focus == ReturnsFocus::AttachPath);
    frame.render_widget(path, chunks[0]);

    if attachments.is_empty() {
        let empty = Paragraph::new("At least one document is required.")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, chunks[2]);
    } else {
        let items: Vec<ListItem> = attachments
            .files()
            .iter()
            .map(|file| {
                ListItem::new(Line::from(vec![
                    Span::raw(file.file_name.clone()),
                    Span::styled(
                        format!("  {}", file.size_display()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol(if focus == ReturnsFocus::Attachments {
                "▶ "
            } else {
                "  "
            });
        let mut state = ListState::default();
        state.select(Some(app.selected_attachment.min(attachments.len() - 1)));
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    let total = Paragraph::new(format!(
        "Total: {} of {}",
        format_megabytes(attachments.total_bytes()),
        format_megabytes(MAX_TOTAL_BYTES)
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(total, chunks[3]);
}
