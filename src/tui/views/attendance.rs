//! Monthly attendance sheet view
//!
//! Location fields, the entry being typed, the ledger with its totals row and
//! a summary of the sheet's submission state.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::models::ServiceEntry;
use crate::services::{EntryField, SubmissionState};
use crate::tui::app::{App, SheetFocus};
use crate::tui::layout::{field_rows, AttendanceLayout};
use crate::tui::widgets::TextInput;

use super::border_color;

const LABEL_WIDTH: u16 = 16;

/// Entry form rows in screen order
const FORM_ROWS: [SheetFocus; 9] = [
    SheetFocus::Entry(EntryField::SheetNumber),
    SheetFocus::Entry(EntryField::Month),
    SheetFocus::Entry(EntryField::Year),
    SheetFocus::Entry(EntryField::Day),
    SheetFocus::ServiceType,
    SheetFocus::Entry(EntryField::Members),
    SheetFocus::Entry(EntryField::Guests),
    SheetFocus::Entry(EntryField::Offerings),
    SheetFocus::Entry(EntryField::Notes),
];

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = AttendanceLayout::new(area);

    render_location(frame, app, layout.location);
    render_form(frame, app, layout.form);
    render_entries(frame, app, layout.entries);
    render_summary(frame, app, layout.summary);
}

fn render_location(frame: &mut Frame, app: &App, area: Rect) {
    let focus = app.sheet_focus();
    let focused = matches!(focus, SheetFocus::District | SheetFocus::Congregation);

    let block = Block::default()
        .title(" Location ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(focused)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let location = app.sheet.location();
    let rows = field_rows(inner, 2);
    let fields = [
        ("District", location.district.as_str(), SheetFocus::District),
        (
            "Congregation",
            location.congregation.as_str(),
            SheetFocus::Congregation,
        ),
    ];
    for ((label, value, target), row) in fields.into_iter().zip(rows) {
        let input = TextInput::new(label)
            .content(value)
            .placeholder("required")
            .focused(focus == target)
            .label_width(LABEL_WIDTH);
        frame.render_widget(input, row);
    }
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let focus = app.sheet_focus();
    let focused = matches!(focus, SheetFocus::Entry(_) | SheetFocus::ServiceType);

    let block = Block::default()
        .title(" New Entry ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(focused)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let draft = app.sheet.draft();
    let service_type = draft
        .service_type
        .map(|s| format!("{} ({})  ←/→ to change", s, s.code()))
        .unwrap_or_default();

    for (target, row) in FORM_ROWS.iter().zip(field_rows(inner, FORM_ROWS.len())) {
        let input = match target {
            SheetFocus::Entry(field) => TextInput::new(field.label())
                .content(draft.get(*field))
                .placeholder(placeholder(*field)),
            _ => TextInput::new("Service Type")
                .content(&service_type)
                .placeholder("S or M"),
        };
        frame.render_widget(input.focused(focus == *target).label_width(LABEL_WIDTH), row);
    }
}

fn placeholder(field: EntryField) -> &'static str {
    match field {
        EntryField::SheetNumber => "001-999",
        EntryField::Day => "1-31",
        EntryField::Offerings => "0.00",
        EntryField::Members | EntryField::Guests => "0",
        _ => "",
    }
}

fn entry_row<'a>(entry: &ServiceEntry, symbol: &str) -> Row<'a> {
    Row::new(vec![
        Cell::from(entry.sheet_number.clone()),
        Cell::from(format!("{:02}", entry.day)),
        Cell::from(entry.service_type.code()),
        Cell::from(entry.members.to_string()),
        Cell::from(entry.guests.to_string()),
        Cell::from(entry.total_attendance().to_string()),
        Cell::from(entry.offerings.format_with_symbol(symbol)),
        Cell::from(entry.notes.clone()),
    ])
}

fn render_entries(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.sheet_focus() == SheetFocus::Entries;
    let entries = app.sheet.entries();
    let month = app
        .sheet
        .ledger()
        .month()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "no entries".to_string());

    let block = Block::default()
        .title(format!(" Entries ({}) ", month))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(focused)));

    if entries.is_empty() {
        let text = Paragraph::new("No entries yet. Fill in the form and press Enter to add one.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        frame.render_widget(text, area);
        return;
    }

    let symbol = app.settings.currency_symbol.as_str();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let header = Row::new(vec![
        "Sheet", "Day", "Type", "Members", "Guests", "Total", "Offerings", "Notes",
    ])
    .style(bold.fg(Color::Yellow))
    .height(1);

    let rows: Vec<Row> = entries.iter().map(|e| entry_row(e, symbol)).collect();

    let totals = app.sheet.totals();
    let footer = Row::new(vec![
        Cell::from("Monthly Totals"),
        Cell::from(""),
        Cell::from(""),
        Cell::from(totals.total_members.to_string()),
        Cell::from(totals.total_guests.to_string()),
        Cell::from(totals.total_attendance.to_string()),
        Cell::from(totals.total_offerings.format_with_symbol(symbol)),
        Cell::from(format!("{} entries", totals.entry_count)),
    ])
    .style(bold.fg(Color::Green));

    let widths = [
        Constraint::Length(6),  // Sheet
        Constraint::Length(4),  // Day
        Constraint::Length(5),  // Type
        Constraint::Length(8),  // Members
        Constraint::Length(7),  // Guests
        Constraint::Length(6),  // Total
        Constraint::Length(12), // Offerings
        Constraint::Min(10),    // Notes
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .footer(footer)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(if focused { "▶ " } else { "  " });

    let mut state = TableState::default();
    state.select(Some(app.selected_entry.min(entries.len() - 1)));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Summary ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let symbol = app.settings.currency_symbol.as_str();
    let totals = app.sheet.totals();
    let sheet_numbers = app.sheet.ledger().sheet_numbers();
    let state = app.sheet.state();
    let state_color = match state {
        SubmissionState::Succeeded(_) => Color::Green,
        SubmissionState::Failed { .. } => Color::Red,
        SubmissionState::Submitting | SubmissionState::Validating => Color::Yellow,
        SubmissionState::Idle => Color::White,
    };

    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Entries:    ", label),
            Span::raw(totals.entry_count.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Attendance: ", label),
            Span::raw(format!("{} people", totals.total_attendance)),
        ]),
        Line::from(vec![
            Span::styled("Offerings:  ", label),
            Span::raw(totals.total_offerings.format_with_symbol(symbol)),
        ]),
        Line::from(vec![
            Span::styled("Sheets:     ", label),
            Span::raw(if sheet_numbers.is_empty() {
                "-".to_string()
            } else {
                sheet_numbers.join(", ")
            }),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Status:     ", label),
            Span::styled(state.to_string(), Style::default().fg(state_color)),
        ]),
    ];
    if let Some(message) = app.sheet.status_message() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            message,
            Style::default().fg(state_color),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
