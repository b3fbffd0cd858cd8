//! Dashboard view
//!
//! Menu of the two forms plus logout.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::tui::app::{App, MenuItem};
use crate::tui::layout::centered_rect_fixed;

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let panel = centered_rect_fixed(44, MenuItem::ALL.len() as u16 + 4, area);

    let block = Block::default()
        .title(" Dashboard ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let items: Vec<ListItem> = MenuItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let shortcut = match item {
                MenuItem::Logout => "   ".to_string(),
                _ => format!("{}. ", i + 1),
            };
            ListItem::new(Line::from(vec![
                Span::styled(shortcut, Style::default().fg(Color::DarkGray)),
                Span::raw(item.label()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.menu_index));
    frame.render_stateful_widget(list, panel, &mut state);
}
