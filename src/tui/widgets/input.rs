//! Labelled single-line field
//!
//! Renders a form field's current value. Editing happens on the form state
//! itself so every keystroke passes through that field's filter.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// A labelled text field
#[derive(Debug, Clone, Default)]
pub struct TextInput<'a> {
    label: &'a str,
    content: &'a str,
    placeholder: &'a str,
    focused: bool,
    masked: bool,
    label_width: u16,
}

impl<'a> TextInput<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            label_width: label.chars().count() as u16 + 2,
            ..Self::default()
        }
    }

    pub fn content(mut self, content: &'a str) -> Self {
        self.content = content;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Show one `*` per character instead of the content
    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    /// Pad labels to a common width so values line up
    pub fn label_width(mut self, width: u16) -> Self {
        self.label_width = self.label_width.max(width);
        self
    }

    fn display_text(&self) -> String {
        if self.content.is_empty() && !self.focused {
            self.placeholder.to_string()
        } else if self.masked {
            "*".repeat(self.content.chars().count())
        } else {
            self.content.to_string()
        }
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let label_style = if self.focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let label_line = Line::from(vec![
            Span::styled(self.label, label_style),
            Span::raw(": "),
        ]);
        buf.set_line(area.x, area.y, &label_line, self.label_width.min(area.width));

        let input_start = area.x + self.label_width;
        if input_start >= area.x + area.width {
            return;
        }

        let text = self.display_text();
        let text_style = if self.content.is_empty() && !self.focused {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        let room = (area.x + area.width - input_start) as usize;
        buf.set_stringn(input_start, area.y, &text, room, text_style);

        if self.focused {
            let cursor_x = input_start + text.chars().count() as u16;
            if cursor_x < area.x + area.width {
                buf.set_string(
                    cursor_x,
                    area.y,
                    "_",
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_display() {
        let input = TextInput::new("Password").content("secret").masked(true);
        assert_eq!(input.display_text(), "******");
    }

    #[test]
    fn test_placeholder_only_when_unfocused_and_empty() {
        let input = TextInput::new("Day").placeholder("1-31");
        assert_eq!(input.display_text(), "1-31");
        assert_eq!(input.clone().focused(true).display_text(), "");
        assert_eq!(input.content("5").display_text(), "5");
    }

    #[test]
    fn test_render_label_and_value() {
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        TextInput::new("Day").content("12").render(area, &mut buf);
        let line: String = (0..area.width)
            .map(|x| buf.get(x, 0).symbol().to_string())
            .collect();
        assert!(line.starts_with("Day: 12"));
    }
}
