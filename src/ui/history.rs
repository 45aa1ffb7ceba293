//! Message list rendering for the chat panel.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::model::{Message, Role};

/// Renders the conversation bottom-anchored, so the newest message is
/// always visible after every mutation.
pub struct History<'a> {
    messages: &'a [Message],
    speaker: &'a str,
    accent: Color,
    loading: bool,
}

impl<'a> History<'a> {
    pub fn new(messages: &'a [Message], speaker: &'a str, accent: Color, loading: bool) -> Self {
        Self {
            messages,
            speaker,
            accent,
            loading,
        }
    }

    fn render_message(&self, message: &Message, width: u16) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        let (name, name_style) = match message.role {
            Role::User => ("You".to_string(), Style::default().fg(self.accent)),
            Role::Assistant => (self.speaker.to_string(), Style::default().fg(Color::Green)),
        };

        let timestamp = message.timestamp.format("%H:%M").to_string();
        lines.push(Line::from(vec![
            Span::styled(name, name_style),
            Span::styled(format!("  {timestamp}"), Style::default().fg(Color::DarkGray)),
        ]));

        for content_line in wrap_text(&message.content, width.saturating_sub(2) as usize) {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::raw(content_line),
            ]));
        }

        lines
    }

    fn typing_indicator(&self) -> Vec<Line<'static>> {
        let dots = match (std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis()
            / 300)
            % 4
        {
            0 => ".",
            1 => "..",
            2 => "...",
            _ => "   ",
        };

        vec![
            Line::from(vec![Span::styled(
                self.speaker.to_string(),
                Style::default().fg(Color::Green),
            )]),
            Line::from(vec![
                Span::raw("  "),
                Span::styled("is typing".to_string(), Style::default().fg(Color::DarkGray)),
                Span::styled(dots.to_string(), Style::default().fg(Color::Gray)),
            ]),
        ]
    }
}

impl Widget for History<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut all_lines: Vec<Line> = Vec::new();
        for message in self.messages {
            all_lines.append(&mut self.render_message(message, area.width));
            all_lines.push(Line::from(vec![Span::raw("")]));
        }

        if self.loading {
            all_lines.append(&mut self.typing_indicator());
        }

        // Show the tail that fits, newest message at the bottom.
        let height = area.height as usize;
        let start = all_lines.len().saturating_sub(height);
        for (i, line) in all_lines[start..].iter().enumerate() {
            buf.set_line(area.x, area.y + i as u16, line, area.width);
        }
    }
}

/// Greedy word wrap. Words longer than the width get a line of their own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() {
                word.len()
            } else {
                current.len() + 1 + word.len()
            };

            if needed <= width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
            } else {
                if !current.is_empty() {
                    lines.push(current);
                }
                current = word.to_string();
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
