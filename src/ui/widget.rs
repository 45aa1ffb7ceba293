use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::controller::{ChatController, Phase};
use crate::model::{ChatbotConfig, CornerPosition};
use crate::ui::composer::Composer;
use crate::ui::history::History;
use crate::ui::theme::Theme;

const BUTTON_LABEL: &str = " Chat ";
const BUTTON_WIDTH: u16 = 10;
const BUTTON_HEIGHT: u16 = 3;
const PANEL_WIDTH: u16 = 44;
const PANEL_HEIGHT: u16 = 18;

/// The docked chat widget: a floating button while closed, the full
/// panel while open, and nothing at all once configuration has failed.
pub struct ChatDock<'a> {
    controller: &'a ChatController,
    composer: &'a Composer,
    theme: &'a Theme,
}

impl<'a> ChatDock<'a> {
    pub fn new(controller: &'a ChatController, composer: &'a Composer, theme: &'a Theme) -> Self {
        Self {
            controller,
            composer,
            theme,
        }
    }

    fn render_button(&self, area: Rect, buf: &mut Buffer) {
        let rect = anchor(area, BUTTON_WIDTH, BUTTON_HEIGHT, self.theme.position);
        let block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().fg(self.theme.accent));
        let inner = block.inner(rect);
        block.render(rect, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let label = Line::from(vec![Span::styled(
            BUTTON_LABEL,
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        )]);
        buf.set_line(inner.x, inner.y, &label, inner.width);
    }

    fn render_panel(&self, area: Rect, buf: &mut Buffer, config: &ChatbotConfig) {
        let rect = anchor(area, PANEL_WIDTH, PANEL_HEIGHT, self.theme.position);
        let block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().fg(self.theme.accent));
        let inner = block.inner(rect);
        block.render(rect, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(3),    // history
                Constraint::Length(3), // composer
            ])
            .split(inner);

        let header = Line::from(vec![
            Span::styled(
                format!(" {} ", config.chatbot_name),
                Style::default()
                    .fg(Color::White)
                    .bg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled("● Online", Style::default().fg(Color::Green)),
        ]);
        buf.set_line(chunks[0].x, chunks[0].y, &header, chunks[0].width);

        History::new(
            self.controller.messages(),
            &config.chatbot_name,
            self.theme.accent,
            self.controller.is_loading(),
        )
        .render(chunks[1], buf);

        self.composer.clone().render(chunks[2], buf);
    }
}

impl Widget for ChatDock<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // A widget whose configuration failed stays invisible; a broken
        // chat button must never be shown.
        if matches!(self.controller.phase(), Phase::Failed(_)) {
            return;
        }

        if !self.controller.is_open() {
            self.render_button(area, buf);
            return;
        }

        match self.controller.config() {
            Some(config) => self.render_panel(area, buf, config),
            // Opened before the configuration arrived; keep the button.
            None => self.render_button(area, buf),
        }
    }
}

/// Rect of the given size docked to one corner of `area`, clamped to fit.
pub fn anchor(area: Rect, width: u16, height: u16, corner: CornerPosition) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);

    let x = match corner {
        CornerPosition::TopLeft | CornerPosition::BottomLeft => area.x,
        CornerPosition::TopRight | CornerPosition::BottomRight => area.x + area.width - w,
    };
    let y = match corner {
        CornerPosition::TopLeft | CornerPosition::TopRight => area.y,
        CornerPosition::BottomLeft | CornerPosition::BottomRight => area.y + area.height - h,
    };

    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}
