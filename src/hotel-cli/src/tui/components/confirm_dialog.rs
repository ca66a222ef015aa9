//! Yes/no modal shown before a delete.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResult {
    Confirmed,
    Cancelled,
    /// Key ignored, dialog still open
    Pending,
}

#[derive(Debug, Default)]
pub struct ConfirmDialog {
    message: String,
    visible: bool,
}

impl ConfirmDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// `y`/Enter confirm, `n`/Esc cancel. Returns `None` while hidden.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ConfirmResult> {
        if !self.visible {
            return None;
        }
        let result = match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => ConfirmResult::Confirmed,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => ConfirmResult::Cancelled,
            _ => return Some(ConfirmResult::Pending),
        };
        self.hide();
        Some(result)
    }

    /// Centered overlay on top of `area`
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let width = 56u16.min(area.width.saturating_sub(4));
        let height = 6u16.min(area.height.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        let dialog = Rect::new(x, y, width, height);

        frame.render_widget(Clear, dialog);

        let key = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let text = vec![
            Line::from(self.message.as_str()),
            Line::from(""),
            Line::from(vec![
                Span::styled("y", key),
                Span::raw(": delete   "),
                Span::styled("n", key),
                Span::raw(": keep"),
            ]),
        ];
        let paragraph = Paragraph::new(text).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(" Confirm Deletion ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
        frame.render_widget(paragraph, dialog);
    }
}
