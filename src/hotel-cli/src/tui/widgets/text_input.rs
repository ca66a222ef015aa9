//! Single-line text field used by the login screen, the resource forms and
//! the search bars.
//!
//! Editing keys: characters insert at the cursor, Backspace/Delete remove,
//! Left/Right/Home/End move, Ctrl-A/Ctrl-E jump, Ctrl-U/Ctrl-K cut.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

const MASK: char = '•';
const CURSOR: char = '\u{2588}';

/// A single-line text input with cursor tracking.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    text: String,
    /// Byte offset into `text`
    cursor: usize,
    placeholder: String,
    masked: bool,
}

/// What a key press did to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInputAction {
    Submit,
    Cancel,
    Changed,
    Unhandled,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placeholder(placeholder: &str) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            ..Self::default()
        }
    }

    /// Input that renders every character as a bullet, for passwords.
    pub fn masked(placeholder: &str) -> Self {
        Self {
            masked: true,
            ..Self::with_placeholder(placeholder)
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Replace the contents and park the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.text.len())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> TextInputAction {
        match key.code {
            KeyCode::Enter => return TextInputAction::Submit,
            KeyCode::Esc => return TextInputAction::Cancel,
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => match c {
                'a' => self.cursor = 0,
                'e' => self.cursor = self.text.len(),
                'u' => {
                    self.text.drain(..self.cursor);
                    self.cursor = 0;
                }
                'k' => self.text.truncate(self.cursor),
                _ => return TextInputAction::Unhandled,
            },
            KeyCode::Char(c) => {
                self.text.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            KeyCode::Backspace => {
                let prev = self.prev_boundary();
                self.text.drain(prev..self.cursor);
                self.cursor = prev;
            }
            KeyCode::Delete => {
                let next = self.next_boundary();
                self.text.drain(self.cursor..next);
            }
            KeyCode::Left => self.cursor = self.prev_boundary(),
            KeyCode::Right => self.cursor = self.next_boundary(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.len(),
            _ => return TextInputAction::Unhandled,
        }
        TextInputAction::Changed
    }

    /// Text as it should appear on screen, with the cursor block when focused.
    fn display(&self, focused: bool) -> String {
        let shown = |s: &str| {
            if self.masked {
                MASK.to_string().repeat(s.chars().count())
            } else {
                s.to_string()
            }
        };
        if focused {
            let (before, after) = self.text.split_at(self.cursor);
            format!("{}{CURSOR}{}", shown(before), shown(after))
        } else {
            shown(&self.text)
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str, focused: bool) {
        let border = if focused { Color::Yellow } else { Color::DarkGray };
        let block = Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));

        let (text, style) = if self.text.is_empty() && !focused {
            (self.placeholder.clone(), Style::default().fg(Color::DarkGray))
        } else if focused {
            (self.display(true), Style::default().fg(Color::White))
        } else {
            (self.display(false), Style::default().fg(Color::Gray))
        };

        frame.render_widget(Paragraph::new(text).style(style).block(block), area);
    }
}
