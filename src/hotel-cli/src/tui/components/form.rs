//! Stack of labelled text inputs used by the create/edit panes.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::widgets::text_input::{TextInput, TextInputAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Submit,
    Cancel,
    Editing,
}

struct Field {
    label: &'static str,
    input: TextInput,
}

pub struct Form {
    fields: Vec<Field>,
    focus: usize,
    error: Option<String>,
}

impl Form {
    /// One field per `(label, placeholder)` pair, in display order
    pub fn new(fields: &[(&'static str, &str)]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|&(label, placeholder)| Field {
                    label,
                    input: TextInput::with_placeholder(placeholder),
                })
                .collect(),
            focus: 0,
            error: None,
        }
    }

    /// Empty every field and focus the first one
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.input.clear();
        }
        self.focus = 0;
        self.error = None;
    }

    /// Fill the form from `values`, in field order
    pub fn load(&mut self, values: &[String]) {
        self.reset();
        for (field, value) in self.fields.iter_mut().zip(values) {
            field.input.set_text(value);
        }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|f| f.input.text().trim())
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        let len = self.fields.len().max(1);
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % len;
                FormOutcome::Editing
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + len - 1) % len;
                FormOutcome::Editing
            }
            _ => {
                let Some(field) = self.fields.get_mut(self.focus) else {
                    return FormOutcome::Editing;
                };
                match field.input.handle_key(key) {
                    TextInputAction::Submit => FormOutcome::Submit,
                    TextInputAction::Cancel => FormOutcome::Cancel,
                    TextInputAction::Changed => {
                        self.error = None;
                        FormOutcome::Editing
                    }
                    TextInputAction::Unhandled => FormOutcome::Editing,
                }
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str) {
        let block = Block::default()
            .title(format!(" {title} (Tab: next field, Enter: save, Esc: cancel) "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints: Vec<Constraint> =
            self.fields.iter().map(|_| Constraint::Length(3)).collect();
        constraints.push(Constraint::Min(0));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in self.fields.iter().enumerate() {
            field
                .input
                .render(frame, chunks[i], field.label, i == self.focus);
        }

        if let Some(error) = &self.error {
            let error = Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red));
            frame.render_widget(error, chunks[self.fields.len()]);
        }
    }
}
