//! Sign-in screen shown until a session exists.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::Component;
use crate::tui::action::Action;
use crate::tui::client::ConsoleClientError;
use crate::tui::state::AppState;
use crate::tui::widgets::text_input::{TextInput, TextInputAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Email,
    Password,
}

/// Email and password waiting to be sent to the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub struct LoginScreen {
    email: TextInput,
    password: TextInput,
    focus: Focus,
    error: Option<String>,
    submitting: bool,
    submission: Option<Credentials>,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            email: TextInput::with_placeholder("admin@hotelsgs.com"),
            password: TextInput::masked("password"),
            focus: Focus::Email,
            error: None,
            submitting: false,
            submission: None,
        }
    }

    /// Back to an empty form
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[cfg(test)]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_submission(&self) -> bool {
        self.submission.is_some()
    }

    /// Hand the credentials to the caller. The screen keeps showing
    /// "Signing in..." until [`finish`](Self::finish) is called.
    pub fn take_submission(&mut self) -> Option<Credentials> {
        self.submission.take()
    }

    /// Record how the login request went.
    pub fn finish(&mut self, result: &Result<(), ConsoleClientError>) {
        self.submitting = false;
        match result {
            Ok(()) => self.reset(),
            Err(ConsoleClientError::InvalidCredentials) => {
                self.error = Some("Incorrect email or password".to_string());
                self.password.clear();
                self.focus = Focus::Password;
            }
            Err(e) => {
                tracing::warn!("Login failed: {e}");
                self.error = Some("Login failed. Please try again.".to_string());
            }
        }
    }

    fn submit(&mut self) {
        if self.email.is_blank() || self.password.is_blank() {
            self.error = Some("Email and password are required".to_string());
            return;
        }
        self.error = None;
        self.submitting = true;
        self.submission = Some(Credentials {
            email: self.email.text().trim().to_string(),
            password: self.password.text().to_string(),
        });
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Email => Focus::Password,
            Focus::Password => Focus::Email,
        };
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            Focus::Email => &mut self.email,
            Focus::Password => &mut self.password,
        }
    }
}

impl Component for LoginScreen {
    /// Every key is consumed; the global shortcuts only apply once signed in.
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        if self.submitting {
            return Some(Action::None);
        }
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => self.toggle_focus(),
            _ => match self.focused_input().handle_key(key) {
                TextInputAction::Submit => self.submit(),
                TextInputAction::Cancel => self.error = None,
                TextInputAction::Changed | TextInputAction::Unhandled => {}
            },
        }
        Some(Action::None)
    }

    fn update(&mut self, _action: &Action, _state: &mut AppState) {}

    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let width = 60u16.min(area.width);
        let height = 16u16.min(area.height);
        let card = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );

        let block = Block::default()
            .title(" Hotel SGS ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(1),
            ])
            .split(inner);

        let subtitle = Paragraph::new(format!("Sign in to {}", state.url))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(subtitle, chunks[0]);

        self.email
            .render(frame, chunks[1], "Email", self.focus == Focus::Email);
        self.password
            .render(frame, chunks[2], "Password", self.focus == Focus::Password);

        let button = if self.submitting {
            Paragraph::new("Signing in...").style(Style::default().fg(Color::Yellow))
        } else {
            Paragraph::new("[ Sign in ]").style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        };
        frame.render_widget(button.alignment(Alignment::Center), chunks[3]);

        if let Some(error) = &self.error {
            let error = Paragraph::new(error.as_str())
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Red));
            frame.render_widget(error, chunks[4]);
        }
    }
}
