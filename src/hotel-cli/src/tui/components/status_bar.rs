//! Bottom status bar component

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use super::Component;
use crate::tui::action::Action;
use crate::tui::state::{AppState, ConnectionStatus};

/// Bottom status bar with connection state, the signed-in user and keybind hints.
pub struct StatusBar;

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self
    }
}

impl Component for StatusBar {
    fn handle_key_event(&mut self, _key: KeyEvent) -> Option<Action> {
        None
    }

    fn update(&mut self, _action: &Action, _state: &mut AppState) {}

    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::horizontal([
            Constraint::Percentage(45),
            Constraint::Percentage(20),
            Constraint::Percentage(35),
        ])
        .split(area);

        let (indicator, color) = match &state.connection_status {
            ConnectionStatus::Connected => ("Connected", Color::Green),
            ConnectionStatus::Disconnected => ("Disconnected", Color::Red),
            ConnectionStatus::Connecting => ("Connecting", Color::Yellow),
        };

        let left_text = if let Some(ref err) = state.last_error {
            let when = state
                .last_error_at
                .map(|ts| {
                    chrono::DateTime::<chrono::Local>::from(ts)
                        .format("%H:%M:%S")
                        .to_string()
                })
                .unwrap_or_else(|| "--:--:--".to_string());
            format!("{indicator} {url} | [{when}] {err}", url = state.url)
        } else {
            format!("{indicator} {url}", url = state.url)
        };

        let left = Paragraph::new(Span::styled(left_text, Style::default().fg(color)));
        frame.render_widget(left, chunks[0]);

        let user = state.signed_in_as.as_deref().unwrap_or("Signed out");
        let center = Paragraph::new(user)
            .style(Style::default().fg(Color::White))
            .centered();
        frame.render_widget(center, chunks[1]);

        let hints = if state.is_signed_in() {
            "q: Quit  r: Refresh  /: Search  L: Logout"
        } else {
            "Enter: Sign in  Ctrl-C: Quit"
        };
        let right = Paragraph::new(hints)
            .style(Style::default().fg(Color::DarkGray))
            .right_aligned();
        frame.render_widget(right, chunks[2]);
    }
}
