//! Landing screen: record counts and shortcuts to the three resource screens.
//!
//! ```text
//! +------------+------------+--------------+
//! | Clients    | Services   | Reservations |   counts
//! +------------+------------+--------------+
//! | Clients    | Services   | Reservations |   menu cards
//! +------------+------------+--------------+
//! ```

use crossterm::event::{KeyCode, KeyEvent};
use hotel_sdk::DashboardCounts;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::Component;
use crate::tui::action::Action;
use crate::tui::client::{ConsoleClient, ConsoleClientError};
use crate::tui::state::AppState;

const CARDS: [(&str, &str); 3] = [
    ("Clients", "Manage guest information"),
    ("Services", "Manage available services"),
    ("Reservations", "Booking control"),
];

pub struct Dashboard {
    counts: Option<DashboardCounts>,
    selected: usize,
    stale: bool,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            counts: None,
            selected: 0,
            stale: true,
        }
    }

    pub fn set_counts(&mut self, counts: DashboardCounts) {
        self.counts = Some(counts);
    }

    pub async fn sync(&mut self, client: &ConsoleClient) -> Result<(), ConsoleClientError> {
        self.stale = false;
        let counts = client.dashboard_counts().await?;
        self.set_counts(counts);
        Ok(())
    }

    fn render_counts(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(area);

        let values = self
            .counts
            .map(|c| [c.clients, c.services, c.reservations]);

        for (i, (title, _)) in CARDS.iter().enumerate() {
            let value = values
                .map(|v| v[i].to_string())
                .unwrap_or_else(|| "-".to_string());
            let paragraph = Paragraph::new(vec![
                Line::from(""),
                Line::styled(
                    value,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(format!(" {title} "))
                    .borders(Borders::ALL),
            );
            frame.render_widget(paragraph, columns[i]);
        }
    }

    fn render_menu(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(area);

        for (i, (title, blurb)) in CARDS.iter().enumerate() {
            let border = if i == self.selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let paragraph = Paragraph::new(vec![
                Line::styled(*title, Style::default().add_modifier(Modifier::BOLD)),
                Line::from(*blurb),
                Line::from(""),
                Line::styled("Enter: open", Style::default().fg(Color::DarkGray)),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border));
            frame.render_widget(paragraph, columns[i]);
        }
    }
}

impl Component for Dashboard {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected = self.selected.saturating_sub(1);
                Some(Action::None)
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.selected = (self.selected + 1).min(CARDS.len() - 1);
                Some(Action::None)
            }
            // Tab 0 is the dashboard itself
            KeyCode::Enter => Some(Action::SwitchTab(self.selected + 1)),
            _ => None,
        }
    }

    fn update(&mut self, action: &Action, _state: &mut AppState) {
        if *action == Action::Refresh {
            self.stale = true;
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, _state: &AppState) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Length(6), Constraint::Min(0)])
            .split(area);
        self.render_counts(frame, rows[0]);
        self.render_menu(frame, rows[1]);
    }

    fn needs_sync(&self) -> bool {
        self.stale
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::tui::test_helpers::{assert_buffer_contains, create_test_terminal, press};

    fn state() -> AppState {
        AppState::new("http://localhost:5000/api".into(), Duration::from_secs(30))
    }

    #[test]
    fn starts_stale_and_refresh_marks_stale_again() {
        let mut dashboard = Dashboard::new();
        assert!(dashboard.needs_sync());
        dashboard.stale = false;
        dashboard.update(&Action::Refresh, &mut state());
        assert!(dashboard.needs_sync());
    }

    #[test]
    fn enter_opens_selected_card() {
        let mut dashboard = Dashboard::new();
        assert_eq!(
            dashboard.handle_key_event(press(KeyCode::Enter)),
            Some(Action::SwitchTab(1))
        );
        dashboard.handle_key_event(press(KeyCode::Right));
        dashboard.handle_key_event(press(KeyCode::Right));
        dashboard.handle_key_event(press(KeyCode::Right));
        assert_eq!(
            dashboard.handle_key_event(press(KeyCode::Enter)),
            Some(Action::SwitchTab(3))
        );
        dashboard.handle_key_event(press(KeyCode::Char('h')));
        assert_eq!(
            dashboard.handle_key_event(press(KeyCode::Enter)),
            Some(Action::SwitchTab(2))
        );
    }

    #[test]
    fn unrelated_keys_bubble_up() {
        let mut dashboard = Dashboard::new();
        assert_eq!(dashboard.handle_key_event(press(KeyCode::Char('q'))), None);
    }

    #[test]
    fn render_before_load_shows_placeholders() {
        let mut terminal = create_test_terminal();
        let dashboard = Dashboard::new();
        let state = state();
        terminal
            .draw(|frame| dashboard.render(frame, frame.area(), &state))
            .unwrap();
        assert_buffer_contains(&terminal, "Manage guest information");
        assert_buffer_contains(&terminal, "Booking control");
        assert_buffer_contains(&terminal, "-");
    }

    #[test]
    fn render_shows_counts() {
        let mut terminal = create_test_terminal();
        let mut dashboard = Dashboard::new();
        dashboard.set_counts(DashboardCounts {
            clients: 12,
            services: 5,
            reservations: 347,
        });
        let state = state();
        terminal
            .draw(|frame| dashboard.render(frame, frame.area(), &state))
            .unwrap();
        assert_buffer_contains(&terminal, "12");
        assert_buffer_contains(&terminal, "347");
        assert_eq!(dashboard.counts.map(|c| c.services), Some(5));
    }
}
