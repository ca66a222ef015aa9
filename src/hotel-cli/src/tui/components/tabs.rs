//! Tab bar component

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Tabs as RatatuiTabs};

use super::Component;
use crate::tui::action::Action;
use crate::tui::state::{AppState, Tab};

/// Top-of-screen tab bar showing the screens with their keyboard shortcuts.
pub struct TabBar;

impl Default for TabBar {
    fn default() -> Self {
        Self::new()
    }
}

impl TabBar {
    pub fn new() -> Self {
        Self
    }
}

impl Component for TabBar {
    fn handle_key_event(&mut self, _key: KeyEvent) -> Option<Action> {
        None
    }

    fn update(&mut self, _action: &Action, _state: &mut AppState) {}

    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let titles: Vec<Line<'_>> = Tab::ALL
            .iter()
            .map(|tab| Line::from(format!("[{}] {}", tab.shortcut(), tab.label())))
            .collect();

        let tabs = RatatuiTabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title("Hotel SGS"))
            .select(state.active_tab.index())
            .style(Style::default().fg(Color::White))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("|");

        frame.render_widget(tabs, area);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::tui::test_helpers::assert_buffer_contains;

    fn render_tab_bar(state: &AppState) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(80, 3)).unwrap();
        let tab_bar = TabBar::new();
        terminal
            .draw(|frame| {
                tab_bar.render(frame, frame.area(), state);
            })
            .unwrap();
        terminal
    }

    #[test]
    fn test_all_tabs_rendered() {
        let state = AppState::new("http://localhost:5000/api".into(), Duration::from_secs(30));
        let terminal = render_tab_bar(&state);
        assert_buffer_contains(&terminal, "Hotel SGS");
        assert_buffer_contains(&terminal, "[1] Dashboard");
        assert_buffer_contains(&terminal, "[2] Clients");
        assert_buffer_contains(&terminal, "[3] Services");
        assert_buffer_contains(&terminal, "[4] Reservations");
    }

    #[test]
    fn test_active_tab_highlighted() {
        let mut state = AppState::new("http://localhost:5000/api".into(), Duration::from_secs(30));
        state.active_tab = Tab::Services;
        let terminal = render_tab_bar(&state);

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|c| c.symbol()).collect();
        let pos = content.find("[3] Services").unwrap();
        let cell = &buffer.content()[pos];
        assert_eq!(cell.fg, Color::Cyan);
    }
}
