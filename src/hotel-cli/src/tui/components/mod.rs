//! Component trait and the console screens

pub mod clients;
pub mod confirm_dialog;
pub mod dashboard;
pub mod form;
pub mod login;
pub mod reservations;
pub mod services;
pub mod status_bar;
pub mod tabs;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use super::action::Action;
use super::state::AppState;

/// Lifecycle shared by every screen and bar.
///
/// [`App`](super::app::App) delegates key handling, global actions and
/// rendering through this trait.
pub trait Component {
    /// Translate a key press into an [`Action`], or `None` to let the
    /// parent handle it.
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action>;

    /// React to an action that was dispatched globally.
    fn update(&mut self, action: &Action, state: &mut AppState);

    /// Draw the component into the given area.
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState);

    /// Whether the component is waiting on a request to the API
    fn needs_sync(&self) -> bool {
        false
    }

    /// Whether that request includes a user-initiated write
    fn has_pending_write(&self) -> bool {
        false
    }
}

/// What the right-hand pane of a resource screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneView {
    /// Instructions only
    Empty,
    /// Read-only view of the selected row
    Detail,
    Create,
    /// Form for the record with this id
    Edit(i64),
}

impl PaneView {
    pub fn is_form(&self) -> bool {
        matches!(self, PaneView::Create | PaneView::Edit(_))
    }
}

/// Move a list selection for Up/Down/j/k. Returns false for any other key.
pub fn move_selection(selected: &mut usize, len: usize, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            *selected = selected.saturating_sub(1);
            true
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if *selected + 1 < len {
                *selected += 1;
            }
            true
        }
        _ => false,
    }
}

pub fn row_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

pub fn header_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn active_color(active: bool) -> Color {
    if active { Color::Green } else { Color::Red }
}
