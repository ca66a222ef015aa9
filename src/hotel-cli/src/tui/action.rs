//! Actions that drive console state transitions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Global actions, produced by key presses no screen consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    SwitchTab(usize),
    NextTab,
    PrevTab,
    Refresh,
    Logout,
    None,
}

/// Map a key event to an [`Action`].
pub fn map_key_to_action(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('1') => Action::SwitchTab(0),
        KeyCode::Char('2') => Action::SwitchTab(1),
        KeyCode::Char('3') => Action::SwitchTab(2),
        KeyCode::Char('4') => Action::SwitchTab(3),
        KeyCode::Tab => Action::NextTab,
        KeyCode::BackTab => Action::PrevTab,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('L') => Action::Logout,
        _ => Action::None,
    }
}

/// Ctrl-C quits from anywhere, even while a text field has focus.
pub fn is_force_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_helpers::{press, press_with};

    #[test]
    fn q_maps_to_quit() {
        assert_eq!(map_key_to_action(press(KeyCode::Char('q'))), Action::Quit);
    }

    #[test]
    fn ctrl_c_maps_to_quit() {
        let key = press_with(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key_to_action(key), Action::Quit);
        assert!(is_force_quit(&key));
        assert!(!is_force_quit(&press(KeyCode::Char('c'))));
    }

    #[test]
    fn number_keys_map_to_switch_tab() {
        for (ch, idx) in [('1', 0), ('2', 1), ('3', 2), ('4', 3)] {
            assert_eq!(
                map_key_to_action(press(KeyCode::Char(ch))),
                Action::SwitchTab(idx)
            );
        }
        assert_eq!(map_key_to_action(press(KeyCode::Char('5'))), Action::None);
    }

    #[test]
    fn tab_keys_cycle() {
        assert_eq!(map_key_to_action(press(KeyCode::Tab)), Action::NextTab);
        assert_eq!(
            map_key_to_action(press_with(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Action::PrevTab
        );
    }

    #[test]
    fn refresh_and_logout() {
        assert_eq!(map_key_to_action(press(KeyCode::Char('r'))), Action::Refresh);
        assert_eq!(
            map_key_to_action(press_with(KeyCode::Char('L'), KeyModifiers::SHIFT)),
            Action::Logout
        );
        assert_eq!(map_key_to_action(press(KeyCode::Char('l'))), Action::None);
    }
}
