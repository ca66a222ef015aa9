use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

/// Create a test terminal with standard dimensions (120x40)
pub fn create_test_terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(120, 40)).unwrap()
}

/// Every cell symbol of the last drawn frame, row after row
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer().clone();
    buffer.content().iter().map(|c| c.symbol()).collect()
}

/// Assert that the terminal buffer contains the given text
pub fn assert_buffer_contains(terminal: &Terminal<TestBackend>, text: &str) {
    let content = buffer_text(terminal);
    assert!(
        content.contains(text),
        "Buffer does not contain '{text}'.\nBuffer content: {content}"
    );
}

/// A plain key press
pub fn press(code: KeyCode) -> KeyEvent {
    press_with(code, KeyModifiers::NONE)
}

pub fn press_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Press each character of `text` in turn
pub fn type_text(handler: &mut impl FnMut(KeyEvent), text: &str) {
    for c in text.chars() {
        handler(press(KeyCode::Char(c)));
    }
}
