//! Chat input handling

use super::state::ChatState;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    /// Send the input as a new turn
    Submit,
    Exit,
    ScrollUp,
    ScrollDown,
    ScrollTop,
    ScrollBottom,
}

/// Map a terminal event onto the chat state.
///
/// Exit and scroll keys always work; editing and sending wait for the
/// running turn to finish.
pub fn handle_input(state: &mut ChatState, event: Event) -> InputAction {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(state, key),
        _ => InputAction::None,
    }
}

fn handle_key(state: &mut ChatState, key: KeyEvent) -> InputAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c' | 'q') if ctrl => return InputAction::Exit,
        KeyCode::Up | KeyCode::PageUp => return InputAction::ScrollUp,
        KeyCode::Down | KeyCode::PageDown => return InputAction::ScrollDown,
        KeyCode::Char('u') if ctrl => return InputAction::ScrollTop,
        KeyCode::Char('d') if ctrl => return InputAction::ScrollBottom,
        _ => {}
    }

    // Input stays locked while a turn is running.
    if state.loading {
        return InputAction::None;
    }

    match key.code {
        KeyCode::Enter if !state.input.trim().is_empty() => InputAction::Submit,
        KeyCode::Esc if state.input.is_empty() => InputAction::Exit,
        KeyCode::Esc => {
            state.clear_input();
            InputAction::None
        }
        code => {
            edit(state, code, ctrl);
            InputAction::None
        }
    }
}

/// Apply an editing key to the input buffer; other keys are ignored.
fn edit(state: &mut ChatState, code: KeyCode, ctrl: bool) {
    match code {
        KeyCode::Backspace => state.delete_char(),
        KeyCode::Delete => state.delete_char_forward(),
        KeyCode::Left => state.move_cursor_left(),
        KeyCode::Right => state.move_cursor_right(),
        KeyCode::Home => state.move_cursor_home(),
        KeyCode::End => state.move_cursor_end(),
        KeyCode::Tab => "  ".chars().for_each(|c| state.insert_char(c)),
        KeyCode::Char(c) if !ctrl => state.insert_char(c),
        _ => {}
    }
}
