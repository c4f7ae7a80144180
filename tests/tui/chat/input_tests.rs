//! Input handling tests

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use expense_mcp_chat::domain::SessionContext;
use expense_mcp_chat::tui::screens::chat::{ChatState, InputAction, handle_input};

fn state() -> ChatState {
    ChatState::new(SessionContext::new(None))
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

fn type_text(state: &mut ChatState, text: &str) {
    for c in text.chars() {
        handle_input(state, key(KeyCode::Char(c)));
    }
}

#[test]
fn test_typing_fills_input() {
    let mut state = state();
    type_text(&mut state, "total?");
    assert_eq!(state.input, "total?");
    assert_eq!(state.cursor_pos, 6);
}

#[test]
fn test_enter_submits_non_blank_input() {
    let mut state = state();
    assert_eq!(handle_input(&mut state, key(KeyCode::Enter)), InputAction::None);

    type_text(&mut state, "   ");
    assert_eq!(handle_input(&mut state, key(KeyCode::Enter)), InputAction::None);

    state.clear_input();
    type_text(&mut state, "hi");
    assert_eq!(handle_input(&mut state, key(KeyCode::Enter)), InputAction::Submit);
}

#[test]
fn test_escape_clears_then_exits() {
    let mut state = state();
    type_text(&mut state, "draft");
    assert_eq!(handle_input(&mut state, key(KeyCode::Esc)), InputAction::None);
    assert!(state.input.is_empty());
    assert_eq!(handle_input(&mut state, key(KeyCode::Esc)), InputAction::Exit);
}

#[test]
fn test_ctrl_c_and_ctrl_q_exit_even_while_loading() {
    let mut state = state();
    state.loading = true;
    assert_eq!(handle_input(&mut state, ctrl('c')), InputAction::Exit);
    assert_eq!(handle_input(&mut state, ctrl('q')), InputAction::Exit);
}

#[test]
fn test_input_is_locked_while_loading() {
    let mut state = state();
    type_text(&mut state, "next");
    state.loading = true;

    type_text(&mut state, "!");
    assert_eq!(handle_input(&mut state, key(KeyCode::Enter)), InputAction::None);
    assert_eq!(handle_input(&mut state, key(KeyCode::Backspace)), InputAction::None);
    assert_eq!(state.input, "next");
}

#[test]
fn test_scroll_keys_work_while_loading() {
    let mut state = state();
    state.loading = true;
    assert_eq!(handle_input(&mut state, key(KeyCode::Up)), InputAction::ScrollUp);
    assert_eq!(handle_input(&mut state, key(KeyCode::PageDown)), InputAction::ScrollDown);
    assert_eq!(handle_input(&mut state, ctrl('u')), InputAction::ScrollTop);
    assert_eq!(handle_input(&mut state, ctrl('d')), InputAction::ScrollBottom);
}

#[test]
fn test_tab_inserts_two_spaces() {
    let mut state = state();
    handle_input(&mut state, key(KeyCode::Tab));
    assert_eq!(state.input, "  ");
}

#[test]
fn test_key_release_is_ignored() {
    let mut state = state();
    let mut release = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
    release.kind = KeyEventKind::Release;
    assert_eq!(handle_input(&mut state, Event::Key(release)), InputAction::None);
    assert!(state.input.is_empty());
}

#[test]
fn test_cursor_editing_keys() {
    let mut state = state();
    type_text(&mut state, "abc");
    handle_input(&mut state, key(KeyCode::Home));
    handle_input(&mut state, key(KeyCode::Delete));
    assert_eq!(state.input, "bc");

    handle_input(&mut state, key(KeyCode::End));
    handle_input(&mut state, key(KeyCode::Left));
    handle_input(&mut state, key(KeyCode::Backspace));
    assert_eq!(state.input, "c");
    assert_eq!(state.cursor_pos, 0);
}
