use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::*;

fn options(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn type_str(state: &mut SelectorState, text: &str) {
    for c in text.chars() {
        assert_eq!(state.handle_key(key(KeyCode::Char(c))), Outcome::Continue);
    }
}

#[test]
fn starts_on_preselected_option() {
    let state = SelectorState::single("cluster", options(&["a", "b", "c"]), 2);
    assert_eq!(state.highlighted(), Some("c"));
}

#[test]
fn preselection_is_clamped() {
    let state = SelectorState::single("cluster", options(&["a", "b"]), 9);
    assert_eq!(state.highlighted(), Some("b"));
}

#[test]
fn navigation_stays_in_bounds() {
    let mut state = SelectorState::single("user", options(&["a", "b"]), 0);
    state.handle_key(key(KeyCode::Up));
    assert_eq!(state.selected(), 0);
    state.handle_key(key(KeyCode::Down));
    state.handle_key(key(KeyCode::Down));
    assert_eq!(state.highlighted(), Some("b"));
    state.handle_key(ctrl('p'));
    assert_eq!(state.highlighted(), Some("a"));
    state.handle_key(key(KeyCode::End));
    assert_eq!(state.highlighted(), Some("b"));
    state.handle_key(key(KeyCode::Home));
    assert_eq!(state.highlighted(), Some("a"));
}

#[test]
fn typing_filters_case_insensitively_and_resets_selection() {
    let mut state = SelectorState::single("namespace", options(&["default", "kube-system", "Kube-public"]), 1);
    type_str(&mut state, "KUBE");
    assert_eq!(state.filter(), "KUBE");
    assert_eq!(state.filtered(), vec!["kube-system", "Kube-public"]);
    assert_eq!(state.selected(), 0);

    state.handle_key(key(KeyCode::Backspace));
    assert_eq!(state.filter(), "KUB");
    state.handle_key(ctrl('u'));
    assert_eq!(state.filtered().len(), 3);
}

#[test]
fn enter_confirms_highlighted() {
    let mut state = SelectorState::single("cluster", options(&["us-east", "us-west"]), 0);
    type_str(&mut state, "west");
    assert_eq!(state.handle_key(key(KeyCode::Enter)), Outcome::Confirm);
    assert_eq!(state.highlighted(), Some("us-west"));
}

#[test]
fn enter_without_match_is_ignored() {
    let mut state = SelectorState::single("cluster", options(&["us-east"]), 0);
    type_str(&mut state, "zzz");
    assert_eq!(state.handle_key(key(KeyCode::Enter)), Outcome::Continue);
}

#[test]
fn escape_and_ctrl_c_cancel() {
    let mut state = SelectorState::single("user", options(&["a"]), 0);
    assert_eq!(state.handle_key(key(KeyCode::Esc)), Outcome::Cancel);
    assert_eq!(state.handle_key(ctrl('c')), Outcome::Cancel);
}

#[test]
fn space_is_text_in_single_mode() {
    let mut state = SelectorState::single("user", options(&["a b", "c"]), 0);
    type_str(&mut state, "a ");
    assert_eq!(state.filtered(), vec!["a b"]);
}

#[test]
fn multi_select_toggles_marks() {
    let mut state = SelectorState::multi("cluster", options(&["a", "b", "c"]), &options(&["b", "gone"]));
    assert!(state.is_multi());
    assert_eq!(state.marked(), options(&["b"]));

    state.handle_key(key(KeyCode::Char(' ')));
    state.handle_key(key(KeyCode::Down));
    state.handle_key(key(KeyCode::Char(' ')));
    state.handle_key(key(KeyCode::Down));
    state.handle_key(key(KeyCode::Char(' ')));
    assert_eq!(state.marked(), options(&["a", "c"]));
    assert!(state.is_marked("c"));
    assert!(!state.is_marked("b"));
}

#[test]
fn multi_select_confirms_empty_set() {
    let mut state = SelectorState::multi("cluster", options(&["a"]), &[]);
    assert_eq!(state.handle_key(key(KeyCode::Enter)), Outcome::Confirm);
    assert!(state.marked().is_empty());
}
