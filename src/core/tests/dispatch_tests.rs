//! Dispatch decision tests
//!
//! End-to-end over `handle_key_event` with a `ClassDocument` standing in for
//! the host document and a `RecordingHost` capturing side effects.

use crate::config::Settings;
use crate::context::ClassDocument;
use crate::core::dispatch::{
    handle_key_event, resolve_action, DispatchOutcome, DispatchTarget, RecordingHost,
    SyntheticKeyEvent,
};
use crate::core::types::{Action, KeyEvent, Modifiers};

fn ctrl(code: &str) -> KeyEvent {
    KeyEvent::new(code, Modifiers { ctrl: true, ..Modifiers::NONE })
}

fn settings_with_next(shortcuts: &[&str]) -> Settings {
    Settings {
        next_keys: shortcuts.iter().map(|s| s.to_string()).collect(),
        ..Settings::default()
    }
}

fn active_document() -> ClassDocument {
    ClassDocument::with_classes(["modal-container"])
}

#[test]
fn test_remaps_in_active_context() {
    let settings = settings_with_next(&["Ctrl+KeyN"]);
    let mut host = RecordingHost::default();

    let outcome = handle_key_event(&settings, &active_document(), &mut host, &ctrl("KeyN"));

    assert_eq!(outcome, DispatchOutcome::Remapped(Action::Next));
    assert_eq!(host.suppressed, 1);
    assert_eq!(
        host.dispatched,
        vec![(
            DispatchTarget::ActiveElement,
            SyntheticKeyEvent { key: "ArrowDown", code: "ArrowDown" }
        )]
    );
}

#[test]
fn test_inactive_context_passes_through() {
    let settings = settings_with_next(&["Ctrl+KeyN"]);
    let mut host = RecordingHost::default();

    let outcome = handle_key_event(&settings, &ClassDocument::new(), &mut host, &ctrl("KeyN"));

    assert_eq!(outcome, DispatchOutcome::Passed);
    assert_eq!(host.suppressed, 0);
    assert!(host.dispatched.is_empty());
}

#[test]
fn test_unmatched_key_passes_through() {
    let settings = Settings::default();
    let mut host = RecordingHost::default();

    let outcome = handle_key_event(&settings, &active_document(), &mut host, &ctrl("KeyX"));

    assert_eq!(outcome, DispatchOutcome::Passed);
    assert_eq!(host.suppressed, 0);
    assert!(host.dispatched.is_empty());
}

#[test]
fn test_falls_back_to_body_without_focus() {
    let settings = Settings::default();
    let mut host = RecordingHost { focused: false, ..RecordingHost::default() };

    handle_key_event(&settings, &active_document(), &mut host, &ctrl("KeyP"));

    assert_eq!(host.dispatched.len(), 1);
    assert_eq!(host.dispatched[0].0, DispatchTarget::Body);
    assert_eq!(host.dispatched[0].1.key, "ArrowUp");
}

#[test]
fn test_each_action_semantic_key() {
    let settings = Settings {
        next_keys: vec!["Alt+KeyJ".to_string()],
        previous_keys: vec!["Alt+KeyK".to_string()],
        confirm_keys: vec!["Alt+KeyL".to_string()],
        close_keys: vec!["Alt+KeyH".to_string()],
        ..Settings::default()
    };
    let alt = |code: &str| KeyEvent::new(code, Modifiers { alt: true, ..Modifiers::NONE });

    for (code, expected) in [
        ("KeyJ", "ArrowDown"),
        ("KeyK", "ArrowUp"),
        ("KeyL", "Enter"),
        ("KeyH", "Escape"),
    ] {
        let mut host = RecordingHost::default();
        handle_key_event(&settings, &active_document(), &mut host, &alt(code));
        assert_eq!(host.dispatched.len(), 1, "{}", code);
        assert_eq!(host.dispatched[0].1.key, expected);
        assert_eq!(host.dispatched[0].1.code, expected);
    }
}

#[test]
fn test_priority_first_action_wins() {
    let settings = Settings {
        next_keys: vec!["Ctrl+KeyJ".to_string()],
        close_keys: vec!["Ctrl+KeyJ".to_string()],
        ..Settings::default()
    };
    let mut host = RecordingHost::default();

    let outcome = handle_key_event(&settings, &active_document(), &mut host, &ctrl("KeyJ"));

    assert_eq!(outcome, DispatchOutcome::Remapped(Action::Next));
    assert_eq!(host.suppressed, 1);
    assert_eq!(host.dispatched.len(), 1);
}

#[test]
fn test_any_entry_in_list_matches() {
    let settings = settings_with_next(&["", "Ctrl+KeyN", "Ctrl+KeyJ"]);

    assert_eq!(resolve_action(&settings, &ctrl("KeyN")), Some(Action::Next));
    assert_eq!(resolve_action(&settings, &ctrl("KeyJ")), Some(Action::Next));
}

#[test]
fn test_invalid_entries_skipped() {
    let settings = settings_with_next(&["Ctrl+Alt", "   ", "Ctrl+KeyN"]);
    assert_eq!(resolve_action(&settings, &ctrl("KeyN")), Some(Action::Next));
}

#[test]
fn test_extra_modifier_not_remapped() {
    let settings = Settings::default();
    let event = KeyEvent::new("KeyN", Modifiers { ctrl: true, shift: true, ..Modifiers::NONE });
    assert_eq!(resolve_action(&settings, &event), None);
}

#[test]
fn test_default_close_key() {
    let settings = Settings::default();
    let escape = KeyEvent::new("Escape", Modifiers::NONE);
    assert_eq!(resolve_action(&settings, &escape), Some(Action::Close));
}

#[test]
fn test_broken_selector_does_not_block_others() {
    let settings = Settings {
        target_classes: ".broken..selector\n.modal-container".to_string(),
        ..settings_with_next(&["Ctrl+KeyN"])
    };
    let mut host = RecordingHost::default();

    let outcome = handle_key_event(&settings, &active_document(), &mut host, &ctrl("KeyN"));
    assert_eq!(outcome, DispatchOutcome::Remapped(Action::Next));
}
