//! Mode controller tests: radio semantics and state preservation.

use ratatui::crossterm::event::KeyCode;

use super::helpers::{char_key, create_test_app, ctrl_key, key};
use crate::app::state::{ChatInputMode, MainMode};

#[test]
fn starts_in_prediction_mode_with_text_chat_input() {
    let app = create_test_app();
    assert_eq!(app.mode, MainMode::Prediction);
    assert_eq!(app.chat.input_mode, ChatInputMode::Text);
}

#[test]
fn ctrl_a_and_ctrl_e_select_their_panels() {
    let mut app = create_test_app();

    app.handle_key(ctrl_key('a'));
    assert_eq!(app.mode, MainMode::Chat);

    // Selecting the already-active panel is a no-op, not a toggle.
    app.handle_key(ctrl_key('a'));
    assert_eq!(app.mode, MainMode::Chat);

    app.handle_key(ctrl_key('e'));
    assert_eq!(app.mode, MainMode::Prediction);
}

#[test]
fn chat_input_style_switch_is_radio_not_toggle() {
    let mut app = create_test_app();
    app.handle_key(ctrl_key('a'));

    app.handle_key(ctrl_key('o'));
    assert_eq!(app.chat.input_mode, ChatInputMode::Options);
    app.handle_key(ctrl_key('o'));
    assert_eq!(app.chat.input_mode, ChatInputMode::Options);

    app.handle_key(ctrl_key('t'));
    assert_eq!(app.chat.input_mode, ChatInputMode::Text);
}

#[test]
fn switching_panels_preserves_form_and_transcript() {
    let mut app = create_test_app();

    // Edit the age field.
    app.handle_key(key(KeyCode::Backspace));
    app.handle_key(key(KeyCode::Backspace));
    app.handle_key(char_key('4'));
    app.handle_key(char_key('5'));

    // Type into the chat composer without sending.
    app.handle_key(ctrl_key('a'));
    app.handle_key(char_key('h'));
    app.handle_key(char_key('i'));

    // Bounce between panels.
    app.handle_key(ctrl_key('e'));
    app.handle_key(ctrl_key('a'));
    app.handle_key(ctrl_key('e'));

    assert_eq!(
        app.predict.form.display_value(crate::core::form::FormField::Age),
        "45"
    );
    assert_eq!(app.chat.input, "hi");
    assert!(app.chat.transcript.is_empty());
}

#[test]
fn mode_switch_performs_no_network_call() {
    let mut app = create_test_app();
    app.handle_key(ctrl_key('a'));
    app.handle_key(ctrl_key('e'));

    assert!(!app.predict.busy);
    assert!(!app.chat.busy);
    // No task was spawned, so no completion event can be pending.
    assert!(app.event_rx.try_recv().is_err());
}

#[test]
fn charts_overlay_opens_and_closes() {
    let mut app = create_test_app();

    app.handle_key(ctrl_key('g'));
    assert!(app.charts.visible);

    // Panel keys are swallowed while the overlay is open.
    app.handle_key(char_key('9'));
    assert_eq!(
        app.predict.form.display_value(crate::core::form::FormField::Age),
        "30"
    );

    app.handle_key(key(KeyCode::Esc));
    assert!(!app.charts.visible);

    app.handle_key(ctrl_key('g'));
    app.handle_key(ctrl_key('g'));
    assert!(!app.charts.visible);
}

#[test]
fn ctrl_c_quits() {
    let mut app = create_test_app();
    assert!(!app.should_quit());
    app.handle_key(ctrl_key('c'));
    assert!(app.should_quit());
}

#[test]
fn logout_clears_session_and_file() {
    let temp = tempfile::TempDir::new().unwrap();
    let paths = crate::fs::AppPaths::new(temp.path());
    paths
        .save_session(&crate::fs::PersistedSession {
            token: "tok".to_string(),
            user: crate::fs::UserProfile {
                email: "user@example.com".to_string(),
                name: "Asha".to_string(),
            },
        })
        .unwrap();

    let mut app = super::helpers::create_test_app_with_paths(paths.clone());
    assert!(app.session().is_some());

    app.handle_key(ctrl_key('l'));
    assert!(app.session().is_none());
    assert!(paths.load_session().unwrap().is_none());

    // Logging out twice is harmless.
    app.handle_key(ctrl_key('l'));
    assert!(app.session().is_none());
}
