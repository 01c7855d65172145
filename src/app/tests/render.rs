//! Rendered-buffer assertions via `TestBackend`.

use super::helpers::{
    buffer_text, create_test_app, ctrl_key, render_app_to_terminal, sample_prediction_response,
    sign_in,
};
use crate::app::state::{AppEvent, Notice};
use crate::core::charts::{ChartSet, ChartSource};

#[test]
fn prediction_result_renders_primary_and_model_rows() {
    let mut app = create_test_app();
    app.begin_prediction();
    app.event_sender()
        .try_send(AppEvent::Prediction(Ok(sample_prediction_response())))
        .unwrap();
    app.process_events();

    let terminal = render_app_to_terminal(&mut app, 100, 30);
    let text = buffer_text(&terminal);

    assert!(text.contains("\u{20b9}52,340"), "primary estimate shown");
    assert!(text.contains("ModelA"));
    assert!(text.contains("\u{20b9}51,000"));
    assert!(text.contains("ModelB"));
    assert!(text.contains("\u{20b9}53,000"));
}

#[test]
fn empty_result_panel_shows_hint() {
    let mut app = create_test_app();
    let terminal = render_app_to_terminal(&mut app, 100, 30);
    let text = buffer_text(&terminal);

    assert!(text.contains("Fill in your profile and press Enter"));
    assert!(text.contains("Health Profile"));
}

#[test]
fn busy_result_panel_shows_progress_text() {
    let mut app = create_test_app();
    app.begin_prediction();

    let terminal = render_app_to_terminal(&mut app, 100, 30);
    let text = buffer_text(&terminal);
    assert!(text.contains("Calculating your estimate..."));
}

#[test]
fn header_greets_signed_in_user() {
    let mut app = create_test_app();
    sign_in(&mut app, "user@example.com", "Asha");

    let terminal = render_app_to_terminal(&mut app, 100, 30);
    let text = buffer_text(&terminal);
    assert!(text.contains("Welcome, Asha!"));

    app.session = None;
    let terminal = render_app_to_terminal(&mut app, 100, 30);
    assert!(buffer_text(&terminal).contains("not signed in"));
}

#[test]
fn error_notice_renders_as_toast() {
    let mut app = create_test_app();
    app.predict.notice = Some(Notice::new("Can't reach the server right now. Is it running?"));

    let terminal = render_app_to_terminal(&mut app, 100, 30);
    let text = buffer_text(&terminal);
    assert!(text.contains("Can't reach the server"));
}

#[test]
fn chat_panel_renders_transcript_turns() {
    let mut app = create_test_app();
    app.handle_key(ctrl_key('a'));
    app.chat.transcript.push_user_pending("what drives my costs?");
    app.chat
        .transcript
        .settle_pending(crate::core::transcript::TurnStatus::SettledOk);
    app.chat.transcript.push_ai("Mostly age and lifestyle.");

    let terminal = render_app_to_terminal(&mut app, 100, 30);
    let text = buffer_text(&terminal);
    assert!(text.contains("what drives my costs?"));
    assert!(text.contains("Mostly age and lifestyle."));
    assert!(text.contains("Conversation"));
}

#[test]
fn options_mode_renders_all_four_options() {
    let mut app = create_test_app();
    app.handle_key(ctrl_key('a'));
    app.handle_key(ctrl_key('o'));

    let terminal = render_app_to_terminal(&mut app, 100, 30);
    let text = buffer_text(&terminal);
    assert!(text.contains("Get a Quick Estimate"));
    assert!(text.contains("Health Tips"));
    assert!(text.contains("Insurance Info"));
    assert!(text.contains("Cost Factors"));
}

#[test]
fn charts_overlay_renders_sample_titles() {
    let mut app = create_test_app();
    app.charts.charts = Some((ChartSet::sample(), ChartSource::Sample));
    app.handle_key(ctrl_key('g'));

    let terminal = render_app_to_terminal(&mut app, 100, 40);
    let text = buffer_text(&terminal);
    assert!(text.contains("Aggregate Statistics (sample data)"));
    assert!(text.contains("Cost by Age Group"));
    assert!(text.contains("Cost by Insurance Type"));
    assert!(text.contains("Chronic Conditions"));
    assert!(text.contains("no offline data"), "scatter has no fixture");
}

#[test]
fn charts_overlay_before_load_shows_loading_state() {
    let mut app = create_test_app();
    app.handle_key(ctrl_key('g'));

    let terminal = render_app_to_terminal(&mut app, 100, 40);
    let text = buffer_text(&terminal);
    assert!(text.contains("Loading aggregate statistics..."));
}
