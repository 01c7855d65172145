//! Prediction submission tests: busy discipline, display replacement,
//! and error notices.

use std::time::Instant;

use super::helpers::{create_test_app, sample_prediction_response, sign_in};
use crate::api::error::ApiError;
use crate::app::state::{AppEvent, NOTICE_TTL, Notice, PREDICT_FALLBACK_ERROR};

#[test]
fn begin_prediction_acquires_busy_and_builds_request() {
    let mut app = create_test_app();

    let request = app.begin_prediction().expect("first submission");
    assert!(app.predict.busy);
    assert_eq!(request.age, 30);
    assert_eq!(request.smoker, "No");
    assert!(request.user_email.is_none());
}

#[test]
fn second_submission_is_blocked_while_pending() {
    let mut app = create_test_app();

    assert!(app.begin_prediction().is_some());
    // The submit control is disabled for the duration of the first call.
    assert!(app.begin_prediction().is_none());
}

#[test]
fn request_carries_email_only_with_session() {
    let mut app = create_test_app();
    sign_in(&mut app, "user@example.com", "Asha");

    let request = app.begin_prediction().expect("submission");
    assert_eq!(request.user_email.as_deref(), Some("user@example.com"));
}

#[test]
fn success_event_releases_busy_and_replaces_display() {
    let mut app = create_test_app();
    app.begin_prediction();

    app.event_sender()
        .try_send(AppEvent::Prediction(Ok(sample_prediction_response())))
        .unwrap();
    app.process_events();

    assert!(!app.predict.busy, "busy must be released on settle");
    let display = app.predict.display.as_ref().expect("display set");
    assert_eq!(display.primary, "\u{20b9}52,340");
    assert_eq!(display.model_rows.len(), 2);
    assert_eq!(display.model_rows[0].0, "ModelA");
    assert_eq!(display.model_rows[1].0, "ModelB");

    // The form stays usable: a new submission can start immediately.
    assert!(app.begin_prediction().is_some());
}

#[test]
fn application_error_shows_server_message() {
    let mut app = create_test_app();
    app.begin_prediction();

    app.event_sender()
        .try_send(AppEvent::Prediction(Err(ApiError::Api(
            "model not loaded".to_string(),
        ))))
        .unwrap();
    app.process_events();

    assert!(!app.predict.busy);
    let notice = app.predict.notice.as_ref().expect("notice raised");
    assert_eq!(notice.message, "model not loaded");
    // A failed call never leaves a stale result behind it.
    assert!(app.predict.display.is_none());
}

#[test]
fn application_error_without_message_uses_fallback() {
    let mut app = create_test_app();
    app.begin_prediction();

    app.event_sender()
        .try_send(AppEvent::Prediction(Err(ApiError::Api(String::new()))))
        .unwrap();
    app.process_events();

    let notice = app.predict.notice.as_ref().expect("notice raised");
    assert_eq!(notice.message, PREDICT_FALLBACK_ERROR);
}

#[test]
fn new_submission_clears_previous_notice() {
    let mut app = create_test_app();
    app.predict.notice = Some(Notice::new("old failure"));

    app.begin_prediction();
    assert!(app.predict.notice.is_none());
}

#[test]
fn notice_self_dismisses_after_ttl() {
    let mut app = create_test_app();
    app.predict.notice = Some(Notice {
        message: "boom".to_string(),
        raised_at: Instant::now() - NOTICE_TTL,
    });

    app.tick();
    assert!(app.predict.notice.is_none());
}

#[test]
fn fresh_notice_survives_tick() {
    let mut app = create_test_app();
    app.predict.notice = Some(Notice::new("boom"));

    app.tick();
    assert!(app.predict.notice.is_some());
}

#[test]
fn success_replaces_previous_result_wholesale() {
    let mut app = create_test_app();

    app.begin_prediction();
    app.event_sender()
        .try_send(AppEvent::Prediction(Ok(sample_prediction_response())))
        .unwrap();
    app.process_events();

    let second: crate::api::types::PredictionResponse = serde_json::from_value(serde_json::json!({
        "success": true,
        "prediction_inr": 10000.0,
        "individual_predictions": {"OnlyModel": 10000.0}
    }))
    .unwrap();

    app.begin_prediction();
    app.event_sender()
        .try_send(AppEvent::Prediction(Ok(second)))
        .unwrap();
    app.process_events();

    let display = app.predict.display.as_ref().expect("display set");
    assert_eq!(display.primary, "\u{20b9}10,000");
    assert_eq!(display.model_rows.len(), 1, "old rows must not survive");
}
