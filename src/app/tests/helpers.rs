//! Shared test utilities for the app module.
//!
//! Provides a stub backend, `App` constructors wired to safe temp paths,
//! key event helpers, and a `TestBackend` renderer for buffer assertions.

use std::sync::Arc;

use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use serde_json::{Value, json};

use crate::api::client::BackendApi;
use crate::api::error::ApiError;
use crate::api::types::{ChatKind, PredictionRequest, PredictionResponse, VisualizationData};
use crate::app::App;
use crate::fs::{AppPaths, UserSession};

/// Backend stub for tests that never reach the network. Calls succeed
/// when a canned value is configured and report an application error
/// otherwise.
#[derive(Default)]
pub struct StubBackend {
    pub prediction: Option<PredictionResponse>,
    pub chat_reply: Option<String>,
}

#[async_trait]
impl BackendApi for StubBackend {
    async fn predict(&self, _request: &PredictionRequest) -> Result<PredictionResponse, ApiError> {
        self.prediction
            .clone()
            .ok_or_else(|| ApiError::Api("stub backend".to_string()))
    }

    async fn chat(&self, _message: &str, _kind: ChatKind) -> Result<String, ApiError> {
        self.chat_reply
            .clone()
            .ok_or_else(|| ApiError::Api("stub backend".to_string()))
    }

    async fn statistics(&self) -> Result<Value, ApiError> {
        Err(ApiError::Api("stub backend".to_string()))
    }

    async fn visualizations(&self) -> Result<VisualizationData, ApiError> {
        Err(ApiError::Api("stub backend".to_string()))
    }
}

/// Creates a minimal `App` for testing, rooted in the system temp dir.
///
/// For tests that read or write real files, use
/// [`create_test_app_with_paths`] with an isolated temp directory.
pub fn create_test_app() -> App {
    create_test_app_with_paths(AppPaths::new(std::env::temp_dir().as_path()))
}

/// Creates a minimal `App` with custom paths.
pub fn create_test_app_with_paths(paths: AppPaths) -> App {
    let mut app = App::new_with_paths(Arc::new(StubBackend::default()), paths)
        .expect("test app constructs");
    // A fixed layout so scroll math has real dimensions without a frame.
    app.update_layout(ratatui::layout::Rect::new(0, 0, 100, 30));
    app
}

/// Installs a signed-in session directly on the app.
pub fn sign_in(app: &mut App, email: &str, name: &str) {
    app.session = Some(UserSession {
        token: "tok-test".to_string(),
        email: email.to_string(),
        name: name.to_string(),
    });
}

/// A successful prediction response with two ordered model estimates.
pub fn sample_prediction_response() -> PredictionResponse {
    serde_json::from_value(json!({
        "success": true,
        "prediction_inr": 52340.0,
        "individual_predictions": {"ModelA": 51000.0, "ModelB": 53000.0}
    }))
    .expect("sample response parses")
}

/// Creates a [`KeyEvent`] for a character key with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Creates a [`KeyEvent`] for a Ctrl+character chord.
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Creates a [`KeyEvent`] for a non-character key with no modifiers.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Renders the app to a `TestBackend` terminal for buffer assertions.
///
/// Mimics the main loop by calling `update_layout()` inside the draw
/// closure.
pub fn render_app_to_terminal(
    app: &mut App,
    width: u16,
    height: u16,
) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("terminal constructs");

    terminal
        .draw(|frame| {
            app.update_layout(frame.area());
            app.render(frame);
        })
        .expect("render succeeds");

    terminal
}

/// Flattens the rendered buffer into one string for `contains` checks.
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let area = *buffer.area();
    let mut text = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
