//! Main application state and logic.
//!
//! This module contains the core `App` struct and its implementation,
//! organized into submodules:
//! - `events` - Key handling and backend event processing
//! - `layout` - Panel layout calculation
//! - `render` - UI rendering
//! - `state` - Application state structures
//!
//! ## Panels and modes
//!
//! Two binary switches control what is visible:
//!
//! - **Main mode** (Ctrl+E / Ctrl+A): the prediction form or the chat
//!   assistant. Switching is a pure visibility toggle - no network call,
//!   and neither the form values nor the transcript are cleared.
//! - **Chat input style** (Ctrl+T / Ctrl+O): free text or the fixed
//!   option buttons.
//!
//! The charts overlay (Ctrl+G) and the error toast float above whichever
//! panel is active.

pub mod events;
pub mod layout;
mod render;
pub mod state;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::api::client::{BackendApi, run_chat, run_prediction, run_statistics, run_visualizations};
use crate::api::types::{ChatKind, PredictionRequest};
use crate::fs::{AppPaths, UserSession};
use crate::tui::Theme;

pub use self::layout::{ChatLayout, PredictLayout, calculate_chat_layout, calculate_predict_layout};
pub use self::state::{
    AppEvent, ChartsState, ChatInputMode, ChatOption, ChatState, ExplanationDisplay, FactorRow,
    LayoutState, MainMode, Notice, PredictState, PredictionDisplay, ScrollState,
};

/// Channel buffer size for backend events.
const EVENT_CHANNEL_SIZE: usize = 64;

/// Main application state.
///
/// Owned by the UI thread; background tasks communicate only through the
/// event channel. Organized into per-panel sub-structs:
/// - `predict`: form, busy flag, latest result
/// - `chat`: transcript, composer, option selection
/// - `charts`: overlay visibility and datasets
/// - `layout`: dimensions recalculated each frame
pub struct App {
    // =========================================================================
    // Shared State
    // =========================================================================
    /// All mediquote-related filesystem paths.
    pub(crate) paths: AppPaths,
    /// Theme for styling.
    pub(crate) theme: Theme,
    /// Active top-level panel.
    pub(crate) mode: MainMode,
    /// Should quit flag.
    should_quit: bool,
    /// The authenticated user, if a persisted session was found at
    /// startup. Never mutated in place; cleared wholesale on logout.
    pub(crate) session: Option<UserSession>,
    /// Backend the API tasks talk to.
    backend: Arc<dyn BackendApi>,

    // =========================================================================
    // Event Channel
    // =========================================================================
    /// Event receiver for backend task completions.
    pub(crate) event_rx: mpsc::Receiver<AppEvent>,
    /// Event sender (cloned into spawned tasks).
    event_tx: mpsc::Sender<AppEvent>,

    // =========================================================================
    // Component States
    // =========================================================================
    /// Prediction panel state.
    pub(crate) predict: PredictState,
    /// Chat panel state.
    pub(crate) chat: ChatState,
    /// Charts overlay state.
    pub(crate) charts: ChartsState,
    /// Dynamic layout dimensions.
    pub(crate) layout: LayoutState,
    /// Animation/housekeeping tick counter.
    pub(crate) tick_count: u64,
}

impl App {
    /// Creates a new application instance.
    ///
    /// Reads the persisted session once; a missing session file simply
    /// means no user is signed in, while an unreadable one is logged and
    /// treated the same way.
    ///
    /// # Errors
    ///
    /// Currently infallible in practice; kept fallible for parity with
    /// startup call sites that may add failing steps.
    pub fn new_with_paths(backend: Arc<dyn BackendApi>, paths: AppPaths) -> Result<Self> {
        let session = match paths.load_session() {
            Ok(persisted) => persisted.and_then(crate::fs::PersistedSession::into_session),
            Err(e) => {
                tracing::warn!("failed to load session: {e}");
                None
            }
        };

        if let Some(user) = &session {
            tracing::info!("session restored for {}", user.email);
        }

        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);

        Ok(Self {
            paths,
            theme: Theme::default(),
            mode: MainMode::default(),
            should_quit: false,
            session,
            backend,
            event_rx,
            event_tx,
            predict: PredictState::default(),
            chat: ChatState::default(),
            charts: ChartsState::default(),
            layout: LayoutState::default(),
            tick_count: 0,
        })
    }

    /// Spawns the fire-and-forget startup fetches: aggregate statistics
    /// (logged only) and the chart datasets.
    ///
    /// Separate from the constructor so tests can build an `App` without
    /// a tokio runtime.
    pub fn start_background_loads(&self) {
        tokio::spawn(run_statistics(
            Arc::clone(&self.backend),
            self.event_tx.clone(),
        ));
        tokio::spawn(run_visualizations(
            Arc::clone(&self.backend),
            self.event_tx.clone(),
        ));
    }

    /// Returns true if the application should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Requests application shutdown.
    pub(crate) fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Gets the event sender for spawning backend tasks.
    #[must_use]
    pub fn event_sender(&self) -> mpsc::Sender<AppEvent> {
        self.event_tx.clone()
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub fn session(&self) -> Option<&UserSession> {
        self.session.as_ref()
    }

    // =========================================================================
    // Prediction submission
    // =========================================================================

    /// Acquires the prediction busy state and builds the request.
    ///
    /// Returns `None` when a submission is already in flight - the submit
    /// control is disabled for the duration of the first call rather than
    /// cancelling it. The busy flag set here is released exactly once,
    /// when the completion event is drained in `process_events`.
    pub(crate) fn begin_prediction(&mut self) -> Option<PredictionRequest> {
        if self.predict.busy {
            return None;
        }

        let user_email = self.session.as_ref().map(|user| user.email.clone());
        let request = self.predict.form.build_request(user_email);

        self.predict.busy = true;
        self.predict.notice = None;
        Some(request)
    }

    /// Submits the prediction form to the backend.
    pub(crate) fn submit_prediction(&mut self) {
        let Some(request) = self.begin_prediction() else {
            return;
        };

        tracing::info!("submitting prediction request");
        tokio::spawn(run_prediction(
            Arc::clone(&self.backend),
            request,
            self.event_tx.clone(),
        ));
    }

    // =========================================================================
    // Chat turns
    // =========================================================================

    /// Acquires the chat busy state for a free-text turn.
    ///
    /// Empty (post-trim) input is a silent no-op: no transcript entry, no
    /// network call. On success the user's turn is already appended
    /// (optimistically, status pending) and the trimmed message is
    /// returned for the network task.
    pub(crate) fn begin_chat_text(&mut self) -> Option<String> {
        if self.chat.busy {
            return None;
        }

        let message = self.chat.input.trim().to_string();
        if message.is_empty() {
            return None;
        }

        self.chat.input.clear();
        self.chat.transcript.push_user_pending(&message);
        self.chat.busy = true;
        self.scroll_transcript_to_bottom();
        Some(message)
    }

    /// Sends the composer content as a free-text chat turn.
    pub(crate) fn send_chat_text(&mut self) {
        let Some(message) = self.begin_chat_text() else {
            return;
        };

        tokio::spawn(run_chat(
            Arc::clone(&self.backend),
            message,
            ChatKind::Text,
            self.event_tx.clone(),
        ));
    }

    /// Acquires the chat busy state for the selected fixed option.
    ///
    /// The option's display label is appended as the user's turn; its
    /// wire value is returned for the network task.
    pub(crate) fn begin_chat_option(&mut self) -> Option<&'static str> {
        if self.chat.busy {
            return None;
        }

        let option = ChatOption::all().get(self.chat.selected_option).copied()?;

        self.chat.transcript.push_user_pending(option.label());
        self.chat.busy = true;
        self.scroll_transcript_to_bottom();
        Some(option.value())
    }

    /// Sends the selected fixed option as a chat turn.
    pub(crate) fn send_chat_option(&mut self) {
        let Some(value) = self.begin_chat_option() else {
            return;
        };

        tokio::spawn(run_chat(
            Arc::clone(&self.backend),
            value.to_string(),
            ChatKind::Option,
            self.event_tx.clone(),
        ));
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Logs the user out: removes the persisted session wholesale and
    /// clears the in-memory session. The header greeting disappears and
    /// subsequent prediction requests carry no `user_email`.
    pub(crate) fn logout(&mut self) {
        if self.session.is_none() {
            return;
        }

        if let Err(e) = self.paths.clear_session() {
            tracing::warn!("failed to clear session file: {e}");
        }
        self.session = None;
        tracing::info!("logged out");
    }

    // =========================================================================
    // Per-frame housekeeping
    // =========================================================================

    /// Advances the animation counter and expires stale notices.
    ///
    /// Called on every loop iteration; the error toast self-dismisses
    /// here once it has outlived its TTL.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);

        if self
            .predict
            .notice
            .as_ref()
            .is_some_and(state::Notice::is_expired)
        {
            self.predict.notice = None;
        }
    }

    /// Calculates and caches the layouts for the current terminal size.
    ///
    /// Should be called once per frame before rendering.
    pub fn update_layout(&mut self, terminal_area: Rect) {
        self.layout.predict = calculate_predict_layout(terminal_area);
        self.layout.chat = calculate_chat_layout(
            terminal_area,
            self.chat.input_mode == ChatInputMode::Options,
        );
    }

    // =========================================================================
    // Scroll helpers
    // =========================================================================

    /// Total transcript height in visual lines at the current width.
    pub(crate) fn transcript_line_count(&self) -> usize {
        crate::tui::widgets::transcript_visual_line_count(
            self.chat.transcript.turns(),
            self.layout.chat.transcript_content_width,
            self.chat.busy,
        )
    }

    /// Total result height in lines at the current width.
    pub(crate) fn result_line_count(&self) -> usize {
        self.predict.display.as_ref().map_or(0, |display| {
            crate::tui::widgets::result_line_count(
                display,
                &self.theme,
                self.layout.predict.result_content_width,
            )
        })
    }

    /// Jumps the transcript to its latest turn.
    pub(crate) fn scroll_transcript_to_bottom(&mut self) {
        let content_len = self.transcript_line_count();
        self.chat
            .scroll
            .scroll_to_bottom(content_len, self.layout.chat.transcript_visible_height);
    }

    /// Follows new transcript content if the user has not scrolled away.
    pub(crate) fn auto_scroll_transcript(&mut self) {
        let content_len = self.transcript_line_count();
        self.chat
            .scroll
            .auto_scroll_if_enabled(content_len, self.layout.chat.transcript_visible_height);
    }
}
