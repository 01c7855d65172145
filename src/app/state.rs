//! Application state structures.
//!
//! This module contains the state definitions for the panels of the
//! application:
//!
//! - **`MainMode` / `ChatInputMode`**: the two binary UI switches
//! - **`PredictState`**: form, busy flag, latest displayed result
//! - **`ChatState`**: transcript, composer, option selection
//! - **`ChartsState`**: overlay visibility and loaded datasets
//! - **`AppEvent`**: completions sent back from background API tasks
//!
//! All mode transitions are plain state changes; rendering happens in a
//! separate pass that projects this state into widgets.

use std::time::{Duration, Instant};

use serde_json::Value;

use crate::api::error::ApiError;
use crate::api::types::{ChatKind, PredictionResponse, VisualizationData};
use crate::core::charts::{ChartSet, ChartSource};
use crate::core::form::PredictionForm;
use crate::core::format::{format_inr, impact_style_key};
use crate::core::transcript::Transcript;

/// Top-level panel switch. Radio semantics: one of two, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainMode {
    /// The prediction form and result panel.
    #[default]
    Prediction,
    /// The chat assistant.
    Chat,
}

impl MainMode {
    /// Returns the display name for this mode.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Prediction => "Predict",
            Self::Chat => "Chat",
        }
    }
}

/// Input style inside the chat panel. Also radio semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatInputMode {
    /// Free-text composer.
    #[default]
    Text,
    /// Fixed option buttons.
    Options,
}

impl ChatInputMode {
    /// Returns the display name for this mode.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Options => "Options",
        }
    }
}

/// The fixed chat options. Wire value and display label are both static;
/// the label is what lands in the transcript as the user's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatOption {
    QuickEstimate,
    HealthTips,
    InsuranceInfo,
    CostFactors,
}

impl ChatOption {
    /// Returns all options in display order.
    #[must_use]
    pub fn all() -> &'static [ChatOption] {
        &[
            Self::QuickEstimate,
            Self::HealthTips,
            Self::InsuranceInfo,
            Self::CostFactors,
        ]
    }

    /// Returns the wire value sent as the message body.
    #[must_use]
    pub const fn value(&self) -> &'static str {
        match self {
            Self::QuickEstimate => "quick_estimate",
            Self::HealthTips => "health_tips",
            Self::InsuranceInfo => "insurance_info",
            Self::CostFactors => "cost_factors",
        }
    }

    /// Returns the display label shown on the button and appended to the
    /// transcript.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::QuickEstimate => "Get a Quick Estimate",
            Self::HealthTips => "Health Tips",
            Self::InsuranceInfo => "Insurance Info",
            Self::CostFactors => "Cost Factors",
        }
    }
}

/// Events sent from background API tasks to the UI.
///
/// Every spawned task produces exactly one event; the busy flags set
/// before spawning are released when these are drained.
#[derive(Debug)]
pub enum AppEvent {
    /// `POST /predict` settled.
    Prediction(Result<PredictionResponse, ApiError>),
    /// `POST /chat` settled.
    ChatReply {
        kind: ChatKind,
        result: Result<String, ApiError>,
    },
    /// `GET /visualizations` settled.
    Visualizations(Result<VisualizationData, ApiError>),
    /// `GET /statistics` settled (logged only).
    Statistics(Result<Value, ApiError>),
}

/// How long an error notice stays on screen before self-dismissing.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Transient error notice shown as a floating toast.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub raised_at: Instant,
}

impl Notice {
    /// Creates a notice timestamped now.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            raised_at: Instant::now(),
        }
    }

    /// Returns true once the notice has outlived [`NOTICE_TTL`].
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.raised_at.elapsed() >= NOTICE_TTL
    }
}

/// Scroll state for a panel, combining position and auto-scroll behavior.
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    /// Current scroll offset in visual lines from the top.
    pub offset: usize,
    /// Whether to jump to the bottom when new content is added. Disabled
    /// by a manual scroll up, re-enabled on reaching the bottom.
    pub auto_scroll: bool,
}

impl ScrollState {
    /// Creates a new scroll state with auto-scroll enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            offset: 0,
            auto_scroll: true,
        }
    }

    /// Resets to the top with auto-scroll enabled.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.auto_scroll = true;
    }

    /// Scrolls up by one line, disabling auto-scroll.
    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
        self.auto_scroll = false;
    }

    /// Scrolls down by one line, enabling auto-scroll at the bottom.
    pub fn scroll_down(&mut self, content_len: usize, visible_height: usize) {
        let max_scroll = content_len.saturating_sub(visible_height);
        self.offset = (self.offset + 1).min(max_scroll);
        self.auto_scroll = self.offset >= max_scroll;
    }

    /// Scrolls up by a page, disabling auto-scroll.
    pub fn page_up(&mut self, page_size: usize) {
        self.offset = self.offset.saturating_sub(page_size);
        self.auto_scroll = false;
    }

    /// Scrolls down by a page, enabling auto-scroll at the bottom.
    pub fn page_down(&mut self, content_len: usize, visible_height: usize, page_size: usize) {
        let max_scroll = content_len.saturating_sub(visible_height);
        self.offset = (self.offset + page_size).min(max_scroll);
        self.auto_scroll = self.offset >= max_scroll;
    }

    /// Jumps to the bottom, enabling auto-scroll.
    pub fn scroll_to_bottom(&mut self, content_len: usize, visible_height: usize) {
        self.offset = content_len.saturating_sub(visible_height);
        self.auto_scroll = true;
    }

    /// Follows new content when auto-scroll is enabled.
    pub fn auto_scroll_if_enabled(&mut self, content_len: usize, visible_height: usize) {
        if self.auto_scroll {
            self.offset = content_len.saturating_sub(visible_height);
        }
    }
}

/// State of the prediction panel.
#[derive(Debug)]
pub struct PredictState {
    /// The form fields and selection cursor.
    pub form: PredictionForm,
    /// The latest displayed result; replaced wholesale per response.
    pub display: Option<PredictionDisplay>,
    /// Busy flag: set before the request task spawns, cleared exactly
    /// once when its completion event is drained.
    pub busy: bool,
    /// Error toast, if one is showing.
    pub notice: Option<Notice>,
    /// Result panel scroll.
    pub scroll: ScrollState,
}

impl Default for PredictState {
    fn default() -> Self {
        Self {
            form: PredictionForm::new(),
            display: None,
            busy: false,
            notice: None,
            scroll: ScrollState::new(),
        }
    }
}

/// State of the chat panel.
#[derive(Debug)]
pub struct ChatState {
    /// The append-only transcript.
    pub transcript: Transcript,
    /// Free-text composer buffer.
    pub input: String,
    /// Which input style is active.
    pub input_mode: ChatInputMode,
    /// Selected option index (options style).
    pub selected_option: usize,
    /// Busy flag with the same discipline as the prediction panel.
    pub busy: bool,
    /// Transcript scroll.
    pub scroll: ScrollState,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            transcript: Transcript::default(),
            input: String::new(),
            input_mode: ChatInputMode::default(),
            selected_option: 0,
            busy: false,
            scroll: ScrollState::new(),
        }
    }
}

/// State of the charts overlay.
#[derive(Debug, Default)]
pub struct ChartsState {
    /// Whether the overlay is open (Ctrl+G).
    pub visible: bool,
    /// Loaded datasets and which branch supplied them; `None` until the
    /// startup fetch settles.
    pub charts: Option<(ChartSet, ChartSource)>,
}

/// Dynamic layout tracking state.
///
/// Holds the panel layouts calculated once per frame, giving scroll
/// calculations and rendering a single source of truth for dimensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutState {
    /// Prediction panel layout.
    pub predict: crate::app::layout::PredictLayout,
    /// Chat panel layout.
    pub chat: crate::app::layout::ChatLayout,
}

// =============================================================================
// Prediction view model
// =============================================================================

/// Display-ready projection of a successful prediction response.
///
/// Everything is pre-formatted here so rendering is a dumb projection;
/// the decision logic stays unit-testable without a terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionDisplay {
    /// Primary estimate, e.g. `₹52,340`.
    pub primary: String,
    /// `(model name, formatted estimate)` rows in response order.
    pub model_rows: Vec<(String, String)>,
    /// Cost explanation, when the backend sent one.
    pub explanation: Option<ExplanationDisplay>,
}

/// Display-ready cost explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplanationDisplay {
    pub summary: String,
    pub factors: Vec<FactorRow>,
    pub total: String,
    pub covered: String,
    pub out_of_pocket: String,
}

/// One row of the factors table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorRow {
    pub name: String,
    /// Raw impact category, shown as the badge text.
    pub impact: String,
    /// Normalized style key derived from the category.
    pub impact_key: String,
    /// Pre-formatted contribution amount.
    pub amount: String,
}

impl PredictionDisplay {
    /// Projects a successful response into display strings. Model rows
    /// keep the response's own ordering.
    #[must_use]
    pub fn from_response(response: &PredictionResponse) -> Self {
        let model_rows = response
            .model_estimates()
            .into_iter()
            .map(|(name, value)| (name, format_inr(value)))
            .collect();

        let explanation = response.cost_explanation.as_ref().map(|explanation| {
            let factors = explanation
                .detailed_factors
                .iter()
                .map(|(name, impact, amount)| FactorRow {
                    name: name.clone(),
                    impact: impact.clone(),
                    impact_key: impact_style_key(impact),
                    amount: amount.clone(),
                })
                .collect();

            ExplanationDisplay {
                summary: explanation.summary.clone(),
                factors,
                total: explanation.total_cost_inr.clone(),
                covered: explanation.insurance_coverage.covered_amount.clone(),
                out_of_pocket: explanation.insurance_coverage.out_of_pocket.clone(),
            }
        });

        Self {
            primary: format_inr(response.prediction_inr),
            model_rows,
            explanation,
        }
    }
}

// =============================================================================
// User-facing failure messages
// =============================================================================

/// Toast shown when the prediction backend cannot be reached.
pub const PREDICT_CONNECTION_ERROR: &str = "Can't reach the server right now. Is it running?";

/// Fallback when the backend reports a prediction failure without a
/// message.
pub const PREDICT_FALLBACK_ERROR: &str = "Hmm, prediction didn't work. Let's try again!";

/// Synthetic assistant turn for a free-text transport failure.
pub const CHAT_TEXT_CONNECTION_ERROR: &str =
    "I'm having trouble connecting right now. Can you check if the backend server is running?";

/// Synthetic assistant turn for a fixed-option transport failure.
pub const CHAT_OPTION_CONNECTION_ERROR: &str =
    "Having connection issues. Is the server up and running?";

/// Composes the toast message for a failed prediction submission.
#[must_use]
pub fn prediction_error_notice(error: &ApiError) -> String {
    match error {
        ApiError::Transport(_) => PREDICT_CONNECTION_ERROR.to_string(),
        ApiError::Api(message) if message.is_empty() => PREDICT_FALLBACK_ERROR.to_string(),
        ApiError::Api(message) => message.clone(),
    }
}

/// Composes the synthetic assistant turn for a failed chat call. The
/// transcript gets a conversational apology, never a raw error.
#[must_use]
pub fn chat_error_text(kind: ChatKind, error: &ApiError) -> String {
    match (kind, error) {
        (ChatKind::Text, ApiError::Transport(_)) => CHAT_TEXT_CONNECTION_ERROR.to_string(),
        (ChatKind::Option, ApiError::Transport(_)) => CHAT_OPTION_CONNECTION_ERROR.to_string(),
        (ChatKind::Text, ApiError::Api(message)) => {
            let detail = if message.is_empty() {
                "Could you try that again?"
            } else {
                message
            };
            format!("Hmm, something went wrong. {detail}")
        }
        (ChatKind::Option, ApiError::Api(message)) => {
            let detail = if message.is_empty() {
                "Mind trying again?"
            } else {
                message
            };
            format!("Oops, something didn't work. {detail}")
        }
    }
}
