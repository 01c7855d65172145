//! Core domain logic: formatting, form handling, chart selection, and the
//! chat transcript.

pub mod charts;
pub mod form;
pub mod format;
pub mod transcript;

pub use charts::{ChartSet, ChartSource, select_charts};
pub use form::{FieldKind, FieldValue, FormField, PredictionForm};
pub use format::{format_inr, impact_style_key};
pub use transcript::{ChatSender, ChatTurn, Transcript, TurnStatus};
