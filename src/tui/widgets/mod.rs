//! Reusable widgets for the TUI.

pub mod backdrop;
pub mod result;
pub mod transcript;

pub use backdrop::Backdrop;
pub use result::{ResultWidget, result_line_count, result_lines};
pub use transcript::{TranscriptWidget, transcript_visual_line_count};
