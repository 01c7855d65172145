//! Layout calculation helpers for the TUI.
//!
//! A single source of truth for panel dimensions, so scroll calculations
//! and rendering always agree. Layouts are computed once per frame in
//! `App::update_layout` and cached in [`LayoutState`].
//!
//! [`LayoutState`]: crate::app::state::LayoutState

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the form column in the prediction panel.
const FORM_WIDTH: u16 = 42;

/// Input area height in chat text mode (one line plus borders).
const TEXT_INPUT_HEIGHT: u16 = 3;

/// Input area height in chat options mode (four options plus borders).
const OPTIONS_INPUT_HEIGHT: u16 = 6;

/// Layout of the prediction panel: form column on the left, result panel
/// on the right.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredictLayout {
    /// Header line (app name, session, mode tabs).
    pub header: Rect,
    /// Form column.
    pub form: Rect,
    /// Result panel.
    pub result: Rect,
    /// Footer line (key hints).
    pub footer: Rect,
    /// Form rows visible inside the borders.
    pub form_visible_height: usize,
    /// Result lines visible inside the borders.
    pub result_visible_height: usize,
    /// Result content width (excluding borders and scrollbar).
    pub result_content_width: usize,
}

/// Layout of the chat panel: transcript above, composer or option list
/// below.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatLayout {
    /// Header line.
    pub header: Rect,
    /// Transcript panel.
    pub transcript: Rect,
    /// Composer (text mode) or option list (options mode).
    pub input: Rect,
    /// Footer line.
    pub footer: Rect,
    /// Transcript lines visible inside the borders.
    pub transcript_visible_height: usize,
    /// Transcript content width (excluding borders and scrollbar).
    pub transcript_content_width: usize,
}

/// Calculates the prediction panel layout.
#[must_use]
pub fn calculate_predict_layout(area: Rect) -> PredictLayout {
    let rows = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(5),    // Body
        Constraint::Length(1), // Footer
    ])
    .split(area);

    let columns =
        Layout::horizontal([Constraint::Length(FORM_WIDTH), Constraint::Min(20)]).split(rows[1]);

    let form = columns[0];
    let result = columns[1];

    PredictLayout {
        header: rows[0],
        form,
        result,
        footer: rows[2],
        form_visible_height: form.height.saturating_sub(2) as usize,
        result_visible_height: result.height.saturating_sub(2) as usize,
        result_content_width: result.width.saturating_sub(3) as usize,
    }
}

/// Calculates the chat panel layout. The input area grows when the
/// fixed-option list is active.
#[must_use]
pub fn calculate_chat_layout(area: Rect, options_mode: bool) -> ChatLayout {
    let input_height = if options_mode {
        OPTIONS_INPUT_HEIGHT
    } else {
        TEXT_INPUT_HEIGHT
    };

    let rows = Layout::vertical([
        Constraint::Length(1),            // Header
        Constraint::Min(5),               // Transcript
        Constraint::Length(input_height), // Composer / options
        Constraint::Length(1),            // Footer
    ])
    .split(area);

    let transcript = rows[1];

    ChatLayout {
        header: rows[0],
        transcript,
        input: rows[2],
        footer: rows[3],
        transcript_visible_height: transcript.height.saturating_sub(2) as usize,
        transcript_content_width: transcript.width.saturating_sub(3) as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_layout_splits_form_and_result() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = calculate_predict_layout(area);

        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.footer.height, 1);
        assert_eq!(layout.form.width, 42);
        assert_eq!(layout.result.width, 58);
        assert_eq!(layout.form.height, 28);
        assert_eq!(layout.result_visible_height, 26);
        assert_eq!(layout.result_content_width, 55);
    }

    #[test]
    fn predict_layout_survives_small_terminals() {
        let area = Rect::new(0, 0, 40, 10);
        let layout = calculate_predict_layout(area);

        // Should not panic; derived sizes saturate instead of underflowing.
        assert_eq!(layout.header.height, 1);
        assert!(layout.result_visible_height <= 8);
    }

    #[test]
    fn chat_layout_text_mode_uses_three_line_composer() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = calculate_chat_layout(area, false);

        assert_eq!(layout.input.height, 3);
        assert_eq!(layout.transcript.height, 24 - 1 - 3 - 1);
        assert_eq!(layout.transcript_visible_height, 17);
        assert_eq!(layout.transcript_content_width, 77);
    }

    #[test]
    fn chat_layout_options_mode_grows_input_area() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = calculate_chat_layout(area, true);

        assert_eq!(layout.input.height, 6);
        assert_eq!(layout.transcript.height, 24 - 1 - 6 - 1);
    }

    #[test]
    fn chat_layout_areas_are_stacked_in_order() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = calculate_chat_layout(area, false);

        assert_eq!(layout.header.y, 0);
        assert_eq!(layout.transcript.y, 1);
        assert_eq!(
            layout.input.y,
            layout.transcript.y + layout.transcript.height
        );
        assert_eq!(layout.footer.y, layout.input.y + layout.input.height);
    }
}
