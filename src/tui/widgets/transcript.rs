//! Chat transcript viewer widget.
//!
//! Renders the append-only transcript with Unicode-aware wrapping, a
//! scrollbar, and per-sender styling. Pending turns are dimmed until
//! their reply settles; the synthetic error turns use the warning style.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget,
    },
};
use unicode_width::UnicodeWidthChar;

use crate::core::transcript::{ChatSender, ChatTurn, TurnStatus};
use crate::tui::Theme;

/// Indent for turn body lines, under the sender tag.
const BODY_INDENT: &str = "  ";

/// Visual role of one wrapped line, resolved to a style at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Header(ChatSender, TurnStatus),
    Body(ChatSender, TurnStatus),
    Spacer,
    Waiting,
}

/// One wrapped line ready for display.
#[derive(Debug)]
struct VisualLine {
    text: String,
    kind: LineKind,
}

/// Wraps a single line of text to fit within the given width.
///
/// Uses Unicode-aware width calculation to properly handle multi-byte
/// characters.
pub(crate) fn wrap_plain(text: &str, width: usize) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![text.to_string()];
    }

    let mut result = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let char_width = ch.width().unwrap_or(0);

        if current_width + char_width > width {
            result.push(current_line);
            current_line = String::new();
            current_width = 0;
        }

        current_line.push(ch);
        current_width += char_width;
    }

    result.push(current_line);
    result
}

/// Builds the full list of visual lines for the transcript.
fn build_visual_lines(turns: &[ChatTurn], content_width: usize, waiting: bool) -> Vec<VisualLine> {
    let body_width = content_width.saturating_sub(BODY_INDENT.len()).max(1);
    let mut lines = Vec::new();

    for (i, turn) in turns.iter().enumerate() {
        if i > 0 {
            lines.push(VisualLine {
                text: String::new(),
                kind: LineKind::Spacer,
            });
        }

        lines.push(VisualLine {
            text: format!("{} · {}", turn.sender.tag(), turn.at.format("%H:%M")),
            kind: LineKind::Header(turn.sender, turn.status),
        });

        // Replies may carry their own newlines (the assistant formats
        // lists that way); wrap each logical line separately.
        for logical in turn.text.split('\n') {
            for wrapped in wrap_plain(logical, body_width) {
                lines.push(VisualLine {
                    text: format!("{BODY_INDENT}{wrapped}"),
                    kind: LineKind::Body(turn.sender, turn.status),
                });
            }
        }
    }

    if waiting {
        if !lines.is_empty() {
            lines.push(VisualLine {
                text: String::new(),
                kind: LineKind::Spacer,
            });
        }
        lines.push(VisualLine {
            text: "AI is thinking...".to_string(),
            kind: LineKind::Waiting,
        });
    }

    lines
}

/// Total visual line count after wrapping, for scroll calculations.
#[must_use]
pub fn transcript_visual_line_count(
    turns: &[ChatTurn],
    content_width: usize,
    waiting: bool,
) -> usize {
    build_visual_lines(turns, content_width, waiting).len()
}

/// A scrollable chat transcript widget.
pub struct TranscriptWidget<'a> {
    turns: &'a [ChatTurn],
    scroll_offset: usize,
    theme: &'a Theme,
    /// True while a reply is pending, to show the typing indicator.
    waiting: bool,
}

impl<'a> TranscriptWidget<'a> {
    /// Creates a new transcript widget.
    #[must_use]
    pub const fn new(
        turns: &'a [ChatTurn],
        scroll_offset: usize,
        theme: &'a Theme,
        waiting: bool,
    ) -> Self {
        Self {
            turns,
            scroll_offset,
            theme,
            waiting,
        }
    }

    fn line_style(&self, kind: LineKind) -> ratatui::style::Style {
        match kind {
            LineKind::Header(ChatSender::User, _) => self.theme.highlight_style(),
            LineKind::Header(ChatSender::Ai, TurnStatus::SettledError) => {
                self.theme.warning_style()
            }
            LineKind::Header(ChatSender::Ai, _) => self.theme.success_style(),
            LineKind::Body(_, TurnStatus::Pending) | LineKind::Waiting => {
                self.theme.muted_style()
            }
            LineKind::Body(ChatSender::Ai, TurnStatus::SettledError) => {
                self.theme.warning_style()
            }
            LineKind::Body(..) => self.theme.normal_style(),
            LineKind::Spacer => self.theme.muted_style(),
        }
    }
}

impl Widget for TranscriptWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Line::from(Span::styled(
                " Conversation ",
                self.theme.header_style(),
            )))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        let inner_area = block.inner(area);
        block.render(area, buf);

        if inner_area.height == 0 || inner_area.width == 0 {
            return;
        }

        if self.turns.is_empty() && !self.waiting {
            let placeholder = Paragraph::new(
                "Ask about medical costs and insurance, or pick an option below.",
            )
            .style(self.theme.placeholder_style());
            placeholder.render(inner_area, buf);
            return;
        }

        let visible_height = inner_area.height as usize;
        // One column is reserved for the scrollbar.
        let content_width = inner_area.width.saturating_sub(1) as usize;

        let visual_lines = build_visual_lines(self.turns, content_width, self.waiting);
        let max_offset = visual_lines.len().saturating_sub(visible_height);
        let offset = self.scroll_offset.min(max_offset);

        let lines: Vec<Line> = visual_lines
            .iter()
            .skip(offset)
            .take(visible_height)
            .map(|visual| {
                Line::from(Span::styled(
                    visual.text.clone(),
                    self.line_style(visual.kind),
                ))
            })
            .collect();

        let content_area = Rect {
            width: inner_area.width.saturating_sub(1),
            ..inner_area
        };
        Paragraph::new(lines).render(content_area, buf);

        if visual_lines.len() > visible_height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .thumb_style(self.theme.scrollbar_thumb_style())
                .track_style(self.theme.scrollbar_track_style());
            let mut scrollbar_state =
                ScrollbarState::new(visual_lines.len().saturating_sub(visible_height))
                    .position(offset);
            scrollbar.render(inner_area, buf, &mut scrollbar_state);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::core::transcript::Transcript;

    #[test]
    fn wrap_respects_unicode_width() {
        let wrapped = wrap_plain("₹52,340 estimated", 8);
        assert!(wrapped.len() > 1);
        for line in &wrapped {
            let width: usize = line.chars().map(|c| c.width().unwrap_or(0)).sum();
            assert!(width <= 8);
        }
    }

    #[test]
    fn wrap_keeps_short_lines_intact() {
        assert_eq!(wrap_plain("hello", 20), vec!["hello".to_string()]);
        assert_eq!(wrap_plain("", 20), vec![String::new()]);
    }

    #[test]
    fn visual_lines_include_header_body_and_spacers() {
        let mut transcript = Transcript::default();
        transcript.push_user_pending("hello");
        transcript.settle_pending(TurnStatus::SettledOk);
        transcript.push_ai("hi there");

        let lines = build_visual_lines(transcript.turns(), 40, false);
        // header + body, spacer, header + body
        assert_eq!(lines.len(), 5);
        assert!(matches!(lines[0].kind, LineKind::Header(ChatSender::User, _)));
        assert_eq!(lines[1].text, "  hello");
        assert_eq!(lines[2].kind, LineKind::Spacer);
        assert!(matches!(lines[3].kind, LineKind::Header(ChatSender::Ai, _)));
    }

    #[test]
    fn multiline_replies_produce_one_body_line_each() {
        let mut transcript = Transcript::default();
        transcript.push_ai("1. Stay active\n2. Sleep well");

        let lines = build_visual_lines(transcript.turns(), 40, false);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].text, "  1. Stay active");
        assert_eq!(lines[2].text, "  2. Sleep well");
    }

    #[test]
    fn waiting_indicator_is_appended() {
        let mut transcript = Transcript::default();
        transcript.push_user_pending("hello");

        let count_idle = transcript_visual_line_count(transcript.turns(), 40, false);
        let count_waiting = transcript_visual_line_count(transcript.turns(), 40, true);
        assert_eq!(count_waiting, count_idle + 2);
    }
}
