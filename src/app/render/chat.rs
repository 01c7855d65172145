//! Chat panel rendering.
//!
//! Transcript above, composer or option list below. The pending-reply
//! state dims whichever input control is active, mirroring the disabled
//! flags in the key handlers.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::app::state::{ChatInputMode, ChatOption};
use crate::tui::widgets::TranscriptWidget;

impl App {
    /// Renders the chat panel.
    pub(crate) fn render_chat(&self, frame: &mut Frame) {
        let layout = self.layout.chat;

        self.render_header(frame, layout.header);

        let transcript = TranscriptWidget::new(
            self.chat.transcript.turns(),
            self.chat.scroll.offset,
            &self.theme,
            self.chat.busy,
        );
        frame.render_widget(transcript, layout.transcript);

        match self.chat.input_mode {
            ChatInputMode::Text => self.render_composer(frame, layout.input),
            ChatInputMode::Options => self.render_options(frame, layout.input),
        }

        self.render_chat_footer(frame, layout.footer);
    }

    /// Renders the free-text composer and positions the cursor.
    fn render_composer(&self, frame: &mut Frame, area: Rect) {
        let title = if self.chat.busy {
            " Message (waiting for reply) "
        } else {
            " Message "
        };

        let block = Block::default()
            .title(Line::from(Span::styled(title, self.theme.header_style())))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let inner = block.inner(area);

        let style = if self.chat.busy {
            self.theme.muted_style()
        } else {
            self.theme.normal_style()
        };

        // Long input scrolls horizontally so the cursor stays visible.
        let input_width = self.chat.input.width();
        let visible_width = inner.width.saturating_sub(1) as usize;
        let overflow = input_width.saturating_sub(visible_width);

        let content = if self.chat.input.is_empty() && !self.chat.busy {
            Paragraph::new(Line::from(Span::styled(
                "Ask about medical costs or insurance...",
                self.theme.placeholder_style(),
            )))
        } else {
            #[allow(clippy::cast_possible_truncation)] // Overflow bounded by input width
            Paragraph::new(Line::from(Span::styled(self.chat.input.clone(), style)))
                .scroll((0, overflow as u16))
        };
        frame.render_widget(content.block(block), area);

        if !self.chat.busy && inner.width > 0 && inner.height > 0 {
            #[allow(clippy::cast_possible_truncation)] // Clamped to the inner width
            let cursor_x = inner.x + (input_width - overflow).min(visible_width) as u16;
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }

    /// Renders the fixed option list.
    fn render_options(&self, frame: &mut Frame, area: Rect) {
        let title = if self.chat.busy {
            " Options (waiting for reply) "
        } else {
            " Options "
        };

        let block = Block::default()
            .title(Line::from(Span::styled(title, self.theme.header_style())))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        let mut lines = Vec::new();
        for (i, option) in ChatOption::all().iter().enumerate() {
            let is_selected = i == self.chat.selected_option;
            let prefix = if is_selected { "› " } else { "  " };

            let style = if self.chat.busy {
                self.theme.muted_style()
            } else if is_selected {
                self.theme.highlight_style()
            } else {
                self.theme.normal_style()
            };

            lines.push(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(format!("{}. {}", i + 1, option.label()), style),
            ]));
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    /// Renders the footer key hints for the active input style.
    fn render_chat_footer(&self, frame: &mut Frame, area: Rect) {
        let hints = match self.chat.input_mode {
            ChatInputMode::Text => vec![
                Span::styled(" [Enter] ", self.theme.highlight_style()),
                Span::styled("Send  ", self.theme.muted_style()),
                Span::styled("[Ctrl+O] ", self.theme.highlight_style()),
                Span::styled("Options  ", self.theme.muted_style()),
                Span::styled("[Ctrl+E] ", self.theme.highlight_style()),
                Span::styled("Predict  ", self.theme.muted_style()),
                Span::styled("[Ctrl+G] ", self.theme.highlight_style()),
                Span::styled("Charts  ", self.theme.muted_style()),
                Span::styled("[Ctrl+C] ", self.theme.highlight_style()),
                Span::styled("Quit", self.theme.muted_style()),
            ],
            ChatInputMode::Options => vec![
                Span::styled(" [↑/↓] ", self.theme.highlight_style()),
                Span::styled("Select  ", self.theme.muted_style()),
                Span::styled("[Enter] ", self.theme.highlight_style()),
                Span::styled("Send  ", self.theme.muted_style()),
                Span::styled("[Ctrl+T] ", self.theme.highlight_style()),
                Span::styled("Free text  ", self.theme.muted_style()),
                Span::styled("[Ctrl+E] ", self.theme.highlight_style()),
                Span::styled("Predict", self.theme.muted_style()),
            ],
        };
        frame.render_widget(Paragraph::new(Line::from(hints)), area);
    }
}
