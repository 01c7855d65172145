//! Prediction panel rendering.
//!
//! Left column: the health profile form, navigated like a settings list.
//! Right column: the latest prediction result, or the animated backdrop
//! while there is nothing to show yet.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::core::form::{FieldKind, FormField};
use crate::tui::widgets::{Backdrop, ResultWidget};

impl App {
    /// Renders the prediction panel.
    pub(crate) fn render_predict(&self, frame: &mut Frame) {
        let layout = self.layout.predict;

        self.render_header(frame, layout.header);
        self.render_form(frame, layout.form);
        self.render_result(frame, layout.result);
        self.render_predict_footer(frame, layout.footer);
    }

    /// Renders the form column with a selection cursor and windowing for
    /// short terminals.
    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Line::from(Span::styled(
                " Health Profile ",
                self.theme.header_style(),
            )))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        let fields = FormField::all();
        let visible = self.layout.predict.form_visible_height.max(1);
        let selected = self.predict.form.selected;

        // Keep the selected row inside the window.
        let start = selected.saturating_sub(visible.saturating_sub(1));

        let mut lines = Vec::new();
        for (i, field) in fields.iter().enumerate().skip(start).take(visible) {
            let is_selected = i == selected;
            let prefix = if is_selected { "› " } else { "  " };
            let value = self.predict.form.display_value(*field);

            // Choice and toggle fields hint at cycling; numeric fields
            // show an edit cursor when selected.
            let value_text = match field.kind() {
                FieldKind::Choice(_) | FieldKind::Toggle => format!("‹{value}›"),
                FieldKind::Integer { .. } | FieldKind::Decimal { .. } if is_selected => {
                    format!("{value}_")
                }
                _ => value,
            };

            let line = if is_selected {
                Line::from(vec![
                    Span::styled(prefix, self.theme.highlight_style()),
                    Span::styled(format!("{:<22}", field.label()), self.theme.highlight_style()),
                    Span::styled(value_text, self.theme.highlight_style()),
                ])
            } else {
                Line::from(vec![
                    Span::raw(prefix),
                    Span::styled(format!("{:<22}", field.label()), self.theme.normal_style()),
                    Span::styled(value_text, self.theme.muted_style()),
                ])
            };
            lines.push(line);
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    /// Renders the result column: busy indicator, latest result, or the
    /// decorative backdrop with a hint.
    fn render_result(&self, frame: &mut Frame, area: Rect) {
        if self.predict.busy {
            let block = Block::default()
                .title(Line::from(Span::styled(
                    " Estimated Cost ",
                    self.theme.header_style(),
                )))
                .borders(Borders::ALL)
                .border_style(self.theme.border_style());
            let inner = block.inner(area);
            frame.render_widget(block, area);

            let busy = Paragraph::new(Line::from(Span::styled(
                "Calculating your estimate...",
                self.theme.warning_style(),
            )))
            .alignment(Alignment::Center);
            let middle = Rect {
                y: inner.y + inner.height / 2,
                height: 1.min(inner.height),
                ..inner
            };
            frame.render_widget(busy, middle);
            return;
        }

        if let Some(display) = &self.predict.display {
            let widget = ResultWidget::new(display, self.predict.scroll.offset, &self.theme);
            frame.render_widget(widget, area);
            return;
        }

        // Empty state: decorative dots behind a one-line hint.
        let block = Block::default()
            .title(Line::from(Span::styled(
                " Estimated Cost ",
                self.theme.header_style(),
            )))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Backdrop::new(self.tick_count), inner);

        let hint = Paragraph::new(Line::from(Span::styled(
            "Fill in your profile and press Enter",
            self.theme.placeholder_style(),
        )))
        .alignment(Alignment::Center);
        let middle = Rect {
            y: inner.y + inner.height / 2,
            height: 1.min(inner.height),
            ..inner
        };
        frame.render_widget(hint, middle);
    }

    /// Renders the footer key hints.
    fn render_predict_footer(&self, frame: &mut Frame, area: Rect) {
        let hints = vec![
            Span::styled(" [↑/↓] ", self.theme.highlight_style()),
            Span::styled("Field  ", self.theme.muted_style()),
            Span::styled("[←/→] ", self.theme.highlight_style()),
            Span::styled("Change  ", self.theme.muted_style()),
            Span::styled("[Enter] ", self.theme.highlight_style()),
            Span::styled("Estimate  ", self.theme.muted_style()),
            Span::styled("[Ctrl+A] ", self.theme.highlight_style()),
            Span::styled("Chat  ", self.theme.muted_style()),
            Span::styled("[Ctrl+G] ", self.theme.highlight_style()),
            Span::styled("Charts  ", self.theme.muted_style()),
            Span::styled("[Ctrl+C] ", self.theme.highlight_style()),
            Span::styled("Quit", self.theme.muted_style()),
        ];
        frame.render_widget(Paragraph::new(Line::from(hints)), area);
    }
}
