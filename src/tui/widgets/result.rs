//! Prediction result viewer widget.
//!
//! Projects a [`PredictionDisplay`] view model into styled lines: the
//! primary estimate, one row per model in response order, and, when the
//! backend sent one, the cost explanation with its factors table and
//! insurance breakdown.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget,
    },
};

use crate::app::state::PredictionDisplay;
use crate::tui::Theme;
use crate::tui::widgets::transcript::wrap_plain;

/// Column widths of the factors table.
const FACTOR_COL: usize = 22;
const IMPACT_COL: usize = 12;
const AMOUNT_COL: usize = 14;

/// Builds the styled lines for a prediction result.
///
/// `width` is the content width used to wrap the summary paragraph; the
/// table rows are emitted as-is.
#[must_use]
pub fn result_lines(
    display: &PredictionDisplay,
    theme: &Theme,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        display.primary.clone(),
        theme.value_style(),
    )));
    lines.push(Line::from(Span::styled(
        "estimated annual medical cost".to_string(),
        theme.muted_style(),
    )));

    if !display.model_rows.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Model estimates".to_string(),
            theme.header_style(),
        )));
        for (name, value) in &display.model_rows {
            lines.push(Line::from(vec![
                Span::styled(format!("  {name:<24}"), theme.normal_style()),
                Span::styled(format!("{value:>12}"), theme.highlight_style()),
            ]));
        }
    }

    if let Some(explanation) = &display.explanation {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Why this cost?".to_string(),
            theme.header_style(),
        )));
        for wrapped in wrap_plain(&explanation.summary, width.max(1)) {
            lines.push(Line::from(Span::styled(wrapped, theme.normal_style())));
        }

        if !explanation.factors.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Key cost factors".to_string(),
                theme.header_style(),
            )));
            lines.push(Line::from(Span::styled(
                format!(
                    "  {:<FACTOR_COL$}{:<IMPACT_COL$}{:>AMOUNT_COL$}",
                    "Factor", "Impact", "Contribution"
                ),
                theme.muted_style(),
            )));
            for factor in &explanation.factors {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:<FACTOR_COL$}", factor.name),
                        theme.normal_style(),
                    ),
                    Span::styled(
                        format!("{:<IMPACT_COL$}", factor.impact),
                        theme.impact_style(&factor.impact_key),
                    ),
                    Span::styled(
                        format!("{:>AMOUNT_COL$}", factor.amount),
                        theme.normal_style(),
                    ),
                ]));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Insurance coverage".to_string(),
            theme.header_style(),
        )));
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<20}", "Total cost"), theme.normal_style()),
            Span::styled(explanation.total.clone(), theme.normal_style()),
        ]));
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<20}", "Insurance covers"), theme.normal_style()),
            Span::styled(explanation.covered.clone(), theme.success_style()),
        ]));
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<20}", "Your out-of-pocket"),
                theme.normal_style(),
            ),
            Span::styled(explanation.out_of_pocket.clone(), theme.highlight_style()),
        ]));
    }

    lines
}

/// A scrollable prediction result widget.
pub struct ResultWidget<'a> {
    display: &'a PredictionDisplay,
    scroll_offset: usize,
    theme: &'a Theme,
}

impl<'a> ResultWidget<'a> {
    /// Creates a new result widget.
    #[must_use]
    pub const fn new(
        display: &'a PredictionDisplay,
        scroll_offset: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            display,
            scroll_offset,
            theme,
        }
    }
}

impl Widget for ResultWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Line::from(Span::styled(
                " Estimated Cost ",
                self.theme.header_style(),
            )))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        let inner_area = block.inner(area);
        block.render(area, buf);

        if inner_area.height == 0 || inner_area.width == 0 {
            return;
        }

        let visible_height = inner_area.height as usize;
        let content_width = inner_area.width.saturating_sub(1) as usize;

        let all_lines = result_lines(self.display, self.theme, content_width);
        let max_offset = all_lines.len().saturating_sub(visible_height);
        let offset = self.scroll_offset.min(max_offset);

        let window: Vec<Line> = all_lines
            .iter()
            .skip(offset)
            .take(visible_height)
            .cloned()
            .collect();

        let content_area = Rect {
            width: inner_area.width.saturating_sub(1),
            ..inner_area
        };
        Paragraph::new(window).render(content_area, buf);

        if all_lines.len() > visible_height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .thumb_style(self.theme.scrollbar_thumb_style())
                .track_style(self.theme.scrollbar_track_style());
            let mut scrollbar_state =
                ScrollbarState::new(all_lines.len().saturating_sub(visible_height))
                    .position(offset);
            scrollbar.render(inner_area, buf, &mut scrollbar_state);
        }
    }
}

/// Number of lines the result occupies at the given width, for scroll
/// clamping.
#[must_use]
pub fn result_line_count(display: &PredictionDisplay, theme: &Theme, width: usize) -> usize {
    result_lines(display, theme, width).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{ExplanationDisplay, FactorRow};

    fn display_with_explanation() -> PredictionDisplay {
        PredictionDisplay {
            primary: "\u{20b9}52,340".to_string(),
            model_rows: vec![
                ("ModelA".to_string(), "\u{20b9}51,000".to_string()),
                ("ModelB".to_string(), "\u{20b9}53,000".to_string()),
            ],
            explanation: Some(ExplanationDisplay {
                summary: "Age 45 years | Smoking status".to_string(),
                factors: vec![FactorRow {
                    name: "Smoking".to_string(),
                    impact: "Very High".to_string(),
                    impact_key: "very-high".to_string(),
                    amount: "+\u{20b9}18,319".to_string(),
                }],
                total: "\u{20b9}52,340".to_string(),
                covered: "\u{20b9}36,638".to_string(),
                out_of_pocket: "\u{20b9}15,702".to_string(),
            }),
        }
    }

    #[test]
    fn lines_start_with_primary_estimate() {
        let theme = Theme::default();
        let lines = result_lines(&display_with_explanation(), &theme, 60);
        assert_eq!(lines[0].spans[0].content, "\u{20b9}52,340");
    }

    #[test]
    fn one_row_per_model_in_given_order() {
        let theme = Theme::default();
        let lines = result_lines(&display_with_explanation(), &theme, 60);
        let rendered: Vec<String> = lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect();

        let model_a = rendered
            .iter()
            .position(|l| l.contains("ModelA"))
            .expect("ModelA row");
        let model_b = rendered
            .iter()
            .position(|l| l.contains("ModelB"))
            .expect("ModelB row");
        assert!(model_a < model_b);
        assert!(rendered[model_a].contains("\u{20b9}51,000"));
        assert!(rendered[model_b].contains("\u{20b9}53,000"));
    }

    #[test]
    fn explanation_rows_carry_impact_badge_style() {
        let theme = Theme::default();
        let lines = result_lines(&display_with_explanation(), &theme, 60);

        let factor_line = lines
            .iter()
            .find(|line| {
                line.spans
                    .iter()
                    .any(|span| span.content.contains("Smoking"))
            })
            .expect("factor row");
        let badge = factor_line
            .spans
            .iter()
            .find(|span| span.content.contains("Very High"))
            .expect("badge span");
        assert_eq!(badge.style, theme.impact_style("very-high"));
    }

    #[test]
    fn no_explanation_block_without_explanation() {
        let theme = Theme::default();
        let display = PredictionDisplay {
            explanation: None,
            ..display_with_explanation()
        };
        let lines = result_lines(&display, &theme, 60);
        assert!(
            !lines
                .iter()
                .flat_map(|line| line.spans.iter())
                .any(|span| span.content.contains("Insurance coverage"))
        );
    }
}
