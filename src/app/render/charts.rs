//! Charts overlay rendering.
//!
//! Projects the six aggregate datasets onto ratatui's chart widgets in a
//! 3x2 grid. Widgets here are immediate-mode values rebuilt per frame;
//! replacing the dataset state replaces everything the renderer holds.
//! TUI projections of the pie and polar charts are value breakdowns and
//! grouped bars respectively.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Color,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, BarChart, Block, Borders, Chart, Clear, Dataset, GraphType, LineGauge, Paragraph,
    },
};

use crate::api::types::{ChartDataset, ScatterDataset};
use crate::app::App;
use crate::core::format::format_inr;

impl App {
    /// Renders the charts overlay above the active panel.
    pub(crate) fn render_charts_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        if area.width < 40 || area.height < 18 {
            return;
        }

        let overlay = Rect::new(
            area.x + 2,
            area.y + 1,
            area.width.saturating_sub(4),
            area.height.saturating_sub(2),
        );
        frame.render_widget(Clear, overlay);

        let title = match &self.charts.charts {
            Some((_, source)) => format!(" Aggregate Statistics ({}) ", source.label()),
            None => " Aggregate Statistics ".to_string(),
        };

        let block = Block::default()
            .title(Line::from(Span::styled(title, self.theme.header_style())))
            .title_bottom(Line::from(vec![
                Span::styled(" [Esc] ", self.theme.highlight_style()),
                Span::styled("Close ", self.theme.muted_style()),
            ]))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let Some((set, _)) = &self.charts.charts else {
            let loading = Paragraph::new(Line::from(Span::styled(
                "Loading aggregate statistics...",
                self.theme.muted_style(),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(loading, inner);
            return;
        };

        let rows = Layout::vertical([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(inner);
        let halves = [Constraint::Percentage(50), Constraint::Percentage(50)];
        let top = Layout::horizontal(halves).split(rows[0]);
        let middle = Layout::horizontal(halves).split(rows[1]);
        let bottom = Layout::horizontal(halves).split(rows[2]);

        self.render_series_chart(frame, top[0], "Cost by Age Group", &set.line, self.theme.accent);
        self.render_bar_chart(frame, top[1], "Cost by Insurance Type", &set.bar);
        self.render_breakdown(frame, middle[0], "Chronic Conditions", &set.pie);
        self.render_series_chart(
            frame,
            middle[1],
            "Cost by City Type",
            &set.area,
            self.theme.success,
        );

        match &set.scatter {
            Some(scatter) => {
                self.render_scatter_chart(frame, bottom[0], "Cost vs Doctor Visits", scatter);
            }
            None => self.render_chart_placeholder(frame, bottom[0], "Cost vs Doctor Visits"),
        }
        match &set.polar {
            Some(polar) => self.render_bar_chart(frame, bottom[1], "Smoker Cost Profile", polar),
            None => self.render_chart_placeholder(frame, bottom[1], "Smoker Cost Profile"),
        }
    }

    fn chart_block(&self, title: &str) -> Block<'static> {
        Block::default()
            .title(Line::from(Span::styled(
                format!(" {title} "),
                self.theme.header_style(),
            )))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
    }

    /// Renders a labeled series as a braille line chart.
    #[allow(clippy::cast_precision_loss)] // Category indices are tiny
    fn render_series_chart(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        dataset: &ChartDataset,
        color: Color,
    ) {
        let points: Vec<(f64, f64)> = dataset
            .data
            .iter()
            .enumerate()
            .map(|(i, value)| (i as f64, *value))
            .collect();
        let max = dataset.data.iter().copied().fold(0.0_f64, f64::max);

        let datasets = vec![
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(ratatui::style::Style::default().fg(color))
                .data(&points),
        ];

        let first = dataset.labels.first().cloned().unwrap_or_default();
        let last = dataset.labels.last().cloned().unwrap_or_default();

        let chart = Chart::new(datasets)
            .block(self.chart_block(title))
            .x_axis(
                Axis::default()
                    .bounds([0.0, (dataset.data.len().saturating_sub(1)).max(1) as f64])
                    .labels([first, last])
                    .style(self.theme.muted_style()),
            )
            .y_axis(
                Axis::default()
                    .bounds([0.0, (max * 1.1).max(1.0)])
                    .labels(["0".to_string(), format_inr(max)])
                    .style(self.theme.muted_style()),
            );
        frame.render_widget(chart, area);
    }

    /// Renders a labeled series as vertical bars.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Values are non-negative rupee averages
    fn render_bar_chart(&self, frame: &mut Frame, area: Rect, title: &str, dataset: &ChartDataset) {
        let bars: Vec<(&str, u64)> = dataset
            .labels
            .iter()
            .zip(&dataset.data)
            .map(|(label, value)| (label.as_str(), value.max(0.0).round() as u64))
            .collect();

        let count = bars.len().max(1) as u16;
        let bar_width = (area.width.saturating_sub(2) / count).saturating_sub(1).clamp(3, 10);

        let chart = BarChart::default()
            .block(self.chart_block(title))
            .bar_width(bar_width)
            .bar_gap(1)
            .bar_style(ratatui::style::Style::default().fg(self.theme.accent))
            .value_style(self.theme.normal_style())
            .label_style(self.theme.muted_style())
            .data(bars.as_slice());
        frame.render_widget(chart, area);
    }

    /// Renders a share-of-total breakdown, one gauge row per category
    /// (the TUI projection of the doughnut chart).
    fn render_breakdown(&self, frame: &mut Frame, area: Rect, title: &str, dataset: &ChartDataset) {
        let block = self.chart_block(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let total: f64 = dataset.data.iter().sum();
        if total <= 0.0 || inner.height == 0 {
            return;
        }

        for (i, (label, value)) in dataset
            .labels
            .iter()
            .zip(&dataset.data)
            .take(inner.height as usize)
            .enumerate()
        {
            #[allow(clippy::cast_possible_truncation)] // Row index bounded by inner height
            let row = Rect {
                y: inner.y + i as u16,
                height: 1,
                ..inner
            };
            let gauge = LineGauge::default()
                .ratio((value / total).clamp(0.0, 1.0))
                .label(format!("{label:<14}{value:>6.0}"))
                .filled_style(self.theme.success_style())
                .unfilled_style(self.theme.muted_style());
            frame.render_widget(gauge, row);
        }
    }

    /// Renders the scatter chart of cost against visit frequency.
    fn render_scatter_chart(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        dataset: &ScatterDataset,
    ) {
        let points: Vec<(f64, f64)> = dataset
            .x_data
            .iter()
            .zip(&dataset.y_data)
            .map(|(x, y)| (*x, *y))
            .collect();
        let max_x = dataset.x_data.iter().copied().fold(0.0_f64, f64::max);
        let max_y = dataset.y_data.iter().copied().fold(0.0_f64, f64::max);

        let datasets = vec![
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(ratatui::style::Style::default().fg(self.theme.accent))
                .data(&points),
        ];

        let chart = Chart::new(datasets)
            .block(self.chart_block(title))
            .x_axis(
                Axis::default()
                    .bounds([0.0, (max_x * 1.1).max(1.0)])
                    .labels(["0".to_string(), format!("{max_x:.0} visits")])
                    .style(self.theme.muted_style()),
            )
            .y_axis(
                Axis::default()
                    .bounds([0.0, (max_y * 1.1).max(1.0)])
                    .labels(["0".to_string(), format_inr(max_y)])
                    .style(self.theme.muted_style()),
            );
        frame.render_widget(chart, area);
    }

    /// Renders the placeholder cell for charts with no offline fixture.
    fn render_chart_placeholder(&self, frame: &mut Frame, area: Rect, title: &str) {
        let block = self.chart_block(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let placeholder = Paragraph::new(Line::from(Span::styled(
            "no offline data",
            self.theme.muted_style(),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(placeholder, inner);
    }
}
