//! Rendering methods for the App.
//!
//! Rendering is a pure projection of the state structs: the key handlers
//! decide *what* to show, these functions decide *where*. Each panel has
//! its own module; the charts overlay and the error toast float above
//! whichever panel is active.

mod charts;
mod chat;
mod predict;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::App;
use crate::app::state::{MainMode, Notice};

impl App {
    /// Renders the application UI.
    pub fn render(&self, frame: &mut Frame) {
        match self.mode {
            MainMode::Prediction => self.render_predict(frame),
            MainMode::Chat => self.render_chat(frame),
        }

        if self.charts.visible {
            self.render_charts_overlay(frame);
        }

        if let Some(notice) = &self.predict.notice {
            self.render_notice(frame, notice);
        }
    }

    /// Renders the shared header line: app name, mode tabs, and the
    /// session greeting.
    pub(crate) fn render_header(&self, frame: &mut Frame, area: Rect) {
        let tab_style = |mode: MainMode| {
            if self.mode == mode {
                self.theme.highlight_style()
            } else {
                self.theme.muted_style()
            }
        };

        let left = Line::from(vec![
            Span::styled(" MediQuote ", self.theme.header_style()),
            Span::styled("[", self.theme.muted_style()),
            Span::styled(MainMode::Prediction.name(), tab_style(MainMode::Prediction)),
            Span::styled("/", self.theme.muted_style()),
            Span::styled(MainMode::Chat.name(), tab_style(MainMode::Chat)),
            Span::styled("]", self.theme.muted_style()),
        ]);
        frame.render_widget(Paragraph::new(left), area);

        let right = match &self.session {
            Some(user) => Line::from(vec![
                Span::styled(
                    format!("Welcome, {}! ", user.display_name()),
                    self.theme.normal_style(),
                ),
                Span::styled("[Ctrl+L] ", self.theme.highlight_style()),
                Span::styled("Logout ", self.theme.muted_style()),
            ]),
            None => Line::from(Span::styled("not signed in ", self.theme.muted_style())),
        };
        frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), area);
    }

    /// Renders the self-dismissing error toast in the top-right corner.
    fn render_notice(&self, frame: &mut Frame, notice: &Notice) {
        let area = frame.area();
        if area.width < 20 || area.height < 5 {
            return;
        }

        #[allow(clippy::cast_possible_truncation)] // Clamped to the terminal width below
        let width = (notice.message.len() as u16 + 6).min(area.width.saturating_sub(4));
        let toast_area = Rect::new(area.width.saturating_sub(width + 2), 1, width, 3);

        frame.render_widget(Clear, toast_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.error_style());
        let toast = Paragraph::new(Line::from(vec![
            Span::styled("! ", self.theme.error_style()),
            Span::styled(notice.message.clone(), self.theme.normal_style()),
        ]))
        .block(block);
        frame.render_widget(toast, toast_area);
    }
}
