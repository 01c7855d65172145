//! Event handling logic for the App.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use crate::app::state::{
    AppEvent, ChatInputMode, ChatOption, MainMode, Notice, PredictionDisplay, chat_error_text,
    prediction_error_notice,
};
use crate::core::charts::{ChartSource, select_charts};
use crate::core::transcript::TurnStatus;

/// Scroll page size for navigation.
const SCROLL_PAGE_SIZE: usize = 10;

impl App {
    /// Handles a key event.
    ///
    /// Dispatch order:
    /// 1. Quit (Ctrl+C)
    /// 2. Charts overlay (swallows keys while open)
    /// 3. Global switches: main mode (Ctrl+E / Ctrl+A), charts (Ctrl+G),
    ///    logout (Ctrl+L)
    /// 4. The active panel's own handler
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        // The overlay is modal: any of the close keys dismisses it, the
        // rest are ignored so panel state cannot change underneath it.
        if self.charts.visible {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q'))
                || (key.code == KeyCode::Char('g')
                    && key.modifiers.contains(KeyModifiers::CONTROL))
            {
                self.charts.visible = false;
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                // Radio pair for the top-level mode: each key selects its
                // panel, neither toggles. Switching is purely a
                // visibility change - form and transcript stay intact.
                KeyCode::Char('e') => {
                    self.mode = MainMode::Prediction;
                    return;
                }
                KeyCode::Char('a') => {
                    self.mode = MainMode::Chat;
                    return;
                }
                KeyCode::Char('g') => {
                    self.charts.visible = true;
                    return;
                }
                KeyCode::Char('l') => {
                    self.logout();
                    return;
                }
                _ => {}
            }
        }

        match self.mode {
            MainMode::Prediction => self.handle_predict_key(key),
            MainMode::Chat => self.handle_chat_key(key),
        }
    }

    /// Handles key events in the prediction panel.
    fn handle_predict_key(&mut self, key: KeyEvent) {
        // Result panel scrolling first; these keys never edit the form.
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Up => {
                    self.predict.scroll.scroll_up();
                    return;
                }
                KeyCode::Down => {
                    let content_len = self.result_line_count();
                    self.predict
                        .scroll
                        .scroll_down(content_len, self.layout.predict.result_visible_height);
                    return;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::PageUp => {
                self.predict.scroll.page_up(SCROLL_PAGE_SIZE);
            }
            KeyCode::PageDown => {
                let content_len = self.result_line_count();
                self.predict.scroll.page_down(
                    content_len,
                    self.layout.predict.result_visible_height,
                    SCROLL_PAGE_SIZE,
                );
            }
            KeyCode::Up => self.predict.form.select_prev(),
            KeyCode::Down => self.predict.form.select_next(),
            KeyCode::Left => self.predict.form.cycle_prev(),
            KeyCode::Right | KeyCode::Char(' ') => self.predict.form.cycle_next(),
            KeyCode::Backspace => self.predict.form.backspace(),
            KeyCode::Enter => self.submit_prediction(),
            KeyCode::Esc => self.predict.notice = None,
            KeyCode::Char(c) => self.predict.form.input_char(c),
            _ => {}
        }
    }

    /// Handles key events in the chat panel.
    fn handle_chat_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                // Radio pair for the input style.
                KeyCode::Char('t') => {
                    self.chat.input_mode = ChatInputMode::Text;
                    return;
                }
                KeyCode::Char('o') => {
                    self.chat.input_mode = ChatInputMode::Options;
                    return;
                }
                KeyCode::Up => {
                    self.chat.scroll.scroll_up();
                    return;
                }
                KeyCode::Down => {
                    let content_len = self.transcript_line_count();
                    self.chat
                        .scroll
                        .scroll_down(content_len, self.layout.chat.transcript_visible_height);
                    return;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::PageUp => {
                self.chat.scroll.page_up(SCROLL_PAGE_SIZE);
                return;
            }
            KeyCode::PageDown => {
                let content_len = self.transcript_line_count();
                self.chat.scroll.page_down(
                    content_len,
                    self.layout.chat.transcript_visible_height,
                    SCROLL_PAGE_SIZE,
                );
                return;
            }
            _ => {}
        }

        match self.chat.input_mode {
            ChatInputMode::Text => self.handle_chat_text_key(key),
            ChatInputMode::Options => self.handle_chat_options_key(key),
        }
    }

    /// Handles composer keys in free-text style.
    ///
    /// While a reply is pending the composer is disabled: keys are
    /// dropped rather than queued, matching the disabled send control.
    fn handle_chat_text_key(&mut self, key: KeyEvent) {
        if self.chat.busy {
            return;
        }

        match key.code {
            KeyCode::Enter => self.send_chat_text(),
            KeyCode::Backspace => {
                self.chat.input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.chat.input.push(c);
            }
            _ => {}
        }
    }

    /// Handles option-list keys in fixed-option style.
    ///
    /// All option controls are disabled while a reply is pending.
    fn handle_chat_options_key(&mut self, key: KeyEvent) {
        if self.chat.busy {
            return;
        }

        let max_index = ChatOption::all().len() - 1;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.chat.selected_option = self.chat.selected_option.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.chat.selected_option = (self.chat.selected_option + 1).min(max_index);
            }
            KeyCode::Char(c @ '1'..='4') => {
                self.chat.selected_option = (c as usize - '1' as usize).min(max_index);
            }
            KeyCode::Enter => self.send_chat_option(),
            _ => {}
        }
    }

    // =========================================================================
    // Backend event processing
    // =========================================================================

    /// Drains pending backend events.
    ///
    /// Called once per loop iteration. Each spawned task settles into
    /// exactly one event, so the busy flags acquired at spawn time are
    /// released here exactly once - on success, application error, and
    /// transport error alike.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Prediction(result) => {
                self.predict.busy = false;
                match result {
                    Ok(response) => {
                        tracing::info!(
                            "prediction received: {} model estimates",
                            response.individual_predictions.len()
                        );
                        // The previous result (explanation included) is
                        // replaced wholesale; nothing is merged.
                        self.predict.display = Some(PredictionDisplay::from_response(&response));
                        self.predict.scroll.reset();
                    }
                    Err(error) => {
                        tracing::warn!("prediction failed: {error}");
                        self.predict.notice = Some(Notice::new(prediction_error_notice(&error)));
                    }
                }
            }
            AppEvent::ChatReply { kind, result } => {
                self.chat.busy = false;
                match result {
                    Ok(reply) => {
                        self.chat.transcript.settle_pending(TurnStatus::SettledOk);
                        self.chat.transcript.push_ai(reply);
                    }
                    Err(error) => {
                        tracing::warn!("chat turn failed: {error}");
                        self.chat
                            .transcript
                            .settle_pending(TurnStatus::SettledError);
                        self.chat
                            .transcript
                            .push_ai_error(chat_error_text(kind, &error));
                    }
                }
                self.auto_scroll_transcript();
            }
            AppEvent::Visualizations(result) => {
                if let Err(error) = &result {
                    tracing::warn!("visualization fetch failed: {error}");
                }
                let (set, source) = select_charts(result);
                if source == ChartSource::Sample {
                    tracing::info!("charts overlay using sample data");
                }
                self.charts.charts = Some((set, source));
            }
            AppEvent::Statistics(result) => match result {
                // Logged only; the summary is never rendered.
                Ok(stats) => tracing::info!("dataset statistics: {stats}"),
                Err(error) => tracing::debug!("could not load statistics: {error}"),
            },
        }
    }
}
