use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tui_input::backend::crossterm::EventHandler;
use tui_logger::TuiWidgetEvent;

use super::types::{ConnectOutcome, ConnectScreen};
use crate::config::AppConfig;

impl ConnectScreen {
    pub async fn handle_input(
        &mut self,
        key: KeyCode,
        modifiers: KeyModifiers,
        config: &AppConfig,
    ) -> Result<Option<ConnectOutcome>> {
        // Button hotkeys (Alt+O / Alt+Q) take precedence over editing.
        if let Some(button_id) = self.button_manager.handle_key_input(key, modifiers) {
            return self.activate_button(&button_id, config).await;
        }

        match key {
            KeyCode::Enter => {
                return Ok(self
                    .try_connect(config)
                    .await
                    .map(|(api, tree)| ConnectOutcome::Connected { api, tree }));
            }
            KeyCode::Esc => return Ok(Some(ConnectOutcome::Quit)),
            KeyCode::PageUp => {
                self.logger_widget_state.transition(TuiWidgetEvent::PrevPageKey);
            }
            KeyCode::PageDown => {
                self.logger_widget_state.transition(TuiWidgetEvent::NextPageKey);
            }
            _ => {
                // Everything else edits the URL field.
                self.url_input
                    .handle_event(&crossterm::event::Event::Key(
                        crossterm::event::KeyEvent::new(key, modifiers),
                    ));
                self.validation_error = None;
                self.connect_error = None;
                let has_input = !self.url_input.value().trim().is_empty();
                self.button_manager.set_button_enabled("connect", has_input);
            }
        }

        Ok(None)
    }

    pub async fn handle_mouse_input(
        &mut self,
        mouse: MouseEvent,
        config: &AppConfig,
    ) -> Result<Option<ConnectOutcome>> {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if let Some(button_id) = self
                .button_manager
                .handle_mouse_click(mouse.column, mouse.row)
            {
                return self.activate_button(&button_id, config).await;
            }
        }
        Ok(None)
    }

    async fn activate_button(
        &mut self,
        button_id: &str,
        config: &AppConfig,
    ) -> Result<Option<ConnectOutcome>> {
        match button_id {
            "connect" => Ok(self
                .try_connect(config)
                .await
                .map(|(api, tree)| ConnectOutcome::Connected { api, tree })),
            "quit" => Ok(Some(ConnectOutcome::Quit)),
            _ => Ok(None),
        }
    }
}
