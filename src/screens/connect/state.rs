use log::{debug, info};
use tui_input::Input;
use tui_logger::TuiWidgetState;

use super::types::ConnectScreen;
use crate::components::{Button, ButtonManager};

impl ConnectScreen {
    pub fn new(default_url: &str) -> Self {
        let mut button_manager = ButtonManager::new();
        button_manager.add_button(Button::new("connect", "Connect").with_hotkey('o'));
        button_manager.add_button(Button::new("quit", "Quit").with_hotkey('q'));

        let screen = Self {
            url_input: Input::default().with_value(default_url.to_string()),
            validation_error: None,
            connect_error: None,
            logger_widget_state: TuiWidgetState::new(),
            button_manager,
        };

        info!("astraview client initialized");
        info!("Enter the backend URL and press Enter to load the project tree");
        debug!("Button manager created with hotkeys");
        screen
    }

    /// Return to a clean slate while keeping the entered URL.
    pub fn reset(&mut self) {
        let url = self.get_url();
        self.url_input = Input::default().with_value(url);
        self.validation_error = None;
        self.connect_error = None;
    }
}
