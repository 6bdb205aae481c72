use once_cell::sync::Lazy;
use regex::Regex;
use tui_input::Input;
use tui_logger::TuiWidgetState;

use crate::api::ApiClient;
use crate::components::ButtonManager;
use crate::model::TreeItem;

/// What the connect screen hands back to the application shell.
pub enum ConnectOutcome {
    Connected {
        api: ApiClient,
        tree: Vec<TreeItem>,
    },
    Quit,
}

pub struct ConnectScreen {
    pub url_input: Input,
    pub validation_error: Option<String>,
    /// Last failed connection attempt, shown inline until the next try.
    pub connect_error: Option<String>,

    // Logger widget state
    pub logger_widget_state: TuiWidgetState,

    // Button management
    pub button_manager: ButtonManager,
}

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    regex::RegexBuilder::new(r"^https?://([a-zA-Z0-9.-]+|\d{1,3}(\.\d{1,3}){3})(:\d{1,5})?/?$")
        .case_insensitive(true)
        .build()
        .expect("Invalid regex pattern")
});

impl ConnectScreen {
    pub fn validate_url(&mut self) {
        let url = self.url_input.value();

        if url.is_empty() {
            self.validation_error = Some("Backend URL cannot be empty".to_string());
            return;
        }

        if URL_REGEX.is_match(url) {
            self.validation_error = None;
        } else {
            self.validation_error = Some(
                "Invalid URL format. Expected: http://hostname:port or https://hostname:port"
                    .to_string(),
            );
        }
    }

    pub fn get_url(&self) -> String {
        self.url_input.value().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https_hosts() {
        for url in [
            "http://localhost:8080",
            "https://plant-server",
            "HTTP://10.0.0.5:9000/",
        ] {
            assert!(URL_REGEX.is_match(url), "should accept {url}");
        }
    }

    #[test]
    fn rejects_foreign_schemes_and_garbage() {
        for url in ["opc.tcp://localhost:4840", "localhost:8080", "http://"] {
            assert!(!URL_REGEX.is_match(url), "should reject {url}");
        }
    }
}
