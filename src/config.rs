use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Optional configuration file read from the working directory.
pub const CONFIG_FILE: &str = "astraview.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the backend serving `/api/tree-data` and `/api/details`.
    pub base_url: String,
    /// Per-request timeout applied to every backend call.
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Best-effort load: a missing or malformed file falls back to defaults
    /// with a log line, never an error.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => {
                    log::info!("Loaded configuration from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("Ignoring malformed {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::warn!("Configuration file not found, using defaults");
                Self::default()
            }
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
