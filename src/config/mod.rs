#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use toml_config::AppConfig;

/// Environment variable holding the registration service base URL.
pub const API_URL_ENV: &str = "TEDX_API_URL";

/// Origin used when no base URL is configured, so `/register` stays relative to it.
pub const DEFAULT_ORIGIN: &str = "http://localhost:4000";

pub const REGISTER_PATH: &str = "/register";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub json_logs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:4000".to_string(),
            json_logs: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the registration service; empty means [`DEFAULT_ORIGIN`].
    pub api_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// `api_url` without surrounding whitespace or trailing slashes.
    pub fn base_url(&self) -> &str {
        self.api_url.trim().trim_end_matches('/')
    }

    pub fn register_url(&self) -> String {
        let base = self.base_url();
        if base.is_empty() {
            format!("{}{}", DEFAULT_ORIGIN, REGISTER_PATH)
        } else {
            format!("{}{}", base, REGISTER_PATH)
        }
    }
}

/// The event printed on every pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    pub title: String,
    pub tagline: String,
    pub starts_at: NaiveDateTime,
    pub venue: String,
    pub category: String,
    /// Local logo image; the built-in wordmark is drawn when unset.
    pub logo_path: Option<PathBuf>,
}

impl Default for EventConfig {
    fn default() -> Self {
        let starts_at = chrono::NaiveDate::from_ymd_opt(2025, 8, 6)
            .and_then(|date| date.and_hms_opt(18, 0, 0))
            .unwrap_or_default();

        Self {
            title: "TEDx Community Talk".to_string(),
            tagline: "Ideas Change Everything".to_string(),
            starts_at,
            venue: "University Auditorium".to_string(),
            category: "Student Community Event".to_string(),
            logo_path: None,
        }
    }
}

impl EventConfig {
    /// e.g. "August 6, 2025 • 6:00 PM"
    pub fn schedule_line(&self) -> String {
        self.starts_at.format("%B %-d, %Y • %-I:%M %p").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: String,
    /// Fixes the decorative code pattern; random per render when unset.
    pub pattern_seed: Option<u64>,
    pub pixels_per_mm: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: "./passes".to_string(),
            pattern_seed: None,
            pixels_per_mm: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_url_resolves_against_default_origin() {
        let config = ClientConfig::default();
        assert_eq!(config.register_url(), "http://localhost:4000/register");
    }

    #[test]
    fn api_url_trailing_slash_is_ignored() {
        let config = ClientConfig::with_api_url("https://tedx.example.com/api/");
        assert_eq!(config.register_url(), "https://tedx.example.com/api/register");
    }

    #[test]
    fn default_schedule_line_matches_event() {
        assert_eq!(
            EventConfig::default().schedule_line(),
            "August 6, 2025 • 6:00 PM"
        );
    }
}
