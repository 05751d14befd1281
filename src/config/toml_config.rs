use crate::config::{ClientConfig, EventConfig, ExportConfig, ServerConfig, API_URL_ENV};
use crate::utils::error::{PassError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_socket_addr, validate_url,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full application configuration, one TOML table per concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub event: EventConfig,
    pub export: ExportConfig,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PassError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Defaults, then the optional file, then `TEDX_API_URL`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        if let Ok(api_url) = std::env::var(API_URL_ENV) {
            tracing::debug!("Using API URL from {}", API_URL_ENV);
            self.client.api_url = api_url;
        }
    }

    /// 替換環境變數 (例如 ${API_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PassError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_socket_addr("server.bind", &self.server.bind)?;
        validate_url("client.api_url", self.client.base_url(), true)?;
        validate_range("client.timeout_secs", self.client.timeout_secs, 1, 300)?;
        validate_non_empty_string("event.title", &self.event.title)?;
        validate_non_empty_string("event.venue", &self.event.venue)?;
        validate_path("export.output_dir", &self.export.output_dir)?;
        validate_range("export.pixels_per_mm", self.export.pixels_per_mm, 1, 16)?;

        if let Some(logo) = &self.event.logo_path {
            validate_path("event.logo_path", &logo.to_string_lossy())?;
        }

        Ok(())
    }
}
