use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::entities::query::DEFAULT_PAGE_SIZE;
use crate::infra::http::client::ApiConfig;

pub const ENV_API_URL: &str = "HR_ADMIN_API_URL";
pub const ENV_PAGE_SIZE: &str = "HR_ADMIN_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("api_base_url must not be empty")]
    EmptyApiUrl,
    #[error("page_size must be greater than zero")]
    ZeroPageSize,
    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub page_size: usize,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            request_timeout_secs: 15,
            page_size: DEFAULT_PAGE_SIZE,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(text).context("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(value) = lookup(ENV_PAGE_SIZE) {
            self.page_size = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv {
                    key: ENV_PAGE_SIZE,
                    value: value.clone(),
                })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(())
    }

    pub fn api(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "hradmin", "hr-admin")
        .ok_or_else(|| anyhow!("unable to resolve config directory"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.json"))
}

/// A missing file means defaults; a malformed one is an error.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    AppConfig::from_json(&text).with_context(|| format!("invalid config: {}", path.display()))
}

pub fn load_config() -> Result<AppConfig> {
    let config = load_config_from(&default_config_path()?)?;
    Ok(config.apply_env(|key| std::env::var(key).ok())?)
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}
