//! Configuration loading and management

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::core::query::DEFAULT_PAGE_SIZE;

/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "LESSONHUB_API_URL";

/// Environment variable overriding the listing page size.
pub const ENV_PAGE_SIZE: &str = "LESSONHUB_PAGE_SIZE";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the backend API, without trailing slash.
    pub api_base_url: String,

    /// Page size for listing pages.
    pub page_size: usize,

    /// Timeout for individual API requests.
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validated()
    }

    /// Defaults plus environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validated()
    }

    /// Apply overrides from a key lookup (the environment in production,
    /// a closure in tests).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(size) = lookup(ENV_PAGE_SIZE)
            && let Ok(size) = size.parse::<usize>()
        {
            self.page_size = size;
        }
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be positive".into()));
        }
        if self.api_base_url.is_empty() {
            return Err(ConfigError::Invalid("api_base_url must be set".into()));
        }
        Ok(self)
    }
}
