#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_one_of, validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SERVICE_BASE_URL: &str = "http://localhost:8080";

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 合併 CLI、環境變數與 TOML 後的最終設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub log_level: Option<String>,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: None,
            log_level: None,
        }
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_BASE_URL)
    }
}

impl ConfigProvider for ServiceConfig {
    fn service_base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_url("service_base_url", &self.base_url)?;

        if let Some(seconds) = self.timeout_seconds {
            validate_positive_number("timeout_seconds", seconds, 1)?;
        }

        if let Some(level) = &self.log_level {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_service() {
        let config = ServiceConfig::default();
        assert_eq!(config.service_base_url(), "http://localhost:8080");
        assert_eq!(config.timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timeout_conversion() {
        let config = ServiceConfig::default().with_timeout_seconds(3);
        assert_eq!(config.timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(ServiceConfig::new("not a url").validate().is_err());
        assert!(ServiceConfig::default()
            .with_timeout_seconds(0)
            .validate()
            .is_err());

        let mut config = ServiceConfig::default();
        config.log_level = Some("chatty".to_string());
        assert!(config.validate().is_err());
    }
}
