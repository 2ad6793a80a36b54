use crate::error::{ConfigError, CoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "trendtracker.toml";
pub const DEFAULT_LOG_FILTER: &str = "trendtracker=debug,gui=debug,trends_client=debug";
pub const MIN_WINDOW_WIDTH: f32 = 800.0;
pub const MIN_WINDOW_HEIGHT: f32 = 600.0;

/// Startup settings for the dashboard, read from an optional TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Host the dashboard runs against; selects the backend base URL.
    pub host: String,
    pub log_filter: String,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            window: WindowConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, CoreError> {
        let config: DashboardConfig = toml::from_str(contents).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "host must not be empty".to_string(),
            });
        }
        if self.window.width < MIN_WINDOW_WIDTH {
            return Err(ConfigError::InvalidValue {
                field: "window.width".to_string(),
                value: self.window.width.to_string(),
            });
        }
        if self.window.height < MIN_WINDOW_HEIGHT {
            return Err(ConfigError::InvalidValue {
                field: "window.height".to_string(),
                value: self.window.height.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = DashboardConfig::from_toml_str("host = \"dashboard.example.com\"").unwrap();
        assert_eq!(config.host, "dashboard.example.com");
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_window_section() {
        let config = DashboardConfig::from_toml_str("[window]\nwidth = 900.0\nheight = 700.0").unwrap();
        assert_eq!(config.window.width, 900.0);
        assert_eq!(config.host, "localhost");
    }

    #[test]
    fn test_validation_rejects_empty_host() {
        let result = DashboardConfig::from_toml_str("host = \"  \"");
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::ValidationFailed { .. }))
        ));
    }

    #[test]
    fn test_validation_rejects_zero_window() {
        let result = DashboardConfig::from_toml_str("[window]\nwidth = 0.0");
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_validation_rejects_window_below_minimum() {
        let result = DashboardConfig::from_toml_str("[window]\nwidth = 640.0\nheight = 700.0");
        match result {
            Err(CoreError::Config(ConfigError::InvalidValue { field, value })) => {
                assert_eq!(field, "window.width");
                assert_eq!(value, "640");
            }
            other => panic!("unexpected result {:?}", other),
        }

        let result = DashboardConfig::from_toml_str("[window]\nheight = 599.0");
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::InvalidValue { field, .. })) if field == "window.height"
        ));

        let at_minimum = DashboardConfig::from_toml_str("[window]\nwidth = 800.0\nheight = 600.0");
        assert!(at_minimum.is_ok());
    }

    #[test]
    fn test_malformed_toml() {
        let result = DashboardConfig::from_toml_str("host = ");
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = DashboardConfig::load("/nonexistent/trendtracker.toml").unwrap();
        assert_eq!(config, DashboardConfig::default());
    }
}
