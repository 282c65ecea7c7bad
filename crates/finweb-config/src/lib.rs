//! Configuration management for finweb
//!
//! This module handles loading, validation, and defaults of the
//! finweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Transaction backend connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the REST backend, without a trailing path
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds; no timeout when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

/// Page text and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Page heading
    #[serde(default = "default_title")]
    pub title: String,
    /// Symbol printed before every amount
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Decimal places for rendered totals
    #[serde(default = "default_decimal_places")]
    pub decimal_places: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            currency_symbol: default_currency_symbol(),
            decimal_places: default_decimal_places(),
        }
    }
}

fn default_title() -> String {
    "AI Financial Platform".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_decimal_places() -> usize {
    2
}

/// Legend placement understood by the charting library
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

impl std::fmt::Display for LegendPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LegendPosition::Top => write!(f, "top"),
            LegendPosition::Bottom => write!(f, "bottom"),
            LegendPosition::Left => write!(f, "left"),
            LegendPosition::Right => write!(f, "right"),
        }
    }
}

/// Chart colours and legend placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_income_color")]
    pub income_color: String,
    #[serde(default = "default_expense_color")]
    pub expense_color: String,
    #[serde(default = "default_pie_legend")]
    pub pie_legend: LegendPosition,
    #[serde(default = "default_bar_legend")]
    pub bar_legend: LegendPosition,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            income_color: default_income_color(),
            expense_color: default_expense_color(),
            pie_legend: default_pie_legend(),
            bar_legend: default_bar_legend(),
        }
    }
}

fn default_income_color() -> String {
    "#36A2EB".to_string()
}

fn default_expense_color() -> String {
    "#FF6384".to_string()
}

fn default_pie_legend() -> LegendPosition {
    LegendPosition::Bottom
}

fn default_bar_legend() -> LegendPosition {
    LegendPosition::Top
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter for env_logger: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Backend connection
    #[serde(default)]
    pub backend: BackendConfig,
    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Chart settings
    #[serde(default)]
    pub charts: ChartConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().into_owned(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        // An empty document is valid and means "all defaults"
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
                message: e.to_string(),
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        let base_url = self.backend.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "backend.base_url".to_string(),
                reason: "Base URL must start with http:// or https://".to_string(),
            });
        }

        if self.backend.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "backend.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0; remove it to disable".to_string(),
            });
        }

        if self.display.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "display.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        for (field, color) in [
            ("charts.income_color", &self.charts.income_color),
            ("charts.expense_color", &self.charts.expense_color),
        ] {
            if color.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "Colour must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Default configuration file contents
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Backend URL with any trailing slash removed
    pub fn backend_base_url(&self) -> &str {
        self.backend.base_url.trim().trim_end_matches('/')
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.backend.timeout_secs, None);
        assert_eq!(config.display.decimal_places, 2);
        assert_eq!(config.display.currency_symbol, "$");
        assert_eq!(config.charts.pie_legend, LegendPosition::Bottom);
        assert_eq!(config.charts.bar_legend, LegendPosition::Top);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8081");
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = "backend:\n  base_url: http://backend:5000/\n  timeout_secs: 5\ncharts:\n  pie_legend: right\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.backend_base_url(), "http://backend:5000");
        assert_eq!(config.backend.timeout_secs, Some(5));
        assert_eq!(config.charts.pie_legend, LegendPosition::Right);
        assert_eq!(config.charts.income_color, "#36A2EB");
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_generated_default_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("server: [1, 2").unwrap_err();
        assert_eq!(err.code(), error::ConfigErrorCode::InvalidYaml);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "server.port"
        ));

        let mut config = Config::default();
        config.backend.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.backend.timeout_secs = Some(0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.display.decimal_places = 11;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.charts.expense_color = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/definitely/not/here/config.yaml").unwrap_err();
        assert_eq!(err.code(), error::ConfigErrorCode::FileNotFound);
    }
}
