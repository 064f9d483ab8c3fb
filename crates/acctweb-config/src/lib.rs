//! Configuration management for acctweb
//!
//! This module handles loading, validation, and management of
//! acctweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigErrorCode, ConfigErrorDetails, ConfigErrorSeverity, ConfigResult};

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
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Data source configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DataConfig {
    /// YAML file with counterparties and transactions; built-in sample data when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Page sizes the listing screens can offer
pub const PAGE_SIZE_CHOICES: [usize; 3] = [10, 25, 50];

/// Upper bound on the number of page links in the pagination bar
pub const MAX_PAGE_WINDOW: usize = 5;

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page sizes offered by the size selector
    #[serde(default = "default_page_sizes")]
    pub page_sizes: Vec<usize>,
    /// Page size used when none (or an unknown one) is requested
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Maximum number of page links shown around the current page
    #[serde(default = "default_page_window")]
    pub page_window: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_sizes: default_page_sizes(),
            default_page_size: default_page_size(),
            page_window: default_page_window(),
        }
    }
}

fn default_page_sizes() -> Vec<usize> {
    PAGE_SIZE_CHOICES.to_vec()
}

fn default_page_size() -> usize {
    10
}

fn default_page_window() -> usize {
    MAX_PAGE_WINDOW
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Currency code shown next to every amount
    #[serde(default = "default_currency")]
    pub code: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
    /// Decimal separator
    #[serde(default = "default_decimal_sep")]
    pub decimal_separator: String,
    /// Currency symbol position ("before" or "after")
    #[serde(default)]
    pub symbol_position: SymbolPosition,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: default_currency(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_sep(),
            decimal_separator: default_decimal_sep(),
            symbol_position: SymbolPosition::Before,
        }
    }
}

fn default_currency() -> String {
    "AED".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_sep() -> String {
    ",".to_string()
}

fn default_decimal_sep() -> String {
    ".".to_string()
}

/// Currency symbol position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    #[default]
    Before,
    After,
}

impl std::str::FromStr for SymbolPosition {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "before" => Ok(SymbolPosition::Before),
            "after" => Ok(SymbolPosition::After),
            _ => Err(format!("Invalid symbol position: {}", s)),
        }
    }
}

impl std::fmt::Display for SymbolPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolPosition::Before => write!(f, "before"),
            SymbolPosition::After => write!(f, "after"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
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

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data source settings
    #[serde(default)]
    pub data: DataConfig,
    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError,
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|_| ConfigError::InvalidYaml)?;

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

        let pagination = &self.pagination;
        if pagination.page_sizes.is_empty() {
            return Err(ConfigError::MissingField {
                field: "pagination.page_sizes".to_string(),
            });
        }
        if let Some(size) = pagination.page_sizes.iter().find(|s| !PAGE_SIZE_CHOICES.contains(s)) {
            return Err(ConfigError::InvalidValue {
                field: "pagination.page_sizes".to_string(),
                reason: format!("Page size {} is not one of {:?}", size, PAGE_SIZE_CHOICES),
            });
        }
        if !pagination.page_sizes.contains(&pagination.default_page_size) {
            return Err(ConfigError::InvalidValue {
                field: "pagination.default_page_size".to_string(),
                reason: format!(
                    "Default page size {} is not one of {:?}",
                    pagination.default_page_size, pagination.page_sizes
                ),
            });
        }
        if pagination.page_window == 0 || pagination.page_window > MAX_PAGE_WINDOW {
            return Err(ConfigError::InvalidValue {
                field: "pagination.page_window".to_string(),
                reason: format!("Page window must be between 1 and {}", MAX_PAGE_WINDOW),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!("Unknown log level '{}', expected one of {:?}", self.logging.level, LOG_LEVELS),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.pagination.page_sizes, vec![10, 25, 50]);
        assert_eq!(config.pagination.default_page_size, 10);
        assert_eq!(config.pagination.page_window, 5);
        assert_eq!(config.currency.code, "AED");
        assert!(config.data.path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("server:\n  port: 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.pagination.default_page_size, 10);
    }

    #[test]
    fn test_bundled_default_config_is_valid() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.pagination.page_sizes, vec![10, 25, 50]);
        assert_eq!(config.currency.symbol_position, SymbolPosition::Before);
    }

    #[test]
    fn test_default_page_size_must_be_allowed() {
        let yaml = "pagination:\n  page_sizes: [10, 25]\n  default_page_size: 50\n";
        let err = Config::from_yaml(yaml).unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidValue);
    }

    #[test]
    fn test_rejects_port_zero_and_bad_window() {
        let err = Config::from_yaml("server:\n  port: 0\n").unwrap_err();
        assert!(err.to_string().contains("server.port"));

        let err = Config::from_yaml("pagination:\n  page_window: 0\n").unwrap_err();
        assert!(err.to_string().contains("pagination.page_window"));
    }

    #[test]
    fn test_rejects_wide_window_and_unknown_sizes() {
        let err = Config::from_yaml("pagination:\n  page_window: 9\n").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidValue);
        assert!(err.to_string().contains("pagination.page_window"));

        let yaml = "pagination:\n  page_window: 9\n  page_sizes: [3, 7]\n  default_page_size: 3\n";
        assert!(Config::from_yaml(yaml).is_err());

        let yaml = "pagination:\n  page_sizes: [3, 7]\n  default_page_size: 3\n";
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("pagination.page_sizes"));
    }

    #[test]
    fn test_accepts_subset_of_page_sizes() {
        let yaml = "pagination:\n  page_sizes: [25, 50]\n  default_page_size: 25\n  page_window: 3\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.pagination.page_sizes, vec![25, 50]);
        assert_eq!(config.pagination.page_window, 3);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("server: [").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidYaml);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/nonexistent/acctweb.yaml").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::FileNotFound);
    }

    #[test]
    fn test_symbol_position_from_str() {
        assert_eq!("After".parse::<SymbolPosition>(), Ok(SymbolPosition::After));
        assert!("middle".parse::<SymbolPosition>().is_err());
    }
}
