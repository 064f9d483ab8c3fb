//! Error types for acctweb-core
//!
//! The listing transform itself never fails; these errors come from loading
//! data and from looking up a counterparty that does not exist.

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

use crate::types::Side;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Book not loaded
    NotLoaded,
    /// Counterparty not found
    CounterpartyNotFound,
    /// Data file not found
    FileNotFound,
    /// Data file could not be parsed
    ParseError,
    /// IO error
    IoError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NotLoaded => write!(f, "NOT_LOADED"),
            ErrorCode::CounterpartyNotFound => write!(f, "COUNTERPARTY_NOT_FOUND"),
            ErrorCode::FileNotFound => write!(f, "FILE_NOT_FOUND"),
            ErrorCode::ParseError => write!(f, "PARSE_ERROR"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        for suggestion in &self.suggestions {
            write!(f, "\n  - {}", suggestion)?;
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

/// Main error type for acctweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Book not loaded")]
    NotLoaded,

    #[error("{side} counterparty not found: {id}")]
    CounterpartyNotFound { side: Side, id: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("IO error occurred")]
    IoError,
}

impl CoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NotLoaded => ErrorCode::NotLoaded,
            CoreError::CounterpartyNotFound { .. } => ErrorCode::CounterpartyNotFound,
            CoreError::FileNotFound { .. } => ErrorCode::FileNotFound,
            CoreError::ParseError { .. } => ErrorCode::ParseError,
            CoreError::IoError => ErrorCode::IoError,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::NotLoaded => ErrorSeverity::Warning,
            CoreError::CounterpartyNotFound { .. } => ErrorSeverity::Info,
            CoreError::FileNotFound { .. } => ErrorSeverity::Error,
            CoreError::ParseError { .. } => ErrorSeverity::Error,
            CoreError::IoError => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::CounterpartyNotFound { side, id } => details
                .with_detail(serde_json::json!({ "side": side, "id": id }))
                .with_suggestion(format!(
                    "Use the /api/accounts/{} endpoint to list all {}.",
                    side,
                    side.counterparty_plural()
                )),
            CoreError::FileNotFound { path } => details
                .with_detail(serde_json::json!({ "path": path }))
                .with_suggestion("Check data.path in the config file.".to_string()),
            CoreError::ParseError { message } => details
                .with_detail(serde_json::json!({ "parse_message": message }))
                .with_suggestion(
                    "The data file needs `debit` and `credit` sections with `counterparties` and `transactions`.".to_string(),
                ),
            CoreError::NotLoaded => details
                .with_suggestion("POST /api/reload to load the book.".to_string()),
            _ => details,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<io::Error> for CoreError {
    fn from(_error: io::Error) -> Self {
        CoreError::IoError
    }
}

impl From<serde_yaml::Error> for CoreError {
    fn from(error: serde_yaml::Error) -> Self {
        CoreError::ParseError { message: error.to_string() }
    }
}
