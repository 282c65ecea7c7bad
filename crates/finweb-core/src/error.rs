//! Error types for finweb-core
//!
//! The aggregation pipeline itself never fails; these errors come from
//! coercing user input (the add-transaction form) into typed values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidType,
    InvalidAmount,
    InvalidDate,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::InvalidType => write!(f, "INVALID_TYPE"),
            ErrorCode::InvalidAmount => write!(f, "INVALID_AMOUNT"),
            ErrorCode::InvalidDate => write!(f, "INVALID_DATE"),
        }
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

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for finweb-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid transaction type: '{value}' (expected income or expense)")]
    InvalidType { value: String },

    #[error("Invalid amount: '{value}'")]
    InvalidAmount { value: String },

    #[error("Invalid date: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { value: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::InvalidType { .. } => ErrorCode::InvalidType,
            CoreError::InvalidAmount { .. } => ErrorCode::InvalidAmount,
            CoreError::InvalidDate { .. } => ErrorCode::InvalidDate,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        // All of these are user input mistakes
        ErrorSeverity::Info
    }

    /// Name of the form field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            CoreError::InvalidType { .. } => "type",
            CoreError::InvalidAmount { .. } => "amount",
            CoreError::InvalidDate { .. } => "date",
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;
