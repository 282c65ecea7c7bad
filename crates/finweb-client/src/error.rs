//! Error types for finweb-client

use finweb_core::ErrorSeverity;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientErrorCode {
    BackendUnreachable,
    BackendStatus,
    BackendPayload,
    BackendRejected,
    ClientSetup,
}

impl std::fmt::Display for ClientErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientErrorCode::BackendUnreachable => write!(f, "BACKEND_UNREACHABLE"),
            ClientErrorCode::BackendStatus => write!(f, "BACKEND_STATUS"),
            ClientErrorCode::BackendPayload => write!(f, "BACKEND_PAYLOAD"),
            ClientErrorCode::BackendRejected => write!(f, "BACKEND_REJECTED"),
            ClientErrorCode::ClientSetup => write!(f, "CLIENT_SETUP"),
        }
    }
}

/// Failures talking to the transaction backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Backend unreachable: {message}")]
    Network { message: String },

    #[error("Backend returned HTTP {status}")]
    Http { status: u16 },

    #[error("Unexpected backend response: {message}")]
    Parse { message: String },

    #[error("Backend rejected the transaction (status: {status})")]
    Rejected { status: String, message: Option<String> },

    #[error("Failed to build HTTP client: {message}")]
    Setup { message: String },
}

impl ClientError {
    pub fn code(&self) -> ClientErrorCode {
        match self {
            ClientError::Network { .. } => ClientErrorCode::BackendUnreachable,
            ClientError::Http { .. } => ClientErrorCode::BackendStatus,
            ClientError::Parse { .. } => ClientErrorCode::BackendPayload,
            ClientError::Rejected { .. } => ClientErrorCode::BackendRejected,
            ClientError::Setup { .. } => ClientErrorCode::ClientSetup,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ClientError::Rejected { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// HTTP status to report upstream
    pub fn http_status(&self) -> u16 {
        match self {
            ClientError::Rejected { .. } => 422,
            ClientError::Setup { .. } => 500,
            _ => 502,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ClientError::Http { status: status.as_u16() }
        } else if err.is_decode() {
            ClientError::Parse { message: err.to_string() }
        } else {
            ClientError::Network { message: err.to_string() }
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
