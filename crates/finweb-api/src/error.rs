//! Error types for finweb-api

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use finweb_client::ClientError;
use finweb_core::{CoreError, ErrorSeverity};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error(transparent)]
    Backend(#[from] ClientError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest { message: message.into() }
    }

    pub fn code(&self) -> String {
        match self {
            ApiError::BadRequest { .. } => "BAD_REQUEST".to_string(),
            ApiError::Invalid(e) => e.code().to_string(),
            ApiError::Backend(e) => e.code().to_string(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ApiError::BadRequest { .. } => ErrorSeverity::Info,
            ApiError::Invalid(e) => e.severity(),
            ApiError::Backend(e) => e.severity(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } | ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::Backend(e) => {
                StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.severity() {
            ErrorSeverity::Error => log::error!("[{}] {}", self.code(), self),
            ErrorSeverity::Warning => log::warn!("[{}] {}", self.code(), self),
            ErrorSeverity::Info => log::info!("[{}] {}", self.code(), self),
        }

        let body = json!({
            "success": false,
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        });
        (self.status(), Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = ApiError::from(CoreError::InvalidAmount { value: "abc".to_string() });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "INVALID_AMOUNT");

        let err = ApiError::from(ClientError::Network { message: "refused".to_string() });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.severity(), ErrorSeverity::Error);

        let err = ApiError::from(ClientError::Rejected { status: "error".to_string(), message: None });
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
