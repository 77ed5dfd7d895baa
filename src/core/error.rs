use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::modules::store::StoreError;
use crate::shared::constants::error_codes;
use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Not found, with a code telling the client which resource was missing
    #[error("Not found ({code}): {message}")]
    NotFoundCode { code: &'static str, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// Business rule rejected the request; `code` tells the client which one
    #[error("Conflict ({code}): {message}")]
    Conflict { code: &'static str, message: String },

    /// Well-formed request with a value the business rules reject
    #[error("Invalid ({code}): {message}")]
    Invalid { code: &'static str, message: String },

    /// Retryable: the store could not grant a lock in time
    #[error("Busy: {0}")]
    Busy(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Request timed out")]
    RequestTimeout,
}

impl AppError {
    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        AppError::Conflict {
            code,
            message: message.into(),
        }
    }

    pub fn not_found_code(code: &'static str, message: impl Into<String>) -> Self {
        AppError::NotFoundCode {
            code,
            message: message.into(),
        }
    }

    pub fn invalid(code: &'static str, message: impl Into<String>) -> Self {
        AppError::Invalid {
            code,
            message: message.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Busy(msg) => AppError::Busy(msg),
            StoreError::Unavailable(msg) => AppError::ServiceUnavailable(msg),
            StoreError::UniqueViolation(constraint) => AppError::conflict(
                error_codes::DUPLICATE,
                format!("Record already exists ({})", constraint),
            ),
            StoreError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::NotFoundCode { code, ref message } => (
                StatusCode::NOT_FOUND,
                message.clone(),
                Some(vec![code.to_string()]),
            ),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Conflict { code, ref message } => (
                StatusCode::CONFLICT,
                message.clone(),
                Some(vec![code.to_string()]),
            ),
            AppError::Invalid { code, ref message } => (
                StatusCode::BAD_REQUEST,
                message.clone(),
                Some(vec![code.to_string()]),
            ),
            AppError::Busy(ref msg) => {
                tracing::warn!("Store busy: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "The task is busy, please retry".to_string(),
                    Some(vec![error_codes::BUSY.to_string()]),
                )
            }
            AppError::ServiceUnavailable(ref msg) => {
                tracing::error!("Store unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service temporarily unavailable".to_string(),
                    Some(vec![error_codes::UNAVAILABLE.to_string()]),
                )
            }
            AppError::RequestTimeout => (
                StatusCode::REQUEST_TIMEOUT,
                "Request timed out".to_string(),
                Some(vec![error_codes::TIMEOUT.to_string()]),
            ),
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
