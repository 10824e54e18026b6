use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use axum::http::StatusCode;
use axum::Json;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    timestamp: String,
    status: u16,
    error: String,
    message: String,
    #[serde(rename = "errorCode")]
    error_code: ErrorCode,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Authentication & Authorization
    InvalidCredentials,
    InsufficientPermissions,

    // Uniqueness conflicts
    ConflictingResource,

    // Missing rows
    ContentNotFound,

    // General API & Validation Errors
    ValidationError,
    ServiceUnavailable,
    UnexpectedError,
}

#[derive(Debug)]
pub struct HttpError {
    pub status_code: StatusCode,
    pub error_code: ErrorCode,
    pub message: String,
}

impl HttpError {
    pub fn new(status_code: StatusCode, error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code,
            error_code,
            message: message.into(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        tracing::error!("An error occurred: status={}, code={:?}, msg='{}'", self.status_code, self.error_code, self.message);

        let status = self.status_code;

        let error_response = ErrorResponse {
            timestamp: Utc::now().to_rfc3339(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            message: self.message.clone(),
            error_code: self.error_code,
        };

        (status, Json(error_response)).into_response()
    }
}

/// Service-level failure taxonomy. Everything the store throws that isn't a
/// missing row stays opaque in `DatabaseError` and surfaces as a 500 with no
/// retry and no classification.
pub enum AppError {
    ValidationError(String),

    /// Duplicate email/username.
    Conflict(String),

    /// Bad credentials, invalid/expired/missing token, wrong current password.
    Unauthorized(String),

    /// Actor is not a participant of the conversation.
    Forbidden(String),

    /// A requested user/talent/conversation row is absent.
    NotFound(String),

    DatabaseError(Box<dyn Error + Send + Sync>),

    /// Internal failure while encoding/decoding or hashing.
    ProcessingError(String),
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationError(msg) => write!(f, "ValidationError: {}", msg),
            Self::Conflict(msg) => write!(f, "Conflict: {}", msg),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            Self::NotFound(msg) => write!(f, "NotFound: {}", msg),
            Self::DatabaseError(err) => write!(f, "DatabaseError: {}", err),
            Self::ProcessingError(msg) => write!(f, "ProcessingError: {}", msg),
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Invalid input: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Entity not found: {}", msg),
            AppError::DatabaseError(err) => write!(f, "A database error occurred: {}", err),
            AppError::ProcessingError(msg) => write!(f, "A processing error occurred: {}", msg),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> AppError {
        AppError::DatabaseError(Box::new(err))
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::DatabaseError(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let http_error = match self {
            AppError::ValidationError(msg) => {
                HttpError::new(StatusCode::BAD_REQUEST, ErrorCode::ValidationError, msg)
            }
            AppError::Conflict(msg) => {
                HttpError::new(StatusCode::CONFLICT, ErrorCode::ConflictingResource, msg)
            }
            AppError::Unauthorized(msg) => {
                HttpError::new(StatusCode::UNAUTHORIZED, ErrorCode::InvalidCredentials, msg)
            }
            AppError::Forbidden(msg) => {
                HttpError::new(StatusCode::FORBIDDEN, ErrorCode::InsufficientPermissions, msg)
            }
            AppError::NotFound(msg) => {
                HttpError::new(StatusCode::NOT_FOUND, ErrorCode::ContentNotFound, msg)
            }
            AppError::DatabaseError(internal_err) => {
                tracing::error!("Database error: {:?}", internal_err);
                HttpError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::ServiceUnavailable,
                    "Internal service outage."
                )
            }
            AppError::ProcessingError(msg) => {
                tracing::error!("Intern processing error: {}", msg);
                HttpError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::UnexpectedError,
                    "Unexpected server error processing."
                )
            }
        };

        http_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status_codes() {
        let cases = [
            (AppError::ValidationError("v".into()), StatusCode::BAD_REQUEST),
            (AppError::Conflict("c".into()), StatusCode::CONFLICT),
            (AppError::Unauthorized("u".into()), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden("f".into()), StatusCode::FORBIDDEN),
            (AppError::NotFound("n".into()), StatusCode::NOT_FOUND),
            (AppError::ProcessingError("p".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn store_errors_stay_opaque() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
