use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// The application's error type.
///
/// Storage failures never appear here; the session store absorbs them.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AppError {
    /// A required field is missing or inconsistent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Registration with an email that is already registered.
    #[error("A user with this email already exists")]
    DuplicateUser,

    /// Login with no matching email/password pair.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Password reset for an email that is not registered.
    #[error("No account found for this email")]
    NotFound,

    /// An admin-only view requested without an admin session.
    #[error("Authorization failed")]
    Unauthorized,

    /// An internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(ref msg) => {
                tracing::debug!("Validation error: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }

            AppError::DuplicateUser => {
                tracing::debug!("Duplicate registration rejected");
                (StatusCode::CONFLICT, self.to_string())
            }

            AppError::InvalidCredentials => {
                tracing::warn!("Authentication failed");
                (StatusCode::UNAUTHORIZED, self.to_string())
            }

            AppError::NotFound => {
                tracing::debug!("Account not found");
                (StatusCode::NOT_FOUND, self.to_string())
            }

            AppError::Unauthorized => {
                tracing::warn!("Authorization failed");
                (StatusCode::FORBIDDEN, "Forbidden".to_string())
            }

            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = sonic_rs::to_string(&sonic_rs::json!({
            "success": false,
            "error": message
        }))
        .unwrap_or_else(|_| r#"{"success":false,"error":"Internal server error"}"#.to_string());

        (status, [(http::header::CONTENT_TYPE, "application/json")], body).into_response()
    }
}
