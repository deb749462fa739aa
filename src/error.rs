use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Every handler failure maps into one of these; nothing else reaches the
/// transport layer. Recoverable conditions surface as 4xx with a readable
/// message, everything unexpected becomes a generic 500 (internals are
/// logged server-side only).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: insufficient rights")]
    Forbidden,

    /// Uniform message whether the account is missing or the password is
    /// wrong, so login attempts learn nothing about registered emails.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Also returned when a resource exists but is not owned by the caller,
    /// so mutation endpoints leak no ownership information.
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Server error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Server error")]
    Io(#[from] std::io::Error),

    #[error("Server error")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::InvalidCredentials => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Io(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Database(e) => tracing::error!("database error: {e}"),
            ApiError::Io(e) => tracing::error!("io error: {e}"),
            ApiError::Internal(msg) => tracing::error!("internal error: {msg}"),
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "message": self.to_string(),
        }))
    }
}
