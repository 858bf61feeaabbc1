use axum::{http::StatusCode, response::{IntoResponse, Response}};
use serde_json::json;

/// Failure category a handler reports to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerErrorKind {
    Unauthorized,
    NotFound,
    Internal,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::Unauthorized => "Unauthorized",
            HandlerErrorKind::NotFound => "NotFound",
            HandlerErrorKind::Internal => "Internal",
        };
        write!(f, "{}", s)
    }
}

/// Body layout of an error response.
///
/// The login and setup routes answer `{"success": false, "message": ...}`
/// while the student-management routes answer a bare `{"message": ...}`.
/// The asymmetry is part of the wire contract and kept on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorEnvelope {
    Flagged,
    Bare,
}

#[derive(Debug)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
    pub envelope: ErrorEnvelope,
}

impl HandlerError {
    /// An error on the login/setup surface: `{"success": false, "message"}`.
    pub fn auth(error: HandlerErrorKind, message: impl Into<String>) -> Self {
        HandlerError { error, message: message.into(), envelope: ErrorEnvelope::Flagged }
    }

    /// An error on the student-management surface: always a 500 with a
    /// bare `{"message"}` body, whatever actually went wrong.
    pub fn management(message: impl Into<String>) -> Self {
        HandlerError {
            error: HandlerErrorKind::Internal,
            message: message.into(),
            envelope: ErrorEnvelope::Bare,
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = match self.error {
            HandlerErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            HandlerErrorKind::NotFound => StatusCode::NOT_FOUND,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = match self.envelope {
            ErrorEnvelope::Flagged => json!({ "success": false, "message": self.message }),
            ErrorEnvelope::Bare => json!({ "message": self.message }),
        };
        (status, axum::Json(body)).into_response()
    }
}

/// Errors surfaced by the service layer. Messages here are for operators;
/// handlers translate variants into the fixed client-facing bodies.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Invalid Credentials: {0}")]
    InvalidCredentials(String),
    #[error("Internal Error: {0}")]
    Internal(String),
}

impl From<crate::repository::repository_error::RepositoryError> for ServiceError {
    fn from(err: crate::repository::repository_error::RepositoryError) -> Self {
        use crate::repository::repository_error::RepositoryError;
        match err {
            RepositoryError::NotFound(msg) => ServiceError::NotFound(msg),
            RepositoryError::AlreadyExists(msg) => ServiceError::Internal(msg),
            RepositoryError::DatabaseError(msg) => ServiceError::Internal(msg),
            RepositoryError::ConnectionError(msg) => ServiceError::Internal(msg),
            RepositoryError::SerializationError(msg) => ServiceError::Internal(msg),
        }
    }
}
