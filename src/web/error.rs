use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Password hashing failed: {0}")]
    PasswordHashingError(String),
    #[error("JWT creation failed: {0}")]
    TokenCreationError(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::PasswordHashingError(_)
            | AppError::TokenCreationError(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Server-side details stay in the log.
        let message = if status.is_server_error() {
            error!(error = %self, "Request failed with an internal error.");
            "Internal server error".to_string()
        } else {
            match self {
                AppError::InvalidCredentials => "Invalid credentials".to_string(),
                AppError::InvalidInput(msg)
                | AppError::Unauthorized(msg)
                | AppError::Forbidden(msg)
                | AppError::NotFound(msg)
                | AppError::Conflict(msg) => msg,
                other => other.to_string(),
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                AppError::Conflict(format!("A record with these values already exists: {detail}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                AppError::InvalidInput(format!("Referenced record does not exist: {detail}"))
            }
            _ => match err {
                DbErr::RecordNotFound(msg) => AppError::NotFound(msg),
                DbErr::RecordNotUpdated => AppError::NotFound("Record not found".to_string()),
                other => AppError::DatabaseError(other.to_string()),
            },
        }
    }
}
