use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::{
    response::{ApiResponse, Meta},
    storage::StorageError,
    store::StoreError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    /// Operation refused against the last-known snapshot (stock exhausted,
    /// nothing to export).
    #[error("{0}")]
    Warning(String),

    #[error("Invalid credentials!")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Remote operation failed")]
    Remote(#[from] StoreError),

    #[error("Local storage error")]
    Storage(#[from] StorageError),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warning,
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
    level: Level,
}

impl AppError {
    pub fn level(&self) -> Level {
        match self {
            AppError::Warning(_) => Level::Warning,
            _ => Level::Error,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Warning(_) => (StatusCode::CONFLICT, self.to_string()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::Remote(err) => {
                tracing::error!(error = %err, "remote operation failed");
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            AppError::Storage(err) => {
                tracing::error!(error = %err, "local storage failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = ApiResponse {
            message,
            data: Some(ErrorData {
                error: self.to_string(),
                level: self.level(),
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
