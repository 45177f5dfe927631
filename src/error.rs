//! Error types for the library web front end

use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Backend request failed: {0}")]
    Backend(#[from] reqwest::Error),

    #[error("Backend returned {status} for {url}")]
    BackendStatus { status: u16, url: String },

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::Backend(_) | AppError::BackendStatus { .. } => "BackendFailure",
            AppError::BadRequest(_) => "BadRequest",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Backend(e) => {
                tracing::error!("Backend error: {:?}", e);
                (StatusCode::BAD_GATEWAY, "Backend unavailable".to_string())
            }
            AppError::BackendStatus { status, url } => {
                tracing::error!("Backend returned {} for {}", status, url);
                (StatusCode::BAD_GATEWAY, "Backend unavailable".to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(ErrorResponse {
            error: self.kind().to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
