use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::store::StoreError;

#[derive(Debug)]
pub enum AppError {
    MissingId,
    InvalidId(String),
    InvalidFunder(u64),
    MalformedBody(String),
    AmountOverflow(u64),
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingId => write!(f, "Missing id query param."),
            AppError::InvalidId(raw) => write!(f, "Invalid id query param: {}.", raw),
            AppError::InvalidFunder(id) => write!(f, "ID {}: the funder is invalid.", id),
            AppError::MalformedBody(msg) => write!(f, "Malformed request body: {}", msg),
            AppError::AmountOverflow(id) => write!(f, "ID {}: amount would overflow.", id),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Request bodies are the only thing parsed with serde_json at runtime
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedBody(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) | StoreError::IndexMismatch(id) => AppError::InvalidFunder(id),
            StoreError::AmountOverflow(id) => AppError::AmountOverflow(id),
        }
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingId => StatusCode::BAD_REQUEST,
            AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidFunder(_) => StatusCode::BAD_REQUEST,
            AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::AmountOverflow(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
