use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::accounts::repo::StoreError;

/// Everything that can go wrong while handling a registration, mapped to a
/// deterministic HTTP status and a `{"error": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    Decode(String),
    #[error("password hashing failed")]
    Hash(anyhow::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Decode(detail) => {
                warn!(%detail, "rejecting malformed registration body");
                (StatusCode::BAD_REQUEST, format!("invalid request body: {detail}"))
            }
            ApiError::Hash(e) => {
                error!(error = %e, "password hashing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "registration failed".to_string(),
                )
            }
            ApiError::Store(StoreError::Duplicate) => {
                warn!("rejecting registration for an already taken username");
                (
                    StatusCode::CONFLICT,
                    "account already exists".to_string(),
                )
            }
            ApiError::Store(e) => {
                error!(error = %e, "account insert failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "registration failed".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
