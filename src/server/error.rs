use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::verifier::VerifyError;

/// Failures that stop a request before it reaches the turn kernel.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    Verification(#[from] VerifyError),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
