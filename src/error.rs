use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::analysis::ValidationError;
use crate::llm::LlmError;

/// Errors surfaced to HTTP callers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(#[from] ValidationError),
    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),
    #[error("OpenAI API error: {0}")]
    Upstream(#[from] LlmError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(json!({
                "detail": self.to_string(),
                "success": false
            })),
        )
            .into_response()
    }
}
