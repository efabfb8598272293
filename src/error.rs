use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::gemini::ProviderError;

/// Failures reported to the caller. Messages are fixed; provider details stay
/// in the server log.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Requires a \"prompt\" in the body.")]
    MissingPrompt,

    #[error("Server configuration error: API Key not set.")]
    ApiKeyNotSet,

    #[error("An error occurred during text generation.")]
    TextGeneration(#[source] ProviderError),

    #[error("Gemini failed to generate text content.")]
    EmptyText,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingPrompt => StatusCode::BAD_REQUEST,
            AppError::ApiKeyNotSet | AppError::TextGeneration(_) | AppError::EmptyText => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::MissingPrompt => tracing::debug!("Rejected request: {}", self),
            AppError::TextGeneration(source) => {
                tracing::error!(stage = "text_generation", error = %source, "Gemini text API error")
            }
            _ => tracing::error!("Request failed: {}", self),
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
