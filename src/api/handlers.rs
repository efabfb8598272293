use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::{ProcessRequest, ProcessResponse};
use crate::api::routes::AppState;
use crate::error::AppError;

pub const LIVENESS_MESSAGE: &str = "Gemini Proxy Service is Running.";

pub async fn process(
    State(state): State<Arc<AppState>>,
    request: Result<Json<ProcessRequest>, JsonRejection>,
) -> Result<Json<ProcessResponse>, AppError> {
    // Unreadable bodies are treated like a missing prompt
    let prompt = match request {
        Ok(Json(request)) => request.prompt.unwrap_or_default(),
        Err(rejection) => {
            tracing::debug!("Unreadable request body: {}", rejection);
            String::new()
        }
    };

    let outcome = state.relay.handle(&prompt).await?;

    Ok(Json(outcome.into()))
}

pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
            (header::ACCESS_CONTROL_MAX_AGE, "3600"),
        ],
    )
}

pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, LIVENESS_MESSAGE)
}
