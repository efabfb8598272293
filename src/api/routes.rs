use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use super::handlers;
use crate::relay::Relay;

pub struct AppState {
    pub relay: Relay,
}

/// `/process` is the standalone-server entry point; `POST /` serves the
/// single-function deployment shape with the same handler.
pub fn create_router(state: Arc<AppState>) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ));

    Router::new()
        .route(
            "/",
            get(handlers::health)
                .post(handlers::process)
                .options(handlers::preflight),
        )
        .route(
            "/process",
            post(handlers::process).options(handlers::preflight),
        )
        .layer(middleware)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::{SpeechProvider, SpeechSynthesis};
    use crate::relay::tests::StubProvider;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::atomic::Ordering;
    use tower::ServiceExt;

    fn app_with(provider: Option<Arc<StubProvider>>) -> Router {
        let provider = provider.map(|p| p as Arc<dyn SpeechProvider>);
        create_router(Arc::new(AppState {
            relay: Relay::new(provider),
        }))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
        (status, headers, body)
    }

    fn json_of(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    fn allows_any_origin(headers: &axum::http::HeaderMap) -> bool {
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v == "*")
            .unwrap_or(false)
    }

    #[tokio::test]
    async fn root_reports_liveness() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, headers, body) = send(app_with(None), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, handlers::LIVENESS_MESSAGE.as_bytes());
        assert!(allows_any_origin(&headers));
    }

    #[tokio::test]
    async fn preflight_is_no_content_with_cors_headers() {
        for uri in ["/process", "/"] {
            let request = Request::builder()
                .method(Method::OPTIONS)
                .uri(uri)
                .header(header::ORIGIN, "https://example.github.io")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap();
            let (status, headers, body) = send(app_with(None), request).await;

            assert_eq!(status, StatusCode::NO_CONTENT);
            assert!(body.is_empty());
            assert!(allows_any_origin(&headers));
            assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
            assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
            assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "3600");
        }
    }

    #[tokio::test]
    async fn full_success_returns_text_and_audio() {
        let stub = Arc::new(StubProvider::hello());
        let (status, headers, body) = send(
            app_with(Some(Arc::clone(&stub))),
            post_json("/process", r#"{"prompt":"hello"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(allows_any_origin(&headers));
        assert_eq!(
            json_of(&body),
            json!({
                "text": "Hello there",
                "audioData": "QUJD",
                "mimeType": "audio/L16;rate=24000"
            })
        );
        assert_eq!(stub.text_calls.load(Ordering::SeqCst), 1);
        assert_eq!(stub.speech_calls(), 1);
    }

    #[tokio::test]
    async fn function_entry_point_behaves_like_process() {
        let stub = Arc::new(StubProvider::hello());
        let (status, _, body) =
            send(app_with(Some(stub)), post_json("/", r#"{"prompt":"hello"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["text"], "Hello there");
    }

    #[tokio::test]
    async fn missing_audio_fields_are_null() {
        let stub = Arc::new(StubProvider::hello().with_speech(Ok(SpeechSynthesis::default())));
        let (status, _, body) =
            send(app_with(Some(stub)), post_json("/process", r#"{"prompt":"hello"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json_of(&body),
            json!({ "text": "Hello there", "audioData": null, "mimeType": null })
        );
    }

    #[tokio::test]
    async fn bad_prompts_are_rejected_without_provider_calls() {
        let bodies = [
            r#"{}"#,
            r#"{"prompt":""}"#,
            r#"{"prompt":null}"#,
            r#"{"prompt":42}"#,
            r#"not json"#,
        ];
        for raw in bodies {
            let stub = Arc::new(StubProvider::hello());
            let (status, headers, body) =
                send(app_with(Some(Arc::clone(&stub))), post_json("/process", raw)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "body {raw}");
            assert!(allows_any_origin(&headers));
            assert_eq!(
                json_of(&body),
                json!({ "error": "Requires a \"prompt\" in the body." })
            );
            assert_eq!(stub.text_calls.load(Ordering::SeqCst), 0);
            assert_eq!(stub.speech_calls(), 0);
        }
    }

    #[tokio::test]
    async fn body_without_json_content_type_is_rejected() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/process")
            .body(Body::from(r#"{"prompt":"hello"}"#))
            .unwrap();
        let (status, _, _) = send(app_with(Some(Arc::new(StubProvider::hello()))), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unset_api_key_is_server_error() {
        let (status, _, body) =
            send(app_with(None), post_json("/process", r#"{"prompt":"hello"}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_of(&body),
            json!({ "error": "Server configuration error: API Key not set." })
        );
    }

    #[tokio::test]
    async fn text_failure_is_server_error() {
        let stub = Arc::new(
            StubProvider::hello().with_text(Err(StatusCode::TOO_MANY_REQUESTS)),
        );
        let (status, _, body) = send(
            app_with(Some(Arc::clone(&stub))),
            post_json("/process", r#"{"prompt":"hello"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_of(&body),
            json!({ "error": "An error occurred during text generation." })
        );
        assert_eq!(stub.speech_calls(), 0);
    }

    #[tokio::test]
    async fn empty_generation_is_server_error() {
        let stub = Arc::new(StubProvider::hello().with_text(Ok(None)));
        let (status, _, body) = send(
            app_with(Some(Arc::clone(&stub))),
            post_json("/process", r#"{"prompt":"hello"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_of(&body),
            json!({ "error": "Gemini failed to generate text content." })
        );
        assert_eq!(stub.speech_calls(), 0);
    }

    #[tokio::test]
    async fn speech_failure_still_returns_text() {
        let stub = Arc::new(StubProvider::hello().with_speech(Err(StatusCode::INTERNAL_SERVER_ERROR)));
        let (status, headers, body) =
            send(app_with(Some(stub)), post_json("/process", r#"{"prompt":"hello"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(allows_any_origin(&headers));
        assert_eq!(
            json_of(&body),
            json!({ "text": "Hello there", "audioData": null, "error": "TTS failed" })
        );
    }

    #[tokio::test]
    async fn other_methods_are_not_allowed() {
        let request = Request::builder()
            .method(Method::GET)
            .uri("/process")
            .body(Body::empty())
            .unwrap();
        let (status, _, _) = send(app_with(None), request).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
