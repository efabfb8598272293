use std::sync::Arc;

use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod gemini;
mod relay;

use api::routes::{create_router, AppState};
use config::Config;
use gemini::{GeminiClient, SpeechProvider};
use relay::Relay;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().inspect_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
    })?;

    tracing::info!("Gemini Voice Relay v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", config.addr);
    tracing::info!(
        "Text model: {}, speech model: {} (voice {})",
        config.gemini.text_model,
        config.gemini.tts_model,
        config.gemini.tts_voice
    );

    // Without a key the server still starts; every relay request reports it
    let provider: Option<Arc<dyn SpeechProvider>> = match config.api_key {
        Some(api_key) => Some(Arc::new(GeminiClient::new(api_key, config.gemini))),
        None => {
            tracing::error!("GEMINI_API_KEY environment variable is not set. The service will fail.");
            None
        }
    };

    let state = Arc::new(AppState {
        relay: Relay::new(provider),
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("Server listening on port {}", config.addr.port());

    axum::serve(listener, app).await?;

    Ok(())
}
