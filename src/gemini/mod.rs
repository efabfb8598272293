pub mod client;
pub mod protocol;

use async_trait::async_trait;
use reqwest::StatusCode;

pub use client::GeminiClient;

#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Output of the text model. `text` is `None` when nothing usable came back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextGeneration {
    pub text: Option<String>,
}

/// Output of the speech model. Both fields may be missing independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeechSynthesis {
    /// Base64-encoded audio
    pub audio_data: Option<String>,
    pub mime_type: Option<String>,
}

/// The two provider capabilities the relay depends on.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Answer a prompt, grounded with live web search.
    async fn generate_text(&self, prompt: &str) -> Result<TextGeneration, ProviderError>;

    /// Speak the given synthesis prompt with the configured prebuilt voice.
    async fn synthesize_speech(&self, prompt: &str) -> Result<SpeechSynthesis, ProviderError>;
}
