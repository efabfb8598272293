use std::sync::Arc;

use crate::error::AppError;
use crate::gemini::{SpeechProvider, SpeechSynthesis};

/// Advisory message attached to a text-only reply.
pub const TTS_FAILED: &str = "TTS failed";

/// Wrap generated text in the instruction given to the speech model.
pub fn speech_prompt(text: &str) -> String {
    format!("Say in a clear and helpful tone: \"{}\"", text)
}

/// How a relayed request finished.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    /// Text and speech both came back.
    Completed { text: String, speech: SpeechSynthesis },
    /// Text came back but speech synthesis failed.
    Degraded { text: String },
}

/// Prompt → text → speech pipeline. `provider` is `None` when no API key was
/// configured at startup.
pub struct Relay {
    provider: Option<Arc<dyn SpeechProvider>>,
}

impl Relay {
    pub fn new(provider: Option<Arc<dyn SpeechProvider>>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, prompt: &str) -> Result<RelayOutcome, AppError> {
        // 1. Validate
        if prompt.is_empty() {
            return Err(AppError::MissingPrompt);
        }
        let provider = self.provider.as_ref().ok_or(AppError::ApiKeyNotSet)?;

        // 2. Generate text
        let text = provider
            .generate_text(prompt)
            .await
            .map_err(AppError::TextGeneration)?
            .text
            .filter(|text| !text.is_empty())
            .ok_or(AppError::EmptyText)?;

        // 3. Synthesize speech, degrading to text-only on failure
        match provider.synthesize_speech(&speech_prompt(&text)).await {
            Ok(speech) => Ok(RelayOutcome::Completed {
                text,
                speech: SpeechSynthesis {
                    audio_data: speech.audio_data.filter(|d| !d.is_empty()),
                    mime_type: speech.mime_type.filter(|m| !m.is_empty()),
                },
            }),
            Err(e) => {
                tracing::error!(stage = "speech_synthesis", error = %e, "Gemini TTS API error");
                Ok(RelayOutcome::Degraded { text })
            }
        }
    }
}
