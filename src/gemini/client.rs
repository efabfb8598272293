use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use super::protocol::{GenerateContentRequest, GenerateContentResponse};
use super::{ProviderError, SpeechProvider, SpeechSynthesis, TextGeneration};
use crate::config::GeminiConfig;

/// Generative Language API client, built once at startup and shared by all
/// requests.
pub struct GeminiClient {
    client: Client,
    api_key: SecretString,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(api_key: SecretString, config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            api_key,
            config,
        }
    }

    fn generate_url(&self, model: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{}/models/{}:generateContent", base, model)
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = self.generate_url(model);

        tracing::debug!(model = %model, "calling generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[async_trait]
impl SpeechProvider for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<TextGeneration, ProviderError> {
        let request = GenerateContentRequest::from_text(prompt).with_search_grounding();
        let response = self
            .generate_content(&self.config.text_model, &request)
            .await?;

        Ok(TextGeneration {
            text: response.first_text(),
        })
    }

    async fn synthesize_speech(&self, prompt: &str) -> Result<SpeechSynthesis, ProviderError> {
        let request =
            GenerateContentRequest::from_text(prompt).with_spoken_audio(&self.config.tts_voice);
        let response = self
            .generate_content(&self.config.tts_model, &request)
            .await?;

        let inline = response.first_inline_data();
        Ok(SpeechSynthesis {
            audio_data: inline.and_then(|i| i.data.clone()),
            mime_type: inline.and_then(|i| i.mime_type.clone()),
        })
    }
}
