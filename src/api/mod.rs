pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};

use crate::relay::{RelayOutcome, TTS_FAILED};

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Body of a successful `/process` reply.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ProcessResponse {
    Spoken(SpokenReply),
    TextOnly(TextOnlyReply),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpokenReply {
    pub text: String,
    pub audio_data: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOnlyReply {
    pub text: String,
    pub audio_data: Option<String>,
    pub error: String,
}

impl From<RelayOutcome> for ProcessResponse {
    fn from(outcome: RelayOutcome) -> Self {
        match outcome {
            RelayOutcome::Completed { text, speech } => ProcessResponse::Spoken(SpokenReply {
                text,
                audio_data: speech.audio_data,
                mime_type: speech.mime_type,
            }),
            RelayOutcome::Degraded { text } => ProcessResponse::TextOnly(TextOnlyReply {
                text,
                audio_data: None,
                error: TTS_FAILED.to_string(),
            }),
        }
    }
}
