//! Wire DTOs for the audio-synthesis cache API

use orison_voice::AudioState;
use serde::{Deserialize, Serialize};

/// Body of `GET /prayers/{id}/audio-state`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioStateResponse {
    pub state: String,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

impl AudioStateResponse {
    /// Decode the state tag. `READY` without a non-empty URL and every
    /// unrecognized tag are both treated as `Missing`.
    pub fn into_audio_state(self) -> AudioState {
        match self.state.as_str() {
            "READY" => match self.audio_url {
                Some(url) if !url.is_empty() => AudioState::Ready { url },
                _ => AudioState::Missing,
            },
            "BUILDING" => AudioState::Building,
            _ => AudioState::Missing,
        }
    }
}

/// Body of `POST /prayers/{id}/generate-audio`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest<'a> {
    pub voice_id: &'a str,
}

/// 200 response to a generate request: the audio already existed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub audio_url: Option<String>,
}
