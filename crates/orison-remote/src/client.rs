//! HTTP client for the audio-synthesis cache

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use orison_voice::{AudioState, RemoteAudioCache, TriggerOutcome, VoiceError, VoiceResult};
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::auth::AuthTokenProvider;
use crate::wire::{AudioStateResponse, GenerateRequest, GenerateResponse};

/// Client for the cache-backed synthesis service.
///
/// Bundles the state check, the generation trigger, and the audio download
/// behind [`RemoteAudioCache`]. The state check is total: every failure mode
/// collapses to [`AudioState::Missing`], trading an occasional needless
/// re-trigger for a routing switch that always has a defined next action.
pub struct RemoteAudioClient {
    http: reqwest::Client,
    base_url: String,
    auth: Arc<dyn AuthTokenProvider>,
}

impl RemoteAudioClient {
    pub fn new(base_url: impl Into<String>, auth: Arc<dyn AuthTokenProvider>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        }
    }

    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        auth: Arc<dyn AuthTokenProvider>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        }
    }

    fn state_url(&self, content_id: &str) -> String {
        format!("{}/prayers/{}/audio-state", self.base_url, content_id)
    }

    fn generate_url(&self, content_id: &str) -> String {
        format!("{}/prayers/{}/generate-audio", self.base_url, content_id)
    }

    /// Fallible body of the state check; the trait impl collapses every
    /// error to `Missing`.
    async fn try_check_state(&self, content_id: &str, voice_id: &str) -> VoiceResult<AudioState> {
        let token = self
            .auth
            .bearer_token()
            .await
            .ok_or(VoiceError::MissingCredential)?;

        let url = self.state_url(content_id);
        let started = Instant::now();
        let response = self
            .http
            .get(&url)
            .query(&[("voiceId", voice_id)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| VoiceError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(
            method = "GET",
            %url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "audio-state request"
        );

        if status != StatusCode::OK {
            return Err(VoiceError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body: AudioStateResponse = response
            .json()
            .await
            .map_err(|e| VoiceError::MalformedResponse(e.to_string()))?;
        Ok(body.into_audio_state())
    }

    /// Fallible body of the trigger; the trait impl maps every error to
    /// `TriggerOutcome::Failed`.
    async fn try_trigger(&self, content_id: &str, voice_id: &str) -> VoiceResult<TriggerOutcome> {
        let token = self
            .auth
            .bearer_token()
            .await
            .ok_or(VoiceError::MissingCredential)?;

        let url = self.generate_url(content_id);
        let started = Instant::now();
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&GenerateRequest { voice_id })
            .send()
            .await
            .map_err(|e| VoiceError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(
            method = "POST",
            %url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generate-audio request"
        );

        match status {
            // Audio already existed: a race with another client.
            StatusCode::OK => {
                let body: GenerateResponse = response
                    .json()
                    .await
                    .map_err(|e| VoiceError::MalformedResponse(e.to_string()))?;
                match body.audio_url {
                    Some(url) if !url.is_empty() => Ok(TriggerOutcome::AlreadyReady { url }),
                    _ => Err(VoiceError::MalformedResponse(
                        "200 generate response without audioUrl".to_string(),
                    )),
                }
            }
            StatusCode::ACCEPTED => Ok(TriggerOutcome::Accepted),
            _ => Err(VoiceError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            }),
        }
    }
}

#[async_trait]
impl RemoteAudioCache for RemoteAudioClient {
    async fn check_state(&self, content_id: &str, voice_id: &str) -> AudioState {
        match self.try_check_state(content_id, voice_id).await {
            Ok(state) => state,
            Err(e) => {
                warn!(content_id, voice_id, "state check failed, reporting missing: {}", e);
                AudioState::Missing
            }
        }
    }

    async fn trigger(&self, content_id: &str, voice_id: &str) -> TriggerOutcome {
        match self.try_trigger(content_id, voice_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(content_id, voice_id, "generation trigger failed: {}", e);
                TriggerOutcome::Failed
            }
        }
    }

    async fn fetch(&self, url: &str) -> VoiceResult<Vec<u8>> {
        let started = Instant::now();
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| VoiceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VoiceError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| VoiceError::Transport(e.to_string()))?;
        debug!(
            %url,
            bytes = bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetched audio"
        );
        Ok(bytes.to_vec())
    }
}
