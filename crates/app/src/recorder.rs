//! Fire-and-forget playback tracking against the prayer API

use std::sync::Arc;

use async_trait::async_trait;
use orison_remote::AuthTokenProvider;
use orison_voice::PlaybackRecorder;
use tracing::{debug, warn};

/// Posts a played notification for a prayer. Failures are logged and
/// dropped; tracking never blocks or degrades playback.
pub struct HttpPlaybackRecorder {
    http: reqwest::Client,
    base_url: String,
    auth: Arc<dyn AuthTokenProvider>,
}

impl HttpPlaybackRecorder {
    pub fn new(base_url: impl Into<String>, auth: Arc<dyn AuthTokenProvider>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        }
    }
}

#[async_trait]
impl PlaybackRecorder for HttpPlaybackRecorder {
    async fn record_playback(&self, content_id: &str) {
        let Some(token) = self.auth.bearer_token().await else {
            debug!(content_id, "skipping playback record, no credential");
            return;
        };

        let url = format!("{}/prayers/{}/played", self.base_url, content_id);
        match self.http.post(&url).bearer_auth(token).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(content_id, "playback recorded");
            }
            Ok(response) => {
                warn!(
                    content_id,
                    status = response.status().as_u16(),
                    "playback record rejected"
                );
            }
            Err(e) => {
                warn!(content_id, "playback record failed: {}", e);
            }
        }
    }
}
