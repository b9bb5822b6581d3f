//! Playback output and playback-recording abstractions

use crate::error::VoiceResult;
use async_trait::async_trait;

/// Platform audio output for fetched audio bytes.
///
/// `play` resolves when playback finishes or is interrupted by `stop`.
#[async_trait]
pub trait PlaybackSink: Send + Sync {
    /// Decode and play the given audio bytes to completion.
    async fn play(&self, audio: Vec<u8>) -> VoiceResult<()>;

    /// Halt any in-flight playback. Idempotent.
    fn stop(&self);
}

/// Fire-and-forget sink notified once audio playback actually begins.
///
/// Failures are logged by implementations, never surfaced to the caller and
/// never allowed to block playback.
#[async_trait]
pub trait PlaybackRecorder: Send + Sync {
    async fn record_playback(&self, content_id: &str);
}

/// Recorder that drops every notification. Useful in tests and for callers
/// that do not track playback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRecorder;

#[async_trait]
impl PlaybackRecorder for NullRecorder {
    async fn record_playback(&self, _content_id: &str) {}
}
