//! Remote audio-cache abstraction consumed by the orchestrator

use crate::error::VoiceResult;
use crate::types::{AudioState, TriggerOutcome};
use async_trait::async_trait;

/// The remote cache-backed synthesis service.
///
/// One implementation speaks the HTTP wire contract; tests substitute mocks.
/// `check_state` is total by contract: every failure mode collapses to
/// [`AudioState::Missing`] so the orchestrator's routing switch never has a
/// fourth case to handle.
#[async_trait]
pub trait RemoteAudioCache: Send + Sync {
    /// Query the synthesis state of a (prayer, voice) pair. Never fails;
    /// network errors, bad statuses, and malformed bodies all report
    /// `Missing`.
    async fn check_state(&self, content_id: &str, voice_id: &str) -> AudioState;

    /// Ask the backend to start synthesizing. No retry at this layer.
    async fn trigger(&self, content_id: &str, voice_id: &str) -> TriggerOutcome;

    /// Download finished audio bytes from a `Ready` location.
    async fn fetch(&self, url: &str) -> VoiceResult<Vec<u8>>;
}
