//! Core types for prayer audio playback

use serde::{Deserialize, Serialize};

/// Synthesis state of a (prayer, voice) pair in the remote audio cache.
///
/// Exactly one value is observable at any instant; the orchestrator replaces
/// it wholesale on every transition, it is never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AudioState {
    /// No cached audio exists for this pair.
    #[default]
    Missing,
    /// Remote synthesis has been triggered and is in progress.
    Building,
    /// Finished audio is fetchable at the given URL.
    Ready { url: String },
}

impl AudioState {
    pub fn is_ready(&self) -> bool {
        matches!(self, AudioState::Ready { .. })
    }
}

/// Where a voice is synthesized.
///
/// Unrecognized tags deserialize to `Other` so routing never hard-fails;
/// the orchestrator treats `Other` as a routing error and falls back to the
/// on-device engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VoiceProvider {
    /// On-device synthesis, no network involved.
    Local,
    Azure,
    ElevenLabs,
    Other(String),
}

impl VoiceProvider {
    /// Whether this provider goes through the remote cache-backed flow.
    pub fn is_remote(&self) -> bool {
        matches!(self, VoiceProvider::Azure | VoiceProvider::ElevenLabs)
    }
}

impl From<String> for VoiceProvider {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "local" => VoiceProvider::Local,
            "azure" => VoiceProvider::Azure,
            "elevenlabs" => VoiceProvider::ElevenLabs,
            _ => VoiceProvider::Other(tag),
        }
    }
}

impl From<VoiceProvider> for String {
    fn from(provider: VoiceProvider) -> Self {
        match provider {
            VoiceProvider::Local => "local".to_string(),
            VoiceProvider::Azure => "azure".to_string(),
            VoiceProvider::ElevenLabs => "elevenlabs".to_string(),
            VoiceProvider::Other(tag) => tag,
        }
    }
}

/// A selectable synthesis voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceOption {
    /// Stable voice identifier, the cache key alongside the prayer id.
    pub id: String,
    /// Human-readable voice name.
    pub name: String,
    /// Spoken-language tag (e.g. "en-US").
    pub language: String,
    /// Routing discriminator.
    pub provider: VoiceProvider,
}

/// The text to be spoken. Immutable for the duration of a playback request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerContent {
    /// Stable prayer identifier, the cache key alongside the voice id.
    pub id: String,
    /// Literal text to synthesize.
    pub text: String,
}

impl PrayerContent {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Outcome of a generation-trigger request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Audio already existed (a race with another client); play it directly
    /// without entering the building state.
    AlreadyReady { url: String },
    /// Synthesis accepted; transition to building and start polling.
    Accepted,
    /// Trigger rejected or unreachable; no retry at this layer.
    Failed,
}
