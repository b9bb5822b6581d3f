//! On-device speech engine abstraction

use crate::error::VoiceResult;
use crate::types::VoiceOption;
use async_trait::async_trait;

/// A discovered on-device voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVoice {
    /// Engine-specific voice identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Language code (e.g. "en-US", "fr")
    pub language: String,
}

/// On-device text-to-speech engine.
///
/// Implementations synthesize and play text directly with no network
/// dependency. The orchestrator uses this both as the primary path for
/// local-provider voices and as the safety net when any remote step fails.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Engine name/identifier
    fn name(&self) -> &str;

    /// Check if the engine is available on this system
    async fn is_available(&self) -> bool;

    /// Speak the given text aloud. Resolves when the utterance finishes or
    /// is cancelled by [`SpeechEngine::stop`]. The voice hint may name a
    /// voice this engine does not know; implementations pick the closest
    /// on-device voice (by language) rather than failing.
    async fn speak(&self, text: &str, voice: Option<&VoiceOption>) -> VoiceResult<()>;

    /// Halt any in-flight utterance. Idempotent; a no-op when idle.
    async fn stop(&self) -> VoiceResult<()>;

    /// Enumerate on-device voices
    async fn voices(&self) -> VoiceResult<Vec<LocalVoice>>;
}
