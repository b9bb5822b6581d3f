//! Voice and audio-state abstraction layer for Orison
//!
//! This crate provides the shared vocabulary for prayer audio playback: the
//! audio-state model, voice and content types, and the traits the
//! orchestrator consumes (remote cache, on-device engine, playback sink,
//! playback recorder).

use std::sync::atomic::{AtomicU64, Ordering};

pub mod engine;
pub mod error;
pub mod playback;
pub mod remote;
pub mod types;

pub use engine::{LocalVoice, SpeechEngine};
pub use error::{VoiceError, VoiceResult};
pub use playback::{NullRecorder, PlaybackRecorder, PlaybackSink};
pub use remote::RemoteAudioCache;
pub use types::{AudioState, PrayerContent, TriggerOutcome, VoiceOption, VoiceProvider};

/// Generates unique playback-request IDs
static PLAYBACK_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a unique playback-request ID
pub fn next_playback_id() -> u64 {
    PLAYBACK_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_tags_round_trip() {
        assert_eq!(VoiceProvider::from("local".to_string()), VoiceProvider::Local);
        assert_eq!(VoiceProvider::from("azure".to_string()), VoiceProvider::Azure);
        assert_eq!(
            VoiceProvider::from("elevenlabs".to_string()),
            VoiceProvider::ElevenLabs
        );
        assert_eq!(
            VoiceProvider::from("polly".to_string()),
            VoiceProvider::Other("polly".to_string())
        );
        assert_eq!(String::from(VoiceProvider::Azure), "azure");
    }

    #[test]
    fn only_known_remote_providers_route_remotely() {
        assert!(VoiceProvider::Azure.is_remote());
        assert!(VoiceProvider::ElevenLabs.is_remote());
        assert!(!VoiceProvider::Local.is_remote());
        assert!(!VoiceProvider::Other("polly".into()).is_remote());
    }

    #[test]
    fn audio_state_defaults_to_missing() {
        assert_eq!(AudioState::default(), AudioState::Missing);
        assert!(!AudioState::Missing.is_ready());
        assert!(AudioState::Ready { url: "https://cdn/x.mp3".into() }.is_ready());
    }

    #[test]
    fn playback_ids_are_unique() {
        let a = next_playback_id();
        let b = next_playback_id();
        assert_ne!(a, b);
    }
}
