//! Asynchronous audio-generation orchestrator for Orison
//!
//! Turns a (prayer, voice) pair into playable audio when the audio may not
//! exist yet, may take tens of seconds to synthesize remotely, and must
//! degrade to the on-device voice on any plumbing failure. The orchestrator
//! owns the single observable [`orison_voice::AudioState`] and drives every
//! transition; collaborators only return values.

pub mod orchestrator;
pub mod poll;

pub use orchestrator::{ActionLabel, AudioOrchestrator};
pub use poll::PollPolicy;
