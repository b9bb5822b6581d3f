//! HTTP client for the Orison audio-synthesis cache
//!
//! Implements the remote half of the playback flow: the audio-state check,
//! the generation trigger, and the finished-audio download, all behind the
//! [`orison_voice::RemoteAudioCache`] trait.

pub mod auth;
pub mod client;
pub mod wire;

pub use auth::{AuthTokenProvider, StaticTokenProvider};
pub use client::RemoteAudioClient;
