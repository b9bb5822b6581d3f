//! Orison application wiring

pub mod config;
pub mod playback;
pub mod recorder;

pub use config::AppConfig;
pub use playback::RodioSink;
pub use recorder::HttpPlaybackRecorder;
