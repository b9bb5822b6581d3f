//! Error types for voice and playback functionality

use thiserror::Error;

/// Voice error types
#[derive(Error, Debug)]
pub enum VoiceError {
    /// Engine is not available or not installed
    #[error("speech engine not available: {0}")]
    EngineNotAvailable(String),

    /// Voice not found or not supported
    #[error("voice not found: {0}")]
    VoiceNotFound(String),

    /// Local synthesis failed
    #[error("synthesis failed: {0}")]
    Synthesis(String),

    /// Audio playback error
    #[error("playback failed: {0}")]
    Playback(String),

    /// No bearer credential available for an authenticated request
    #[error("no credential available")]
    MissingCredential,

    /// Transport-level failure (connection, TLS, timeout)
    #[error("transport error: {0}")]
    Transport(String),

    /// Server answered with an unexpected status
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Response body could not be decoded
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Poll ceiling reached without the audio becoming ready
    #[error("audio generation timed out after {attempts} checks")]
    GenerationTimeout { attempts: u32 },

    /// Server stopped reporting the build mid-poll
    #[error("audio generation failed on the server")]
    GenerationFailed,

    /// Invalid text input
    #[error("invalid text input: {0}")]
    InvalidInput(String),

    /// IO error (process spawning, file operations)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for voice operations
pub type VoiceResult<T> = Result<T, VoiceError>;
