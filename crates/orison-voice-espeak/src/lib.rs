//! eSpeak speech engine implementation for Orison

use async_trait::async_trait;
use orison_voice::{LocalVoice, SpeechEngine, VoiceError, VoiceOption, VoiceResult};
use parking_lot::Mutex;
use regex::Regex;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};


/// Default speaking rate in words per minute
const DEFAULT_RATE_WPM: u32 = 180;

/// On-device engine shelling out to `espeak` / `espeak-ng`.
///
/// Speech is played through espeak's own audio output; the spawned child is
/// tracked so [`SpeechEngine::stop`] can interrupt an utterance mid-word.
pub struct EspeakEngine {
    rate_wpm: u32,
    /// Cancellation handle for the current utterance, if one is speaking.
    current: Mutex<Option<CancellationToken>>,
}

impl Default for EspeakEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EspeakEngine {
    pub fn new() -> Self {
        Self {
            rate_wpm: DEFAULT_RATE_WPM,
            current: Mutex::new(None),
        }
    }

    pub fn with_rate(rate_wpm: u32) -> Self {
        Self {
            rate_wpm,
            current: Mutex::new(None),
        }
    }

    /// Resolve the espeak command name (espeak or espeak-ng)
    async fn espeak_command() -> Option<&'static str> {
        if Command::new("espeak").arg("--version").output().await.is_ok() {
            Some("espeak")
        } else if Command::new("espeak-ng")
            .arg("--version")
            .output()
            .await
            .is_ok()
        {
            Some("espeak-ng")
        } else {
            None
        }
    }

    /// Build espeak arguments for one utterance
    fn build_args(&self, text: &str, voice: Option<&VoiceOption>) -> Vec<String> {
        let mut args = Vec::new();

        // espeak takes a language tag directly as a voice selector
        if let Some(v) = voice {
            if !v.language.is_empty() {
                args.push("-v".to_string());
                args.push(v.language.to_ascii_lowercase());
            }
        }

        args.push("-s".to_string());
        args.push(self.rate_wpm.to_string());
        args.push(text.to_string());
        args
    }

    /// Parse espeak `--voices` output
    fn parse_voice_list(output: &str) -> Vec<LocalVoice> {
        let mut voices = Vec::new();

        // espeak voice list format: Pty Language Age/Gender VoiceName File Other
        // Example: 5  en             M  en                 (en 2)
        let voice_regex = match Regex::new(r"^\s*(\d+)\s+([\w-]+)\s+([MF\+]?)\s+([\w\-_]+)\s+") {
            Ok(re) => re,
            Err(e) => {
                warn!("failed to compile espeak voice regex: {}", e);
                return voices;
            }
        };

        for line in output.lines().skip(1) {
            if let Some(captures) = voice_regex.captures(line) {
                let language = captures.get(2).map_or("unknown", |m| m.as_str()).to_string();
                let voice_id = captures.get(4).map_or("unknown", |m| m.as_str()).to_string();

                voices.push(LocalVoice {
                    id: voice_id.clone(),
                    name: format!("{} ({})", language, voice_id),
                    language,
                });
            }
        }

        voices
    }
}

#[async_trait]
impl SpeechEngine for EspeakEngine {
    fn name(&self) -> &str {
        "eSpeak"
    }

    async fn is_available(&self) -> bool {
        Self::espeak_command().await.is_some()
    }

    async fn speak(&self, text: &str, voice: Option<&VoiceOption>) -> VoiceResult<()> {
        if text.trim().is_empty() {
            return Err(VoiceError::InvalidInput("empty text".to_string()));
        }

        let cmd = Self::espeak_command().await.ok_or_else(|| {
            VoiceError::EngineNotAvailable(
                "eSpeak not found; install espeak or espeak-ng".to_string(),
            )
        })?;

        // Supersede any utterance still in flight.
        let token = CancellationToken::new();
        if let Some(prev) = self.current.lock().replace(token.clone()) {
            prev.cancel();
        }

        let args = self.build_args(text, voice);
        debug!("espeak utterance: {} {:?}", cmd, args);

        let mut child = Command::new(cmd)
            .args(&args)
            .kill_on_drop(true)
            .spawn()
            .map_err(VoiceError::Io)?;

        let finished = tokio::select! {
            status = child.wait() => Some(status),
            _ = token.cancelled() => None,
        };

        match finished {
            Some(Ok(status)) if status.success() => Ok(()),
            Some(Ok(status)) => Err(VoiceError::Synthesis(format!(
                "espeak exited with {}",
                status
            ))),
            Some(Err(e)) => Err(VoiceError::Io(e)),
            None => {
                // Interrupted by stop() or a newer utterance.
                if let Err(e) = child.kill().await {
                    warn!("failed to kill espeak child: {}", e);
                }
                Ok(())
            }
        }
    }

    async fn stop(&self) -> VoiceResult<()> {
        if let Some(token) = self.current.lock().take() {
            token.cancel();
            debug!("espeak utterance cancelled");
        }
        Ok(())
    }

    async fn voices(&self) -> VoiceResult<Vec<LocalVoice>> {
        let cmd = Self::espeak_command().await.ok_or_else(|| {
            VoiceError::EngineNotAvailable(
                "eSpeak not found; install espeak or espeak-ng".to_string(),
            )
        })?;

        let output = Command::new(cmd)
            .arg("--voices")
            .output()
            .await
            .map_err(VoiceError::Io)?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let voices = Self::parse_voice_list(&stdout);
        debug!("loaded {} espeak voices", voices.len());
        Ok(voices)
    }
}
