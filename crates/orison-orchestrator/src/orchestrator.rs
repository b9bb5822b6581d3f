//! The audio playback state machine

use std::sync::Arc;

use orison_voice::{
    AudioState, PlaybackRecorder, PlaybackSink, PrayerContent, RemoteAudioCache, SpeechEngine,
    TriggerOutcome, VoiceError, VoiceOption, VoiceProvider,
};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::poll::PollPolicy;

/// Human-readable play-button state for UI binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionLabel {
    pub text: &'static str,
    pub enabled: bool,
}

/// Tracks the current request generation and its cancellation handle.
///
/// Every state write re-checks the writer's generation under this lock, so a
/// delayed callback from a superseded request can never resurrect stale
/// state after a newer request has moved on.
struct RequestSlot {
    current: u64,
    cancel: Option<CancellationToken>,
}

struct Inner {
    cache: Arc<dyn RemoteAudioCache>,
    engine: Arc<dyn SpeechEngine>,
    sink: Arc<dyn PlaybackSink>,
    recorder: Arc<dyn PlaybackRecorder>,
    poll: PollPolicy,
    requests: Mutex<RequestSlot>,
    state_tx: watch::Sender<AudioState>,
    speaking_tx: watch::Sender<bool>,
    error_tx: watch::Sender<Option<String>>,
}

/// Single entry point for prayer audio playback.
///
/// Owns the one observable [`AudioState`] and the `is_speaking` flag; no
/// other component mutates them. Construct once, share via `Arc`, and inject
/// into every UI surface that plays audio.
pub struct AudioOrchestrator {
    inner: Arc<Inner>,
}

impl AudioOrchestrator {
    pub fn new(
        cache: Arc<dyn RemoteAudioCache>,
        engine: Arc<dyn SpeechEngine>,
        sink: Arc<dyn PlaybackSink>,
        recorder: Arc<dyn PlaybackRecorder>,
        poll: PollPolicy,
    ) -> Self {
        let (state_tx, _) = watch::channel(AudioState::Missing);
        let (speaking_tx, _) = watch::channel(false);
        let (error_tx, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                cache,
                engine,
                sink,
                recorder,
                poll,
                requests: Mutex::new(RequestSlot {
                    current: 0,
                    cancel: None,
                }),
                state_tx,
                speaking_tx,
                error_tx,
            }),
        }
    }

    /// Play a prayer with the selected voice.
    ///
    /// Returns immediately; outcomes are observed through the published
    /// state. A call while audio is audibly playing is interpreted as stop,
    /// not queued.
    pub async fn play_prayer(&self, content: PrayerContent, voice: VoiceOption) {
        if self.is_speaking() {
            debug!("play request while speaking, toggling to stop");
            self.stop().await;
            return;
        }

        let (gen, token) = self.inner.begin_request();
        self.inner.error_tx.send_replace(None);

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            match voice.provider {
                VoiceProvider::Local => {
                    inner.play_local(gen, &token, &content, Some(&voice)).await;
                }
                VoiceProvider::Azure | VoiceProvider::ElevenLabs => {
                    inner.play_remote(gen, &token, &content, &voice).await;
                }
                VoiceProvider::Other(ref tag) => {
                    warn!(provider = %tag, "unrecognized voice provider, using device voice");
                    inner.play_local(gen, &token, &content, None).await;
                }
            }
        });
    }

    /// Halt everything: local synthesis, remote playback, any active poll.
    /// Idempotent; safe to call when nothing is playing.
    pub async fn stop(&self) {
        self.inner.supersede();
        self.inner.sink.stop();
        if let Err(e) = self.inner.engine.stop().await {
            warn!("failed to stop speech engine: {}", e);
        }
        self.inner.speaking_tx.send_replace(false);
        self.inner.state_tx.send_replace(AudioState::Missing);
    }

    pub fn state(&self) -> AudioState {
        self.inner.state_tx.borrow().clone()
    }

    pub fn is_speaking(&self) -> bool {
        *self.inner.speaking_tx.borrow()
    }

    /// Last user-visible error (poll timeout or server-side build failure).
    pub fn last_error(&self) -> Option<String> {
        self.inner.error_tx.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<AudioState> {
        self.inner.state_tx.subscribe()
    }

    pub fn subscribe_speaking(&self) -> watch::Receiver<bool> {
        self.inner.speaking_tx.subscribe()
    }

    pub fn subscribe_error(&self) -> watch::Receiver<Option<String>> {
        self.inner.error_tx.subscribe()
    }

    /// Derived play-button label/enabled state.
    pub fn action_label(&self) -> ActionLabel {
        if self.is_speaking() {
            ActionLabel {
                text: "Stop",
                enabled: true,
            }
        } else if self.state() == AudioState::Building {
            ActionLabel {
                text: "Preparing audio…",
                enabled: false,
            }
        } else {
            ActionLabel {
                text: "Play",
                enabled: true,
            }
        }
    }
}

impl Inner {
    /// Start a new request generation, cancelling any previous one first.
    fn begin_request(&self) -> (u64, CancellationToken) {
        let mut slot = self.requests.lock();
        slot.current += 1;
        if let Some(prev) = slot.cancel.take() {
            prev.cancel();
        }
        let token = CancellationToken::new();
        slot.cancel = Some(token.clone());
        (slot.current, token)
    }

    /// Invalidate every in-flight request without starting a new one.
    fn supersede(&self) {
        let mut slot = self.requests.lock();
        slot.current += 1;
        if let Some(prev) = slot.cancel.take() {
            prev.cancel();
        }
    }

    /// Publish a state transition, unless the writer has been superseded.
    fn publish_state(&self, gen: u64, state: AudioState) {
        let slot = self.requests.lock();
        if slot.current == gen {
            debug!(?state, "audio state transition");
            self.state_tx.send_replace(state);
        } else {
            debug!(?state, "discarding state from superseded request");
        }
    }

    fn publish_speaking(&self, gen: u64, speaking: bool) {
        let slot = self.requests.lock();
        if slot.current == gen {
            self.speaking_tx.send_replace(speaking);
        }
    }

    fn publish_error(&self, gen: u64, message: String) {
        let slot = self.requests.lock();
        if slot.current == gen {
            warn!("playback error surfaced: {}", message);
            self.error_tx.send_replace(Some(message));
        }
    }

    /// Fire-and-forget playback tracking; failure never blocks playback.
    fn record_playback(&self, content_id: &str) {
        let recorder = Arc::clone(&self.recorder);
        let content_id = content_id.to_string();
        tokio::spawn(async move {
            recorder.record_playback(&content_id).await;
        });
    }

    /// Speak on-device. The system's safety net: from the orchestrator's
    /// perspective this path always succeeds.
    async fn play_local(
        &self,
        gen: u64,
        token: &CancellationToken,
        content: &PrayerContent,
        voice: Option<&VoiceOption>,
    ) {
        self.publish_speaking(gen, true);
        self.record_playback(&content.id);

        let spoken = tokio::select! {
            r = self.engine.speak(&content.text, voice) => r,
            _ = token.cancelled() => return,
        };
        if let Err(e) = spoken {
            warn!("local synthesis failed: {}", e);
        }
        self.publish_speaking(gen, false);
    }

    /// The cache-backed remote flow: check, maybe trigger, maybe poll,
    /// fetch, play. Any plumbing failure lands in the local fallback.
    async fn play_remote(
        &self,
        gen: u64,
        token: &CancellationToken,
        content: &PrayerContent,
        voice: &VoiceOption,
    ) {
        let state = tokio::select! {
            s = self.cache.check_state(&content.id, &voice.id) => s,
            _ = token.cancelled() => return,
        };

        match state {
            AudioState::Ready { url } => {
                self.publish_state(gen, AudioState::Ready { url: url.clone() });
                self.fetch_and_play(gen, token, content, &url).await;
            }
            AudioState::Building => {
                self.publish_state(gen, AudioState::Building);
                self.poll_until_ready(gen, token, content, voice).await;
            }
            AudioState::Missing => {
                self.publish_state(gen, AudioState::Missing);
                let outcome = tokio::select! {
                    o = self.cache.trigger(&content.id, &voice.id) => o,
                    _ = token.cancelled() => return,
                };
                match outcome {
                    TriggerOutcome::AlreadyReady { url } => {
                        info!("audio already existed at trigger time");
                        self.publish_state(gen, AudioState::Ready { url: url.clone() });
                        self.fetch_and_play(gen, token, content, &url).await;
                    }
                    TriggerOutcome::Accepted => {
                        self.publish_state(gen, AudioState::Building);
                        self.poll_until_ready(gen, token, content, voice).await;
                    }
                    TriggerOutcome::Failed => {
                        warn!(
                            content_id = %content.id,
                            voice_id = %voice.id,
                            "generation trigger failed, using device voice"
                        );
                        self.play_local(gen, token, content, None).await;
                    }
                }
            }
        }
    }

    /// Check the cache at a fixed cadence until the audio is ready, the
    /// build vanishes server-side, or the attempt ceiling is reached.
    async fn poll_until_ready(
        &self,
        gen: u64,
        token: &CancellationToken,
        content: &PrayerContent,
        voice: &VoiceOption,
    ) {
        for attempt in 1..=self.poll.max_attempts {
            tokio::select! {
                _ = tokio::time::sleep(self.poll.interval) => {}
                _ = token.cancelled() => return,
            }

            let state = tokio::select! {
                s = self.cache.check_state(&content.id, &voice.id) => s,
                _ = token.cancelled() => return,
            };

            match state {
                AudioState::Ready { url } => {
                    debug!(attempt, "audio became ready");
                    self.publish_state(gen, AudioState::Ready { url: url.clone() });
                    self.fetch_and_play(gen, token, content, &url).await;
                    return;
                }
                AudioState::Building => continue,
                AudioState::Missing => {
                    // The build vanished server-side; do not wait for the
                    // ceiling, and do not swap voices behind the user's back.
                    self.publish_error(gen, VoiceError::GenerationFailed.to_string());
                    self.publish_state(gen, AudioState::Missing);
                    return;
                }
            }
        }

        self.publish_error(
            gen,
            VoiceError::GenerationTimeout {
                attempts: self.poll.max_attempts,
            }
            .to_string(),
        );
        self.publish_state(gen, AudioState::Missing);
    }

    /// Download the finished audio and play it through the platform sink.
    ///
    /// A download failure after the remote state was ready is surfaced, not
    /// silently swapped to the device voice: the user's chosen voice exists,
    /// so an explicit retry beats changing voices mid-request.
    async fn fetch_and_play(
        &self,
        gen: u64,
        token: &CancellationToken,
        content: &PrayerContent,
        url: &str,
    ) {
        let fetched = tokio::select! {
            r = self.cache.fetch(url) => r,
            _ = token.cancelled() => return,
        };

        match fetched {
            Ok(bytes) => {
                self.publish_speaking(gen, true);
                self.record_playback(&content.id);
                let played = tokio::select! {
                    r = self.sink.play(bytes) => r,
                    _ = token.cancelled() => return,
                };
                if let Err(e) = played {
                    warn!("playback failed: {}", e);
                }
                self.publish_speaking(gen, false);
            }
            Err(e) => {
                self.publish_error(gen, format!("could not download audio: {}", e));
                self.publish_state(gen, AudioState::Missing);
            }
        }
    }
}
