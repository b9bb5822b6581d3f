//! Scripted collaborator fakes for orchestrator tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use orison_voice::{
    AudioState, LocalVoice, PlaybackRecorder, PlaybackSink, RemoteAudioCache, SpeechEngine,
    TriggerOutcome, VoiceError, VoiceOption, VoiceProvider, VoiceResult,
};

/// One scripted reply to a state check, optionally delayed.
pub struct StateReply {
    pub delay: Duration,
    pub state: AudioState,
}

impl StateReply {
    pub fn now(state: AudioState) -> Self {
        Self {
            delay: Duration::ZERO,
            state,
        }
    }

    pub fn after(delay: Duration, state: AudioState) -> Self {
        Self { delay, state }
    }
}

/// Remote cache fake driven by a reply queue. Once the queue is exhausted,
/// every further check answers `default_state`.
pub struct FakeCache {
    replies: Mutex<VecDeque<StateReply>>,
    default_state: Mutex<AudioState>,
    pub state_calls: AtomicU32,
    trigger_outcome: Mutex<TriggerOutcome>,
    pub trigger_calls: AtomicU32,
    fetch_bytes: Mutex<Vec<u8>>,
    fail_fetch: Mutex<bool>,
    pub fetched: Mutex<Vec<String>>,
}

impl FakeCache {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            default_state: Mutex::new(AudioState::Missing),
            state_calls: AtomicU32::new(0),
            trigger_outcome: Mutex::new(TriggerOutcome::Failed),
            trigger_calls: AtomicU32::new(0),
            fetch_bytes: Mutex::new(vec![0u8; 4]),
            fail_fetch: Mutex::new(false),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn script(self, replies: Vec<StateReply>) -> Self {
        *self.replies.lock().unwrap() = replies.into();
        self
    }

    pub fn default_state(self, state: AudioState) -> Self {
        *self.default_state.lock().unwrap() = state;
        self
    }

    pub fn trigger_outcome(self, outcome: TriggerOutcome) -> Self {
        *self.trigger_outcome.lock().unwrap() = outcome;
        self
    }

    pub fn failing_fetch(self) -> Self {
        *self.fail_fetch.lock().unwrap() = true;
        self
    }

    pub fn state_call_count(&self) -> u32 {
        self.state_calls.load(Ordering::SeqCst)
    }

    pub fn trigger_call_count(&self) -> u32 {
        self.trigger_calls.load(Ordering::SeqCst)
    }

    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteAudioCache for FakeCache {
    async fn check_state(&self, _content_id: &str, _voice_id: &str) -> AudioState {
        self.state_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(reply) => {
                if !reply.delay.is_zero() {
                    tokio::time::sleep(reply.delay).await;
                }
                reply.state
            }
            None => self.default_state.lock().unwrap().clone(),
        }
    }

    async fn trigger(&self, _content_id: &str, _voice_id: &str) -> TriggerOutcome {
        self.trigger_calls.fetch_add(1, Ordering::SeqCst);
        self.trigger_outcome.lock().unwrap().clone()
    }

    async fn fetch(&self, url: &str) -> VoiceResult<Vec<u8>> {
        self.fetched.lock().unwrap().push(url.to_string());
        if *self.fail_fetch.lock().unwrap() {
            return Err(VoiceError::UnexpectedStatus {
                status: 404,
                url: url.to_string(),
            });
        }
        Ok(self.fetch_bytes.lock().unwrap().clone())
    }
}

/// On-device engine fake that records utterances.
pub struct FakeEngine {
    pub spoken: Mutex<Vec<String>>,
    pub stops: AtomicU32,
    utterance: Duration,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            spoken: Mutex::new(Vec::new()),
            stops: AtomicU32::new(0),
            utterance: Duration::from_secs(2),
        }
    }

    pub fn with_utterance(utterance: Duration) -> Self {
        Self {
            spoken: Mutex::new(Vec::new()),
            stops: AtomicU32::new(0),
            utterance,
        }
    }

    pub fn spoken_texts(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechEngine for FakeEngine {
    fn name(&self) -> &str {
        "fake"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn speak(&self, text: &str, _voice: Option<&VoiceOption>) -> VoiceResult<()> {
        self.spoken.lock().unwrap().push(text.to_string());
        tokio::time::sleep(self.utterance).await;
        Ok(())
    }

    async fn stop(&self) -> VoiceResult<()> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn voices(&self) -> VoiceResult<Vec<LocalVoice>> {
        Ok(Vec::new())
    }
}

/// Playback sink fake with a fixed playback duration.
pub struct FakeSink {
    pub plays: Mutex<Vec<Vec<u8>>>,
    pub stops: AtomicU32,
    duration: Duration,
}

impl FakeSink {
    pub fn new() -> Self {
        Self {
            plays: Mutex::new(Vec::new()),
            stops: AtomicU32::new(0),
            duration: Duration::from_secs(5),
        }
    }

    pub fn play_count(&self) -> usize {
        self.plays.lock().unwrap().len()
    }
}

#[async_trait]
impl PlaybackSink for FakeSink {
    async fn play(&self, audio: Vec<u8>) -> VoiceResult<()> {
        self.plays.lock().unwrap().push(audio);
        tokio::time::sleep(self.duration).await;
        Ok(())
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Recorder fake capturing playback notifications.
pub struct FakeRecorder {
    pub recorded: Mutex<Vec<String>>,
}

impl FakeRecorder {
    pub fn new() -> Self {
        Self {
            recorded: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_ids(&self) -> Vec<String> {
        self.recorded.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaybackRecorder for FakeRecorder {
    async fn record_playback(&self, content_id: &str) {
        self.recorded.lock().unwrap().push(content_id.to_string());
    }
}

pub fn azure_voice() -> VoiceOption {
    VoiceOption {
        id: "v-azure-1".to_string(),
        name: "Aria".to_string(),
        language: "en-US".to_string(),
        provider: VoiceProvider::Azure,
    }
}

pub fn local_voice() -> VoiceOption {
    VoiceOption {
        id: "v-device".to_string(),
        name: "Device".to_string(),
        language: "en-US".to_string(),
        provider: VoiceProvider::Local,
    }
}

pub fn unknown_voice() -> VoiceOption {
    VoiceOption {
        id: "v-polly-1".to_string(),
        name: "Polly".to_string(),
        language: "en-US".to_string(),
        provider: VoiceProvider::Other("polly".to_string()),
    }
}

pub fn prayer() -> orison_voice::PrayerContent {
    orison_voice::PrayerContent::new("p1", "Give us this day our daily bread.")
}
