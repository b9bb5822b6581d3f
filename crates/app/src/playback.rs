//! Rodio-backed playback sink

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use orison_voice::{PlaybackSink, VoiceError, VoiceResult};
use parking_lot::Mutex;
use tracing::debug;

/// Plays fetched audio bytes through the default output device.
///
/// The output stream lives on a blocking thread for the duration of one
/// playback; the rodio sink handle is shared so [`PlaybackSink::stop`] can
/// interrupt from any thread.
pub struct RodioSink {
    current: Arc<Mutex<Option<rodio::Sink>>>,
}

impl Default for RodioSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RodioSink {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl PlaybackSink for RodioSink {
    async fn play(&self, audio: Vec<u8>) -> VoiceResult<()> {
        let slot = Arc::clone(&self.current);
        tokio::task::spawn_blocking(move || -> VoiceResult<()> {
            let stream = rodio::OutputStreamBuilder::open_default_stream()
                .map_err(|e| VoiceError::Playback(e.to_string()))?;
            let sink = rodio::Sink::connect_new(stream.mixer());
            let source = rodio::Decoder::new(Cursor::new(audio))
                .map_err(|e| VoiceError::Playback(e.to_string()))?;
            sink.append(source);
            *slot.lock() = Some(sink);

            // The slot empties when playback drains or stop() takes the sink.
            loop {
                let done = slot.lock().as_ref().map(|s| s.empty()).unwrap_or(true);
                if done {
                    break;
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            slot.lock().take();
            debug!("playback finished");
            Ok(())
        })
        .await
        .map_err(|e| VoiceError::Playback(e.to_string()))?
    }

    fn stop(&self) {
        if let Some(sink) = self.current.lock().take() {
            sink.stop();
            debug!("playback interrupted");
        }
    }
}
