use std::sync::Arc;

use anyhow::Context;
use orison_app::{AppConfig, HttpPlaybackRecorder, RodioSink};
use orison_orchestrator::AudioOrchestrator;
use orison_remote::{AuthTokenProvider, RemoteAudioClient, StaticTokenProvider};
use orison_voice::{
    PlaybackRecorder, PlaybackSink, PrayerContent, RemoteAudioCache, SpeechEngine, VoiceOption,
    VoiceProvider,
};
use orison_voice_espeak::EspeakEngine;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    tracing::info!("Starting Orison");

    let cfg = AppConfig::load().context("loading configuration")?;

    let auth: Arc<dyn AuthTokenProvider> = match &cfg.auth_token {
        Some(token) => Arc::new(StaticTokenProvider::new(token.clone())),
        None => Arc::new(StaticTokenProvider::empty()),
    };

    let cache: Arc<dyn RemoteAudioCache> =
        Arc::new(RemoteAudioClient::new(cfg.api_base_url.clone(), auth.clone()));
    let engine: Arc<dyn SpeechEngine> = match cfg.speech_rate_wpm {
        Some(rate) => Arc::new(EspeakEngine::with_rate(rate)),
        None => Arc::new(EspeakEngine::new()),
    };
    let sink: Arc<dyn PlaybackSink> = Arc::new(RodioSink::new());
    let recorder: Arc<dyn PlaybackRecorder> = Arc::new(HttpPlaybackRecorder::new(
        cfg.api_base_url.clone(),
        auth.clone(),
    ));

    if !engine.is_available().await {
        tracing::warn!("eSpeak not found; device-voice playback will fail");
    }

    let orchestrator = Arc::new(AudioOrchestrator::new(
        cache,
        engine.clone(),
        sink,
        recorder,
        cfg.poll_policy(),
    ));

    println!("commands: play <prayer-id> <voice-id> <provider> <text...> | stop | state | voices | quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["play", prayer_id, voice_id, provider, text @ ..] if !text.is_empty() => {
                let content = PrayerContent::new(*prayer_id, text.join(" "));
                let voice = VoiceOption {
                    id: voice_id.to_string(),
                    name: voice_id.to_string(),
                    language: "en-US".to_string(),
                    provider: VoiceProvider::from(provider.to_string()),
                };
                orchestrator.play_prayer(content, voice).await;
            }
            ["stop"] => orchestrator.stop().await,
            ["state"] => {
                let label = orchestrator.action_label();
                println!(
                    "state: {:?} | speaking: {} | action: {} ({})",
                    orchestrator.state(),
                    orchestrator.is_speaking(),
                    label.text,
                    if label.enabled { "enabled" } else { "disabled" }
                );
                if let Some(err) = orchestrator.last_error() {
                    println!("last error: {}", err);
                }
            }
            ["voices"] => match engine.voices().await {
                Ok(voices) => {
                    for v in voices {
                        println!("{}\t{}\t{}", v.id, v.language, v.name);
                    }
                }
                Err(e) => println!("could not list voices: {}", e),
            },
            ["quit"] | ["exit"] => break,
            [] => {}
            _ => println!("unrecognized command"),
        }
    }

    orchestrator.stop().await;
    tracing::info!("Orison stopped");
    Ok(())
}
