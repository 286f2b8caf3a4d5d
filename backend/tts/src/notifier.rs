//! `Notify` implementations: synthesized speech and console echo.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use mowa_core::Notify;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::{AudioFormat, TtsProvider, TtsRequest};
use crate::player::AudioPlayer;

fn echo(text: &str) {
    println!("[-] {text}");
}

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

/// Prints feedback without audio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notify for ConsoleNotifier {
    async fn speak(&self, text: &str) -> Result<()> {
        echo(text);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Speech
// ---------------------------------------------------------------------------

/// Prints feedback, synthesizes it and plays it to completion.
pub struct SpeechNotifier {
    provider: Box<dyn TtsProvider>,
    player: AudioPlayer,
    temp_dir: PathBuf,
    format: AudioFormat,
}

impl SpeechNotifier {
    pub fn new(provider: Box<dyn TtsProvider>, player: AudioPlayer) -> Self {
        Self {
            provider,
            player,
            temp_dir: std::env::temp_dir(),
            format: AudioFormat::Mp3,
        }
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    fn temp_path(&self) -> PathBuf {
        self.temp_dir
            .join(format!("mowa-tts-{}.{}", Uuid::new_v4(), self.format.extension()))
    }
}

#[async_trait]
impl Notify for SpeechNotifier {
    async fn speak(&self, text: &str) -> Result<()> {
        echo(text);

        let request = TtsRequest {
            format: self.format,
            ..TtsRequest::new(text)
        };
        let audio = self
            .provider
            .synthesize(request)
            .await
            .with_context(|| format!("{} speech synthesis failed", self.provider.name()))?;

        let path = self.temp_path();
        tokio::fs::write(&path, &audio)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(provider = self.provider.name(), bytes = audio.len(), "[TTS] Playing feedback");

        let played = self.player.play(&path).await;
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!(file = %path.display(), error = %e, "Failed to remove temporary audio");
        }
        played
    }
}
