//! `SpeechCapture` implementations: microphone + STT, and typed lines.

use std::path::PathBuf;

use async_trait::async_trait;
use mowa_core::{CaptureError, SpeechCapture};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::recorder::SoxRecorder;
use crate::stt::SttEngine;
use crate::transcript::clean_transcript;

// ---------------------------------------------------------------------------
// Microphone
// ---------------------------------------------------------------------------

pub struct MicrophoneCapture {
    recorder: SoxRecorder,
    engine: SttEngine,
    temp_dir: PathBuf,
}

impl MicrophoneCapture {
    pub fn new(recorder: SoxRecorder, engine: SttEngine) -> Self {
        Self {
            recorder,
            engine,
            temp_dir: std::env::temp_dir(),
        }
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    async fn record_and_transcribe(&self, path: &std::path::Path) -> Result<String, CaptureError> {
        self.recorder.record(path).await?;
        let raw = self
            .engine
            .transcribe(path)
            .await
            .map_err(|e| CaptureError::Service(format!("{}: {e:#}", self.engine.name())))?;
        debug!(raw = %raw, "Transcribed");
        clean_transcript(&raw).ok_or(CaptureError::Unintelligible)
    }
}

#[async_trait]
impl SpeechCapture for MicrophoneCapture {
    async fn listen(&mut self) -> Result<String, CaptureError> {
        println!("Słucham...");
        let path = self.temp_dir.join(format!("mowa-rec-{}.wav", Uuid::new_v4()));
        let result = self.record_and_transcribe(&path).await;
        if let Err(e) = tokio::fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(file = %path.display(), error = %e, "Failed to remove recording");
            }
        }
        if let Ok(text) = &result {
            println!("Rozpoznano: {text}");
        }
        result
    }
}

// ---------------------------------------------------------------------------
// Typed lines
// ---------------------------------------------------------------------------

/// Reads one utterance per line. Blank lines are unintelligible; end of input
/// closes the capture.
pub struct LineCapture<R> {
    reader: R,
    prompt: Option<String>,
}

impl<R: AsyncBufRead + Unpin + Send> LineCapture<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, prompt: None }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }
}

async fn show_prompt(prompt: &str) {
    let mut stdout = tokio::io::stdout();
    let _ = stdout.write_all(prompt.as_bytes()).await;
    let _ = stdout.flush().await;
}

impl LineCapture<tokio::io::BufReader<tokio::io::Stdin>> {
    pub fn stdin() -> Self {
        Self::new(tokio::io::BufReader::new(tokio::io::stdin())).with_prompt("> ")
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> SpeechCapture for LineCapture<R> {
    async fn listen(&mut self) -> Result<String, CaptureError> {
        if let Some(prompt) = &self.prompt {
            show_prompt(prompt).await;
        }
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(|e| CaptureError::Device(format!("failed to read input: {e}")))?;
        if read == 0 {
            return Err(CaptureError::Closed);
        }
        let text = line.trim();
        if text.is_empty() {
            return Err(CaptureError::Unintelligible);
        }
        Ok(text.to_string())
    }
}
