//! Speech-to-Text (STT) engines
//!
//! Transcribe a recorded WAV file through OpenAI Whisper, Deepgram, or a
//! local `whisper-cli` binary.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tokio::process::Command;
use tracing::info;

pub const DEFAULT_LANGUAGE: &str = "pl";

#[derive(Debug)]
pub enum SttEngine {
    WhisperApi {
        api_key: String,
        model: String,
        language: String,
    },
    Deepgram {
        api_key: String,
        model: String,
        language: String,
    },
    WhisperCli {
        model_path: PathBuf,
        language: String,
    },
}

impl SttEngine {
    pub fn whisper(api_key: impl Into<String>) -> Self {
        Self::WhisperApi {
            api_key: api_key.into(),
            model: "whisper-1".into(),
            language: DEFAULT_LANGUAGE.into(),
        }
    }

    pub fn deepgram(api_key: impl Into<String>) -> Self {
        Self::Deepgram {
            api_key: api_key.into(),
            model: "nova-2".into(),
            language: DEFAULT_LANGUAGE.into(),
        }
    }

    pub fn whisper_cli(model_path: impl Into<PathBuf>) -> Self {
        Self::WhisperCli {
            model_path: model_path.into(),
            language: DEFAULT_LANGUAGE.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::WhisperApi { .. } => "whisper",
            Self::Deepgram { .. } => "deepgram",
            Self::WhisperCli { .. } => "whisper-cli",
        }
    }

    /// Transcribe the WAV file at `path`. Returns the raw transcript.
    pub async fn transcribe(&self, path: &Path) -> Result<String> {
        match self {
            Self::WhisperApi { api_key, model, language } => {
                let audio = read_audio(path).await?;
                transcribe_whisper(api_key, model, language, audio).await
            }
            Self::Deepgram { api_key, model, language } => {
                let audio = read_audio(path).await?;
                transcribe_deepgram(api_key, model, language, audio).await
            }
            Self::WhisperCli { model_path, language } => {
                run_whisper_cli(path, model_path, language).await
            }
        }
    }
}

async fn read_audio(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read recording {}", path.display()))
}

async fn transcribe_whisper(api_key: &str, model: &str, language: &str, audio: Vec<u8>) -> Result<String> {
    info!("[STT] Transcribing via OpenAI Whisper");
    let part = reqwest::multipart::Part::bytes(audio)
        .file_name("audio.wav")
        .mime_str("audio/wav")?;
    let form = reqwest::multipart::Form::new()
        .text("model", model.to_string())
        .text("language", language.to_string())
        .part("file", part);
    let client = reqwest::Client::new();
    let resp = client
        .post("https://api.openai.com/v1/audio/transcriptions")
        .bearer_auth(api_key)
        .multipart(form)
        .send()
        .await?;
    if !resp.status().is_success() {
        bail!("Whisper error: {}", resp.text().await.unwrap_or_default());
    }
    let json: serde_json::Value = resp.json().await?;
    Ok(whisper_text(&json))
}

async fn transcribe_deepgram(api_key: &str, model: &str, language: &str, audio: Vec<u8>) -> Result<String> {
    info!("[STT] Transcribing via Deepgram");
    let client = reqwest::Client::new();
    let resp = client
        .post(deepgram_url(model, language))
        .header("Authorization", format!("Token {}", api_key))
        .header("Content-Type", "audio/wav")
        .body(audio)
        .send()
        .await?;
    if !resp.status().is_success() {
        bail!("Deepgram error: {}", resp.text().await.unwrap_or_default());
    }
    let json: serde_json::Value = resp.json().await?;
    Ok(deepgram_text(&json))
}

async fn run_whisper_cli(audio_path: &Path, model_path: &Path, language: &str) -> Result<String> {
    info!("[STT] Transcribing via whisper-cli");
    let output = Command::new("whisper-cli")
        .arg("-m")
        .arg(model_path)
        .arg("-f")
        .arg(audio_path)
        .args(["--no-timestamps", "-l", language])
        .output()
        .await
        .context("failed to run whisper-cli")?;
    if !output.status.success() {
        bail!("whisper-cli failed: {}", String::from_utf8_lossy(&output.stderr).trim());
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn deepgram_url(model: &str, language: &str) -> String {
    format!("https://api.deepgram.com/v1/listen?model={model}&language={language}")
}

fn whisper_text(json: &serde_json::Value) -> String {
    json["text"].as_str().unwrap_or("").to_string()
}

fn deepgram_text(json: &serde_json::Value) -> String {
    json["results"]["channels"][0]["alternatives"][0]["transcript"]
        .as_str()
        .unwrap_or("")
        .to_string()
}
