//! Microphone recording with sox `rec`.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;

use mowa_core::CaptureError;
use tokio::process::Command;
use tracing::debug;

pub const DEFAULT_MAX_SECONDS: f32 = 10.0;

/// Records one utterance: starts on sound, stops after trailing silence or
/// when the maximum duration is reached.
#[derive(Debug, Clone)]
pub struct SoxRecorder {
    program: String,
    max_seconds: f32,
    /// Silence threshold, as a sox volume percentage.
    threshold: String,
    /// Seconds of silence that end the recording.
    trailing_silence: f32,
}

impl Default for SoxRecorder {
    fn default() -> Self {
        Self {
            program: "rec".into(),
            max_seconds: DEFAULT_MAX_SECONDS,
            threshold: "1%".into(),
            trailing_silence: 1.5,
        }
    }
}

impl SoxRecorder {
    pub fn new(max_seconds: f32) -> Self {
        Self {
            max_seconds,
            ..Self::default()
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// 16 kHz mono 16-bit WAV, silence-triggered, capped at `max_seconds`.
    pub fn args(&self, path: &Path) -> Vec<String> {
        vec![
            "-q".into(),
            "-r".into(),
            "16000".into(),
            "-c".into(),
            "1".into(),
            "-b".into(),
            "16".into(),
            path.display().to_string(),
            "silence".into(),
            "1".into(),
            "0.1".into(),
            self.threshold.clone(),
            "1".into(),
            self.trailing_silence.to_string(),
            self.threshold.clone(),
            "trim".into(),
            "0".into(),
            self.max_seconds.to_string(),
        ]
    }

    /// Record into `path` and wait for the recorder to finish.
    pub async fn record(&self, path: &Path) -> Result<(), CaptureError> {
        debug!(program = %self.program, file = %path.display(), "Recording");
        let output = Command::new(&self.program)
            .args(self.args(path))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CaptureError::Device(format!(
                    "`{}` not found; install sox to use the microphone",
                    self.program
                )),
                _ => CaptureError::Device(format!("failed to start `{}`: {e}", self.program)),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CaptureError::Device(format!(
                "`{}` exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}
