//! Audio playback through an external player process.

use std::path::Path;

use anyhow::{Context, Result, bail};
use mowa_core::Platform;
use tokio::process::Command;
use tracing::debug;

/// External program that plays one audio file and exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPlayer {
    program: String,
    args: Vec<String>,
}

impl AudioPlayer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `afplay` on macOS, `ffplay` without a window everywhere else.
    pub fn for_platform(platform: &Platform) -> Self {
        match platform {
            Platform::MacOs => Self::new("afplay", Vec::new()),
            _ => Self::new(
                "ffplay",
                ["-nodisp", "-autoexit", "-loglevel", "quiet"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
        }
    }

    /// Parse a configured player command line such as `mpv --no-video`.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(String::from);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Play `path` and wait for the player to finish.
    pub async fn play(&self, path: &Path) -> Result<()> {
        debug!(player = %self.program, file = %path.display(), "Playing audio");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await
            .with_context(|| format!("failed to start audio player `{}`", self.program))?;
        if !status.success() {
            bail!("audio player `{}` exited with {}", self.program, status);
        }
        Ok(())
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::for_platform(&Platform::current())
    }
}
