//! Browser launcher
//!
//! Hands URLs to the platform's default opener.

use std::process::Stdio;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use mowa_core::{Browser, Platform};
use tokio::process::Command;
use tracing::info;

/// Opens URLs with `xdg-open`, `open` or `start`, or a configured opener.
pub struct SystemBrowser {
    platform: Platform,
    opener: Option<String>,
}

impl SystemBrowser {
    pub fn new() -> Self {
        Self { platform: Platform::current(), opener: None }
    }

    /// Use a specific opener program instead of the platform default.
    pub fn with_opener(mut self, opener: impl Into<String>) -> Self {
        self.opener = Some(opener.into());
        self
    }

    fn command_for(&self, url: &str) -> Command {
        if let Some(opener) = &self.opener {
            let mut cmd = Command::new(opener);
            cmd.arg(url);
            return cmd;
        }
        opener_command(&self.platform, url)
    }
}

impl Default for SystemBrowser {
    fn default() -> Self {
        Self::new()
    }
}

/// Default opener invocation for a platform.
pub fn opener_command(platform: &Platform, url: &str) -> Command {
    match platform {
        Platform::MacOs => {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        }
        Platform::Windows => {
            // The empty string is the window title consumed by `start`.
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        }
        Platform::Linux | Platform::Other(_) => {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

#[async_trait]
impl Browser for SystemBrowser {
    async fn open_url(&self, url: &str) -> Result<()> {
        info!(url, "Opening browser");
        let mut cmd = self.command_for(url);
        let program = cmd.as_std().get_program().to_string_lossy().into_owned();
        let status = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .with_context(|| format!("Failed to run browser opener `{program}`"))?;
        if !status.success() {
            bail!("Browser opener `{program}` exited with {status}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.as_std().get_args().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn linux_uses_xdg_open() {
        let cmd = opener_command(&Platform::Linux, "https://example.com");
        assert_eq!(cmd.as_std().get_program(), "xdg-open");
        assert_eq!(args(&cmd), ["https://example.com"]);
    }

    #[test]
    fn windows_uses_start_with_empty_title() {
        let cmd = opener_command(&Platform::Windows, "https://example.com");
        assert_eq!(cmd.as_std().get_program(), "cmd");
        assert_eq!(args(&cmd), ["/C", "start", "", "https://example.com"]);
    }

    #[test]
    fn configured_opener_wins() {
        let browser = SystemBrowser::new().with_opener("firefox");
        let cmd = browser.command_for("https://example.com");
        assert_eq!(cmd.as_std().get_program(), "firefox");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn opener_exit_status_is_checked() {
        SystemBrowser::new().with_opener("true").open_url("https://example.com").await.unwrap();

        let err = SystemBrowser::new()
            .with_opener("false")
            .open_url("https://example.com")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("`false` exited with"));
    }
}
