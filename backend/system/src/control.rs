use std::process::Stdio;

use async_trait::async_trait;
use mowa_core::{Platform, SystemControl, SystemError};
use tracing::{debug, info, warn};

use crate::apps::launch_command;
use crate::volume::mute_command;

/// `SystemControl` backed by platform commands.
pub struct DesktopControl {
    platform: Platform,
}

impl DesktopControl {
    pub fn new() -> Self {
        Self::for_platform(Platform::current())
    }

    pub fn for_platform(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }
}

impl Default for DesktopControl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemControl for DesktopControl {
    async fn set_muted(&self, muted: bool) -> Result<(), SystemError> {
        let mut cmd = mute_command(&self.platform, muted)?;
        let program = cmd.as_std().get_program().to_string_lossy().into_owned();
        info!(muted, program = %program, "Setting system mute");

        let output = cmd.stdin(Stdio::null()).output().await?;
        if !output.status.success() {
            return Err(SystemError::CommandFailed {
                command: program,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }

    async fn launch(&self, target: &str) -> Result<(), SystemError> {
        info!(target, "Launching application");
        let mut child = launch_command(&self.platform, target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        // The application outlives this call; wait for it in the background
        // so the exited shell is reaped.
        let target = target.to_string();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => debug!(%target, "Application exited"),
                Ok(status) => warn!(%target, %status, "Application exited with failure"),
                Err(e) => warn!(%target, error = %e, "Failed to wait for application"),
            }
        });
        Ok(())
    }
}
