//! System mute commands per platform.

use tokio::process::Command;

use mowa_core::{Platform, SystemError};

/// PowerShell snippet pressing the volume-mute media key.
const WINDOWS_MUTE_KEY: &str = "(New-Object -ComObject WScript.Shell).SendKeys([char]173)";

/// Build the command that mutes (`true`) or unmutes (`false`) the default output.
///
/// On Windows the media key toggles, so the caller must only request actual
/// transitions.
pub fn mute_command(platform: &Platform, muted: bool) -> Result<Command, SystemError> {
    match platform {
        Platform::Linux => {
            let mut cmd = Command::new("amixer");
            cmd.args(["set", "Master", if muted { "mute" } else { "unmute" }]);
            Ok(cmd)
        }
        Platform::MacOs => {
            let script = if muted {
                "set volume with output muted"
            } else {
                "set volume without output muted"
            };
            let mut cmd = Command::new("osascript");
            cmd.args(["-e", script]);
            Ok(cmd)
        }
        Platform::Windows => {
            let mut cmd = Command::new("powershell");
            cmd.args(["-NoProfile", "-Command", WINDOWS_MUTE_KEY]);
            Ok(cmd)
        }
        Platform::Other(os) => Err(SystemError::Unsupported { os: os.clone() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.as_std().get_args().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn linux_uses_amixer() {
        let cmd = mute_command(&Platform::Linux, true).unwrap();
        assert_eq!(cmd.as_std().get_program(), "amixer");
        assert_eq!(args(&cmd), ["set", "Master", "mute"]);

        let cmd = mute_command(&Platform::Linux, false).unwrap();
        assert_eq!(args(&cmd), ["set", "Master", "unmute"]);
    }

    #[test]
    fn macos_uses_osascript() {
        let cmd = mute_command(&Platform::MacOs, false).unwrap();
        assert_eq!(cmd.as_std().get_program(), "osascript");
        assert_eq!(args(&cmd), ["-e", "set volume without output muted"]);
    }

    #[test]
    fn unknown_platform_is_unsupported() {
        let err = mute_command(&Platform::Other("haiku".into()), true).unwrap_err();
        assert!(matches!(err, SystemError::Unsupported { os } if os == "haiku"));
    }
}
