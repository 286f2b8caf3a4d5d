//! Application launch targets.

use tokio::process::Command;

use mowa_core::Platform;

/// Applications the built-in actions know how to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum App {
    MusicPlayer,
    Clock,
}

/// Platform default command line for an application.
pub fn default_target(app: App, platform: &Platform) -> &'static str {
    match (app, platform) {
        (App::MusicPlayer, Platform::Windows) => "start wmplayer",
        (App::MusicPlayer, Platform::MacOs) => "open -a Music",
        (App::MusicPlayer, _) => "rhythmbox",
        (App::Clock, Platform::Windows) => "start ms-clock:",
        (App::Clock, Platform::MacOs) => "open -a Clock",
        (App::Clock, _) => "gnome-clocks",
    }
}

/// Wrap a command line in the platform shell.
pub fn launch_command(platform: &Platform, target: &str) -> Command {
    match platform {
        Platform::Windows => {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", target]);
            cmd
        }
        _ => {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", target]);
            cmd
        }
    }
}
