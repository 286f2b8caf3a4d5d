//! OS-level actions: system mute and application launching.

pub mod apps;
pub mod control;
pub mod volume;

pub use apps::{default_target, launch_command, App};
pub use control::DesktopControl;
pub use volume::mute_command;
