use anyhow::Result;
use async_trait::async_trait;

use crate::error::{CaptureError, SystemError};
use crate::types::WeatherReport;

/// Source of recognized utterances (microphone + STT, or typed lines).
#[async_trait]
pub trait SpeechCapture: Send {
    /// Block until one utterance has been captured and recognized.
    async fn listen(&mut self) -> Result<String, CaptureError>;
}

/// Spoken feedback channel.
///
/// Implementations echo the text to the console and play it back before
/// returning, so feedback never overlaps the next capture.
#[async_trait]
pub trait Notify: Send + Sync {
    async fn speak(&self, text: &str) -> Result<()>;
}

/// Weather data source.
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Readings for stations matching `city`.
    ///
    /// `None` means no data could be obtained; transport failures are logged by
    /// the implementation and also surface as `None`.
    async fn get_weather(&self, city: &str) -> Option<WeatherReport>;
}

/// Opens URLs in the user's default browser.
#[async_trait]
pub trait Browser: Send + Sync {
    async fn open_url(&self, url: &str) -> Result<()>;
}

/// OS-level side effects: system mute and application launching.
#[async_trait]
pub trait SystemControl: Send + Sync {
    async fn set_muted(&self, muted: bool) -> Result<(), SystemError>;

    /// Launch an application described by a platform command line.
    ///
    /// Returns once the process has started; it is reaped in the background.
    async fn launch(&self, target: &str) -> Result<(), SystemError>;
}
