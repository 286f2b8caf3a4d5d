pub mod error;
pub mod platform;
pub mod traits;
pub mod types;

pub use error::{CaptureError, SystemError};
pub use platform::Platform;
pub use traits::{Browser, Notify, SpeechCapture, SystemControl, WeatherClient};
pub use types::{WeatherReading, WeatherReport};
