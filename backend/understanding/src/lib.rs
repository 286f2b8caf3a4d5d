pub mod capture;
pub mod recorder;
pub mod stt;
pub mod transcript;

pub use capture::{LineCapture, MicrophoneCapture};
pub use recorder::SoxRecorder;
pub use stt::SttEngine;
pub use transcript::clean_transcript;
