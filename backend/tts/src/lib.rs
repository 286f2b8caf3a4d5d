pub mod engine;
pub mod notifier;
pub mod player;

pub use engine::{create_tts, AudioFormat, ElevenLabsTts, OpenAiTts, TtsProvider, TtsProviderKind, TtsRequest};
pub use notifier::{ConsoleNotifier, SpeechNotifier};
pub use player::AudioPlayer;
