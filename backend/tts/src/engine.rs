/// TTS provider trait and implementations (ElevenLabs + OpenAI TTS).
use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

pub const OPENAI_DEFAULT_MODEL: &str = "tts-1";
pub const OPENAI_DEFAULT_VOICE: &str = "nova";
pub const ELEVENLABS_DEFAULT_MODEL: &str = "eleven_multilingual_v2";
pub const ELEVENLABS_DEFAULT_VOICE: &str = "21m00Tcm4TlvDq8ikWAM";

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Audio container produced by a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
}

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
        }
    }

    pub fn openai_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
        }
    }
}

/// A TTS request.
#[derive(Debug, Clone)]
pub struct TtsRequest {
    pub text: String,
    pub voice: Option<String>,
    pub format: AudioFormat,
    pub speed: f32,
}

impl TtsRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

impl Default for TtsRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            voice: None,
            format: AudioFormat::Mp3,
            speed: 1.0,
        }
    }
}

/// Returns raw audio bytes.
#[async_trait]
pub trait TtsProvider: Send + Sync {
    async fn synthesize(&self, req: TtsRequest) -> Result<Bytes>;

    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// OpenAI TTS
// ---------------------------------------------------------------------------

pub struct OpenAiTts {
    api_key: String,
    model: String,
    default_voice: String,
    client: Client,
}

impl OpenAiTts {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: OPENAI_DEFAULT_MODEL.to_string(),
            default_voice: OPENAI_DEFAULT_VOICE.to_string(),
            client: Client::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.default_voice = voice.into();
        self
    }

    fn body(&self, req: TtsRequest) -> OpenAiTtsBody {
        OpenAiTtsBody {
            model: self.model.clone(),
            input: req.text,
            voice: req.voice.unwrap_or_else(|| self.default_voice.clone()),
            response_format: req.format.openai_str().to_string(),
            speed: req.speed,
        }
    }
}

#[derive(Serialize)]
struct OpenAiTtsBody {
    model: String,
    input: String,
    voice: String,
    response_format: String,
    speed: f32,
}

#[async_trait]
impl TtsProvider for OpenAiTts {
    async fn synthesize(&self, req: TtsRequest) -> Result<Bytes> {
        let body = self.body(req);
        info!("[TTS/OpenAI] Synthesizing with model={}", body.model);
        let bytes = self
            .client
            .post("https://api.openai.com/v1/audio/speech")
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

// ---------------------------------------------------------------------------
// ElevenLabs TTS
// ---------------------------------------------------------------------------

pub struct ElevenLabsTts {
    api_key: String,
    default_voice_id: String,
    model_id: String,
    client: Client,
}

impl ElevenLabsTts {
    pub fn new(api_key: String, voice_id: Option<String>) -> Self {
        Self {
            api_key,
            default_voice_id: voice_id.unwrap_or_else(|| ELEVENLABS_DEFAULT_VOICE.to_string()),
            model_id: ELEVENLABS_DEFAULT_MODEL.to_string(),
            client: Client::new(),
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    fn body(&self, req: TtsRequest) -> ElevenLabsBody {
        ElevenLabsBody {
            text: req.text,
            model_id: self.model_id.clone(),
            voice_settings: ElevenLabsVoiceSettings {
                stability: 0.5,
                similarity_boost: 0.75,
                speed: req.speed,
            },
        }
    }
}

#[derive(Serialize)]
struct ElevenLabsBody {
    text: String,
    model_id: String,
    voice_settings: ElevenLabsVoiceSettings,
}

#[derive(Serialize)]
struct ElevenLabsVoiceSettings {
    stability: f32,
    similarity_boost: f32,
    speed: f32,
}

#[async_trait]
impl TtsProvider for ElevenLabsTts {
    async fn synthesize(&self, req: TtsRequest) -> Result<Bytes> {
        let voice_id = req.voice.clone().unwrap_or_else(|| self.default_voice_id.clone());
        let url = format!("https://api.elevenlabs.io/v1/text-to-speech/{}", voice_id);
        let body = self.body(req);
        info!("[TTS/ElevenLabs] Synthesizing voice_id={}", voice_id);
        let bytes = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .header("accept", "audio/mpeg")
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes)
    }

    fn name(&self) -> &'static str {
        "elevenlabs"
    }
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

pub enum TtsProviderKind {
    OpenAi {
        api_key: String,
        model: Option<String>,
        voice: Option<String>,
    },
    ElevenLabs {
        api_key: String,
        model: Option<String>,
        voice_id: Option<String>,
    },
}

pub fn create_tts(kind: TtsProviderKind) -> Box<dyn TtsProvider> {
    match kind {
        TtsProviderKind::OpenAi { api_key, model, voice } => {
            let mut tts = OpenAiTts::new(api_key);
            if let Some(model) = model {
                tts = tts.with_model(model);
            }
            if let Some(voice) = voice {
                tts = tts.with_voice(voice);
            }
            Box::new(tts)
        }
        TtsProviderKind::ElevenLabs { api_key, model, voice_id } => {
            let mut tts = ElevenLabsTts::new(api_key, voice_id);
            if let Some(model) = model {
                tts = tts.with_model(model);
            }
            Box::new(tts)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn openai_body_uses_defaults() {
        let tts = OpenAiTts::new("sk-test".into());
        let body = serde_json::to_value(tts.body(TtsRequest::new("Do zobaczenia!"))).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "tts-1",
                "input": "Do zobaczenia!",
                "voice": "nova",
                "response_format": "mp3",
                "speed": 1.0,
            })
        );
    }

    #[test]
    fn openai_request_voice_overrides_default() {
        let tts = OpenAiTts::new("sk-test".into()).with_voice("alloy");
        let mut req = TtsRequest::new("x");
        req.voice = Some("onyx".into());
        assert_eq!(tts.body(req).voice, "onyx");
    }

    #[test]
    fn elevenlabs_body_uses_multilingual_model() {
        let tts = ElevenLabsTts::new("key".into(), None);
        let body = serde_json::to_value(tts.body(TtsRequest::new("Otwieram zegar"))).unwrap();
        assert_eq!(body["model_id"], "eleven_multilingual_v2");
        assert_eq!(body["text"], "Otwieram zegar");
    }

    #[test]
    fn factory_picks_provider() {
        let tts = create_tts(TtsProviderKind::ElevenLabs {
            api_key: "k".into(),
            model: None,
            voice_id: Some("voice".into()),
        });
        assert_eq!(tts.name(), "elevenlabs");

        let tts = create_tts(TtsProviderKind::OpenAi {
            api_key: "k".into(),
            model: Some("tts-1-hd".into()),
            voice: None,
        });
        assert_eq!(tts.name(), "openai");
    }
}
