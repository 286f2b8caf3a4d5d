//! mowa runtime configuration schema.
//!
//! Every field is optional in the file; `defaults::apply_all_defaults` fills
//! in the rest after loading.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MowaConfig {
    /// Microphone capture and speech-to-text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech: Option<SpeechConfig>,

    /// Spoken feedback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tts: Option<TtsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherConfig>,

    /// URLs opened by the browser commands
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<BrowserConfig>,

    /// Command lines for the application launchers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apps: Option<AppsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

// ---------------------------------------------------------------------------
// Speech
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    /// `whisper`, `deepgram` or `whisper-cli`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// ggml model file for `whisper-cli`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Upper bound on a single recording
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_seconds: Option<f32>,
}

// ---------------------------------------------------------------------------
// TTS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsConfig {
    /// `openai`, `elevenlabs` or `console`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Player command line, e.g. `mpv --no-video`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
}

// ---------------------------------------------------------------------------
// Weather / browser / apps
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikipedia_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock: Option<String>,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn` or `error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Directory for the rolling JSON log; console only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_yaml() {
        let yaml = r#"
speech:
  engine: whisper-cli
  modelPath: /models/ggml-base.bin
  maxSeconds: 8
browser:
  homeUrl: https://duckduckgo.com
apps:
  music: spotify
"#;
        let cfg: MowaConfig = serde_yaml::from_str(yaml).unwrap();
        let speech = cfg.speech.unwrap();
        assert_eq!(speech.engine.as_deref(), Some("whisper-cli"));
        assert_eq!(speech.model_path.as_deref(), Some("/models/ggml-base.bin"));
        assert_eq!(speech.max_seconds, Some(8.0));
        assert_eq!(cfg.browser.unwrap().home_url.as_deref(), Some("https://duckduckgo.com"));
        assert_eq!(cfg.apps.unwrap().music.as_deref(), Some("spotify"));
        assert!(cfg.tts.is_none());
    }

    #[test]
    fn empty_sections_are_not_serialized() {
        let yaml = serde_yaml::to_string(&MowaConfig::default()).unwrap();
        assert_eq!(yaml.trim(), "{}");
    }
}
