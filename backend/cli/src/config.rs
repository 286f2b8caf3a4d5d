use std::path::PathBuf;

use mowa_browser::SearchEngine;
use mowa_config::MowaConfig;
use mowa_core::Platform;
use mowa_system::{default_target, App};

/// Speech-to-text backend for microphone input.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechSettings {
    WhisperApi { api_key: Option<String>, model: Option<String> },
    Deepgram { api_key: Option<String>, model: Option<String> },
    WhisperCli { model_path: PathBuf },
}

/// Spoken feedback backend.
#[derive(Debug, Clone, PartialEq)]
pub enum TtsSettings {
    OpenAi { api_key: Option<String>, model: Option<String>, voice: Option<String> },
    ElevenLabs { api_key: Option<String>, model: Option<String>, voice: Option<String> },
    Console,
}

impl TtsSettings {
    pub fn api_key(&self) -> Option<&str> {
        match self {
            Self::OpenAi { api_key, .. } | Self::ElevenLabs { api_key, .. } => api_key.as_deref(),
            Self::Console => None,
        }
    }
}

/// Runtime settings resolved from the prepared config file.
///
/// API keys missing from the file fall back to the conventional environment
/// variables (`OPENAI_API_KEY`, `DEEPGRAM_API_KEY`, `ELEVENLABS_API_KEY`).
#[derive(Debug, Clone)]
pub struct Settings {
    pub platform: Platform,
    pub speech: SpeechSettings,
    pub language: String,
    pub max_seconds: f32,
    pub tts: TtsSettings,
    pub player: Option<String>,
    pub weather_endpoint: String,
    pub search: SearchEngine,
    pub music: String,
    pub clock: String,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    pub fn from_config(config: &MowaConfig) -> Self {
        Self::resolve(config, Platform::current(), |name| std::env::var(name).ok())
    }

    /// Build settings for `platform`, reading fallbacks through `env`.
    pub fn resolve(
        config: &MowaConfig,
        platform: Platform,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let key = |configured: &Option<String>, var: &str| {
            configured
                .clone()
                .filter(|k| !k.trim().is_empty())
                .or_else(|| env(var).filter(|k| !k.is_empty()))
        };

        let speech_cfg = config.speech.clone().unwrap_or_default();
        let speech = match speech_cfg.engine.as_deref() {
            Some("deepgram") => SpeechSettings::Deepgram {
                api_key: key(&speech_cfg.api_key, "DEEPGRAM_API_KEY"),
                model: speech_cfg.model.clone(),
            },
            Some("whisper-cli") => SpeechSettings::WhisperCli {
                model_path: speech_cfg.model_path.clone().unwrap_or_default().into(),
            },
            _ => SpeechSettings::WhisperApi {
                api_key: key(&speech_cfg.api_key, "OPENAI_API_KEY"),
                model: speech_cfg.model.clone(),
            },
        };

        let tts_cfg = config.tts.clone().unwrap_or_default();
        let tts = match tts_cfg.provider.as_deref() {
            Some("console") => TtsSettings::Console,
            Some("elevenlabs") => TtsSettings::ElevenLabs {
                api_key: key(&tts_cfg.api_key, "ELEVENLABS_API_KEY"),
                model: tts_cfg.model.clone(),
                voice: tts_cfg.voice.clone(),
            },
            _ => TtsSettings::OpenAi {
                api_key: key(&tts_cfg.api_key, "OPENAI_API_KEY"),
                model: tts_cfg.model.clone(),
                voice: tts_cfg.voice.clone(),
            },
        };

        let browser = config.browser.clone().unwrap_or_default();
        let defaults = SearchEngine::default();
        let search = SearchEngine {
            home_url: browser.home_url.unwrap_or(defaults.home_url),
            search_url: browser.search_url.unwrap_or(defaults.search_url),
            wikipedia_url: browser.wikipedia_url.unwrap_or(defaults.wikipedia_url),
        };

        let apps = config.apps.clone().unwrap_or_default();
        let logging = config.logging.clone().unwrap_or_default();

        Self {
            music: apps
                .music
                .unwrap_or_else(|| default_target(App::MusicPlayer, &platform).to_string()),
            clock: apps
                .clock
                .unwrap_or_else(|| default_target(App::Clock, &platform).to_string()),
            platform,
            speech,
            language: speech_cfg.language.unwrap_or_else(|| "pl".to_string()),
            max_seconds: speech_cfg.max_seconds.unwrap_or(10.0),
            tts,
            player: tts_cfg.player,
            weather_endpoint: config
                .weather
                .as_ref()
                .and_then(|w| w.endpoint.clone())
                .unwrap_or_else(|| mowa_weather::DEFAULT_ENDPOINT.to_string()),
            search,
            log_level: logging.level.unwrap_or_else(|| "info".to_string()),
            log_dir: logging.dir.map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mowa_config::schema::{AppsConfig, SpeechConfig, TtsConfig};

    fn env_with(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name: &str| pairs.iter().find(|(k, _)| *k == name).map(|(_, v)| v.to_string())
    }

    #[test]
    fn defaults_use_platform_apps_and_env_keys() {
        let cfg = mowa_config::apply_all_defaults(MowaConfig::default());
        let settings = Settings::resolve(&cfg, Platform::Linux, env_with(&[("OPENAI_API_KEY", "sk-env")]));

        assert_eq!(
            settings.speech,
            SpeechSettings::WhisperApi { api_key: Some("sk-env".into()), model: None }
        );
        assert_eq!(settings.tts.api_key(), Some("sk-env"));
        assert_eq!(settings.music, "rhythmbox");
        assert_eq!(settings.clock, "gnome-clocks");
        assert_eq!(settings.search, SearchEngine::default());
        assert_eq!(settings.language, "pl");
        assert!(settings.log_dir.is_none());
    }

    #[test]
    fn configured_values_win_over_env() {
        let mut cfg = MowaConfig::default();
        cfg.speech = Some(SpeechConfig {
            engine: Some("deepgram".into()),
            api_key: Some("dg-file".into()),
            ..Default::default()
        });
        cfg.tts = Some(TtsConfig {
            provider: Some("elevenlabs".into()),
            voice: Some("Adam".into()),
            ..Default::default()
        });
        cfg.apps = Some(AppsConfig {
            music: Some("spotify".into()),
            clock: None,
        });
        let env = env_with(&[("DEEPGRAM_API_KEY", "dg-env"), ("ELEVENLABS_API_KEY", "el-env")]);
        let settings = Settings::resolve(&cfg, Platform::MacOs, env);

        assert_eq!(
            settings.speech,
            SpeechSettings::Deepgram { api_key: Some("dg-file".into()), model: None }
        );
        assert_eq!(
            settings.tts,
            TtsSettings::ElevenLabs {
                api_key: Some("el-env".into()),
                model: None,
                voice: Some("Adam".into()),
            }
        );
        assert_eq!(settings.music, "spotify");
        assert_eq!(settings.clock, "open -a Clock");
    }

    #[test]
    fn console_tts_needs_no_key() {
        let mut cfg = MowaConfig::default();
        cfg.tts = Some(TtsConfig {
            provider: Some("console".into()),
            ..Default::default()
        });
        let settings = Settings::resolve(&cfg, Platform::Linux, |_| None);
        assert_eq!(settings.tts, TtsSettings::Console);
        assert_eq!(settings.tts.api_key(), None);
    }
}
