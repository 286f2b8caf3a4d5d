//! Config defaults: applies default values to parsed config.

use crate::schema::{
    BrowserConfig, LoggingConfig, MowaConfig, SpeechConfig, TtsConfig, WeatherConfig,
};

pub const DEFAULT_SPEECH_ENGINE: &str = "whisper";
pub const DEFAULT_LANGUAGE: &str = "pl";
pub const DEFAULT_MAX_SECONDS: f32 = 10.0;
pub const DEFAULT_TTS_PROVIDER: &str = "openai";
pub const DEFAULT_WEATHER_ENDPOINT: &str = "https://danepubliczne.imgw.pl/api/data/meteo/";
pub const DEFAULT_HOME_URL: &str = "https://www.google.com";
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search?q=";
pub const DEFAULT_WIKIPEDIA_URL: &str = "https://pl.wikipedia.org/wiki/";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
///
/// Application command lines are left unset; they depend on the platform and
/// are resolved when the launchers are built.
pub fn apply_all_defaults(config: MowaConfig) -> MowaConfig {
    let config = apply_speech_defaults(config);
    let config = apply_tts_defaults(config);
    let config = apply_weather_defaults(config);
    let config = apply_browser_defaults(config);
    apply_logging_defaults(config)
}

fn fill(slot: &mut Option<String>, value: &str) {
    if slot.is_none() {
        *slot = Some(value.to_string());
    }
}

fn apply_speech_defaults(mut config: MowaConfig) -> MowaConfig {
    let speech = config.speech.get_or_insert_with(SpeechConfig::default);
    fill(&mut speech.engine, DEFAULT_SPEECH_ENGINE);
    fill(&mut speech.language, DEFAULT_LANGUAGE);
    if speech.max_seconds.is_none() {
        speech.max_seconds = Some(DEFAULT_MAX_SECONDS);
    }
    config
}

fn apply_tts_defaults(mut config: MowaConfig) -> MowaConfig {
    let tts = config.tts.get_or_insert_with(TtsConfig::default);
    fill(&mut tts.provider, DEFAULT_TTS_PROVIDER);
    config
}

fn apply_weather_defaults(mut config: MowaConfig) -> MowaConfig {
    let weather = config.weather.get_or_insert_with(WeatherConfig::default);
    fill(&mut weather.endpoint, DEFAULT_WEATHER_ENDPOINT);
    config
}

fn apply_browser_defaults(mut config: MowaConfig) -> MowaConfig {
    let browser = config.browser.get_or_insert_with(BrowserConfig::default);
    fill(&mut browser.home_url, DEFAULT_HOME_URL);
    fill(&mut browser.search_url, DEFAULT_SEARCH_URL);
    fill(&mut browser.wikipedia_url, DEFAULT_WIKIPEDIA_URL);
    config
}

fn apply_logging_defaults(mut config: MowaConfig) -> MowaConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    fill(&mut logging.level, DEFAULT_LOG_LEVEL);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_section() {
        let cfg = apply_all_defaults(MowaConfig::default());
        let speech = cfg.speech.unwrap();
        assert_eq!(speech.engine.as_deref(), Some("whisper"));
        assert_eq!(speech.language.as_deref(), Some("pl"));
        assert_eq!(speech.max_seconds, Some(DEFAULT_MAX_SECONDS));
        assert_eq!(cfg.tts.unwrap().provider.as_deref(), Some("openai"));
        assert_eq!(cfg.weather.unwrap().endpoint.as_deref(), Some(DEFAULT_WEATHER_ENDPOINT));
        assert_eq!(cfg.browser.unwrap().wikipedia_url.as_deref(), Some(DEFAULT_WIKIPEDIA_URL));
        assert_eq!(cfg.logging.unwrap().level.as_deref(), Some("info"));
        assert!(cfg.apps.is_none());
    }

    #[test]
    fn does_not_override_user_values() {
        let mut cfg = MowaConfig::default();
        cfg.speech = Some(SpeechConfig {
            engine: Some("deepgram".into()),
            max_seconds: Some(4.0),
            ..Default::default()
        });
        let cfg = apply_all_defaults(cfg);
        let speech = cfg.speech.unwrap();
        assert_eq!(speech.engine.as_deref(), Some("deepgram"));
        assert_eq!(speech.max_seconds, Some(4.0));
        assert_eq!(speech.language.as_deref(), Some("pl"));
    }
}
