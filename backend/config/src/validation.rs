//! Config validation with user-friendly error messages.

use crate::schema::MowaConfig;
use thiserror::Error;

pub const SPEECH_ENGINES: &[&str] = &["whisper", "deepgram", "whisper-cli"];
pub const TTS_PROVIDERS: &[&str] = &["openai", "elevenlabs", "console"];
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &MowaConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_speech(config, &mut report);
    validate_tts(config, &mut report);
    validate_urls(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).unwrap_or("").is_empty()
}

fn validate_speech(config: &MowaConfig, report: &mut ValidationReport) {
    let Some(speech) = &config.speech else { return };

    if let Some(engine) = speech.engine.as_deref() {
        if !SPEECH_ENGINES.contains(&engine) {
            report.error(
                "speech.engine",
                format!("Unknown engine '{engine}'. Use one of: {}", SPEECH_ENGINES.join(", ")),
            );
        } else if engine == "whisper-cli" {
            if is_blank(&speech.model_path) {
                report.error("speech.modelPath", "whisper-cli requires a model file");
            }
        } else if is_blank(&speech.api_key) {
            report.warn(
                "speech.apiKey",
                format!("No API key for '{engine}'; microphone input will fail"),
            );
        }
    }

    if let Some(max) = speech.max_seconds {
        if max <= 0.0 {
            report.error("speech.maxSeconds", "maxSeconds must be > 0");
        } else if max > 60.0 {
            report.warn("speech.maxSeconds", format!("{max}s is unusually long for one command"));
        }
    }
}

fn validate_tts(config: &MowaConfig, report: &mut ValidationReport) {
    let Some(tts) = &config.tts else { return };
    let Some(provider) = tts.provider.as_deref() else { return };

    if !TTS_PROVIDERS.contains(&provider) {
        report.error(
            "tts.provider",
            format!("Unknown provider '{provider}'. Use one of: {}", TTS_PROVIDERS.join(", ")),
        );
    } else if provider != "console" && is_blank(&tts.api_key) {
        report.warn(
            "tts.apiKey",
            format!("No API key for '{provider}'; feedback will only be printed"),
        );
    }

    if tts.player.is_some() && is_blank(&tts.player) {
        report.error("tts.player", "player command cannot be empty");
    }
}

fn validate_urls(config: &MowaConfig, report: &mut ValidationReport) {
    let mut check = |path: &str, value: &Option<String>| {
        if let Some(url) = value {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                report.error(path, format!("'{url}' is not an http(s) URL"));
            }
        }
    };
    if let Some(browser) = &config.browser {
        check("browser.homeUrl", &browser.home_url);
        check("browser.searchUrl", &browser.search_url);
        check("browser.wikipediaUrl", &browser.wikipedia_url);
    }
    if let Some(weather) = &config.weather {
        check("weather.endpoint", &weather.endpoint);
    }
}

fn validate_logging(config: &MowaConfig, report: &mut ValidationReport) {
    let Some(level) = config.logging.as_ref().and_then(|l| l.level.as_deref()) else {
        return;
    };
    if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        report.error(
            "logging.level",
            format!("Unknown level '{level}'. Use one of: {}", LOG_LEVELS.join(", ")),
        );
    }
}
