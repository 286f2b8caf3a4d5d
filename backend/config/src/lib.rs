//! `mowa-config`: runtime configuration for mowa.
//!
//! Provides:
//! - Typed config schema (speech, tts, weather, browser, apps, logging)
//! - YAML read/write with atomic backup rotation
//! - `${ENV_VAR}` substitution
//! - Config redaction for safe display
//! - Default value application
//! - Validation

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{collect_referenced_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config_value, write_config};
pub use redact::redact;
pub use schema::MowaConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Load a config file, substitute env vars, apply defaults and validate.
///
/// This is the main entry point for loading a config at runtime. Validation
/// findings are logged; errors among them are returned in the report.
pub async fn load_and_prepare(path: &Path) -> Result<(MowaConfig, ValidationReport)> {
    let value = load_config_value(path).await?;
    prepare(value, &std::env::vars().collect())
}

/// The processing pipeline behind `load_and_prepare`, over an explicit env.
pub fn prepare(value: Value, env: &HashMap<String, String>) -> Result<(MowaConfig, ValidationReport)> {
    let value = resolve_env_vars_with(&value, env).context("Failed to resolve env vars in config")?;

    let config: MowaConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }

    Ok((config, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pipeline_substitutes_then_defaults() {
        let env: HashMap<String, String> =
            [("OPENAI_API_KEY".to_string(), "sk-live-123".to_string())].into();
        let raw = json!({"tts": {"apiKey": "${OPENAI_API_KEY}"}, "speech": {"engine": "deepgram"}});

        let (cfg, report) = prepare(raw, &env).unwrap();
        let tts = cfg.tts.unwrap();
        assert_eq!(tts.api_key.as_deref(), Some("sk-live-123"));
        assert_eq!(tts.provider.as_deref(), Some("openai"));
        assert_eq!(cfg.speech.unwrap().engine.as_deref(), Some("deepgram"));
        assert!(report.is_valid());
    }

    #[test]
    fn pipeline_fails_on_missing_env_var() {
        let raw = json!({"speech": {"apiKey": "${DEEPGRAM_API_KEY}"}});
        let err = prepare(raw, &HashMap::new()).unwrap_err();
        assert!(format!("{err:#}").contains("DEEPGRAM_API_KEY"));
    }

    #[test]
    fn pipeline_reports_validation_errors() {
        let raw = json!({"logging": {"level": "loud"}});
        let (_, report) = prepare(raw, &HashMap::new()).unwrap();
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "logging.level");
    }

    #[tokio::test]
    async fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "apps:\n  clock: gnome-clocks\n").unwrap();

        let (cfg, _) = load_and_prepare(&path).await.unwrap();
        assert_eq!(cfg.apps.unwrap().clock.as_deref(), Some("gnome-clocks"));
        assert!(cfg.browser.is_some());
    }
}
