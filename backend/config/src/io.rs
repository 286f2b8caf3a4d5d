//! Config file read/write with atomic backup rotation.

use crate::schema::MowaConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Number of rolling backups to keep.
const MAX_BACKUPS: usize = 3;

/// Resolve the mowa config directory.
/// Priority: `MOWA_CONFIG_DIR` env > `~/.mowa/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MOWA_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".mowa"))
        .unwrap_or_else(|| PathBuf::from(".mowa"))
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Read the raw config as a JSON value tree, before any processing.
///
/// Returns an empty object if the file doesn't exist (first run).
pub async fn load_config_value(path: &Path) -> Result<serde_json::Value> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(serde_json::Value::Object(Default::default()));
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let value: Option<serde_json::Value> = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(value.unwrap_or_else(|| serde_json::Value::Object(Default::default())))
}

/// Write config to disk atomically (write to temp file, rename).
///
/// Creates a rolling backup of the previous config before overwriting.
pub async fn write_config(config: &MowaConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    if path.exists() {
        rotate_backups(path).await?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    let tmp_path = path.with_extension("yaml.tmp");
    fs::write(&tmp_path, yaml.as_bytes())
        .await
        .with_context(|| format!("Failed to write temp config: {}", tmp_path.display()))?;

    fs::rename(&tmp_path, path)
        .await
        .with_context(|| format!("Failed to rename temp config to: {}", path.display()))?;

    info!(path = %path.display(), "Wrote config");
    Ok(())
}

/// Rotate backup files: config.yaml.bak.1 → .bak.2 → ... → .bak.N
async fn rotate_backups(path: &Path) -> Result<()> {
    for i in (1..MAX_BACKUPS).rev() {
        let old = path.with_extension(format!("yaml.bak.{}", i));
        let new = path.with_extension(format!("yaml.bak.{}", i + 1));
        if old.exists() {
            if let Err(e) = fs::rename(&old, &new).await {
                warn!("Failed to rotate backup {}: {}", old.display(), e);
            }
        }
    }

    let bak = path.with_extension("yaml.bak.1");
    if let Err(e) = fs::copy(path, &bak).await {
        warn!("Failed to create backup {}: {}", bak.display(), e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AppsConfig, MowaConfig};

    async fn load_config(path: &Path) -> MowaConfig {
        serde_json::from_value(load_config_value(path).await.unwrap()).unwrap()
    }

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("config.yaml")).await;
        assert_eq!(cfg, MowaConfig::default());
    }

    #[tokio::test]
    async fn empty_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "").unwrap();
        assert_eq!(load_config(&path).await, MowaConfig::default());
    }

    #[tokio::test]
    async fn write_then_load_and_rotate_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut cfg = MowaConfig::default();
        cfg.apps = Some(AppsConfig {
            music: Some("spotify".into()),
            clock: None,
        });
        write_config(&cfg, &path).await.unwrap();
        assert_eq!(load_config(&path).await, cfg);
        assert!(!path.with_extension("yaml.bak.1").exists());

        write_config(&MowaConfig::default(), &path).await.unwrap();
        write_config(&MowaConfig::default(), &path).await.unwrap();
        assert!(path.with_extension("yaml.bak.1").exists());
        assert!(path.with_extension("yaml.bak.2").exists());
        assert!(!path.with_extension("yaml.tmp").exists());

        let first = load_config(&path.with_extension("yaml.bak.2")).await;
        assert_eq!(first, cfg);
    }

    #[tokio::test]
    async fn invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "speech: [unclosed").unwrap();
        let err = load_config_value(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config YAML"));
    }
}
