//! CLI Doctor Command
//!
//! Checks that the external tools and keys the configured backends need are
//! present, that `${VAR}` references in the config file are set, and that
//! every registered phrase is reachable.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use mowa_commands::CommandTable;
use mowa_config::ValidationReport;
use serde_json::Value;
use mowa_core::Platform;
use mowa_system::mute_command;
use mowa_tts::AudioPlayer;
use mowa_understanding::SoxRecorder;

use crate::config::{Settings, SpeechSettings, TtsSettings};
use crate::terminal_output::{note_error, note_info, note_success, note_warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub severity: Severity,
    pub message: String,
}

impl Check {
    fn ok(message: impl Into<String>) -> Self {
        Self { severity: Severity::Ok, message: message.into() }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self { severity: Severity::Warn, message: message.into() }
    }

    fn error(message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, message: message.into() }
    }

    /// A config that could not be loaded; the other checks run on defaults.
    pub fn load_failure(err: &anyhow::Error) -> Self {
        Self::error(format!("config not loaded, checking defaults instead: {err:#}"))
    }
}

/// Find `program` on `path_var` (a `PATH`-style list).
fn find_in_path(program: &str, path_var: Option<&std::ffi::OsStr>) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let path_var = path_var?;
    env::split_paths(path_var).find_map(|dir| {
        let full = dir.join(program);
        if full.is_file() {
            return Some(full);
        }
        let exe = dir.join(format!("{program}.exe"));
        exe.is_file().then_some(exe)
    })
}

fn tool_check(
    what: &str,
    program: &str,
    required: bool,
    path_var: Option<&std::ffi::OsStr>,
) -> Check {
    match find_in_path(program, path_var) {
        Some(found) => Check::ok(format!("{what}: {program} ({})", found.display())),
        None if required => Check::error(format!("{what}: `{program}` not found on PATH")),
        None => Check::warn(format!("{what}: `{program}` not found on PATH")),
    }
}

fn opener_program(platform: &Platform) -> &'static str {
    match platform {
        Platform::MacOs => "open",
        Platform::Windows => "cmd",
        Platform::Linux | Platform::Other(_) => "xdg-open",
    }
}

/// External tool checks for the configured backends.
pub fn tool_checks(settings: &Settings, path_var: Option<&std::ffi::OsStr>) -> Vec<Check> {
    let mut checks = Vec::new();

    let recorder = SoxRecorder::new(settings.max_seconds);
    checks.push(tool_check("Microphone recorder", recorder.program(), false, path_var));

    if let SpeechSettings::WhisperCli { model_path } = &settings.speech {
        checks.push(tool_check("Local transcription", "whisper-cli", true, path_var));
        if model_path.is_file() {
            checks.push(Check::ok(format!("Whisper model: {}", model_path.display())));
        } else {
            checks.push(Check::error(format!(
                "Whisper model not found: {}",
                model_path.display()
            )));
        }
    }

    if !matches!(settings.tts, TtsSettings::Console) {
        let player = settings
            .player
            .as_deref()
            .and_then(AudioPlayer::from_command_line)
            .unwrap_or_else(|| AudioPlayer::for_platform(&settings.platform));
        checks.push(tool_check("Audio player", player.program(), true, path_var));
    }

    checks.push(tool_check(
        "Browser opener",
        opener_program(&settings.platform),
        true,
        path_var,
    ));

    match mute_command(&settings.platform, true) {
        Ok(cmd) => {
            let program = cmd.as_std().get_program().to_string_lossy().into_owned();
            checks.push(tool_check("Silent mode", &program, false, path_var));
        }
        Err(e) => checks.push(Check::warn(format!("Silent mode: {e}"))),
    }

    checks
}

/// API key presence for the configured backends.
pub fn key_checks(settings: &Settings) -> Vec<Check> {
    let mut checks = Vec::new();

    match &settings.speech {
        SpeechSettings::WhisperApi { api_key, .. } => {
            checks.push(key_check("Speech (whisper)", api_key.is_some(), "OPENAI_API_KEY"))
        }
        SpeechSettings::Deepgram { api_key, .. } => {
            checks.push(key_check("Speech (deepgram)", api_key.is_some(), "DEEPGRAM_API_KEY"))
        }
        SpeechSettings::WhisperCli { .. } => checks.push(Check::ok("Speech (whisper-cli): no key needed")),
    }

    match &settings.tts {
        TtsSettings::OpenAi { api_key, .. } => {
            // Missing TTS key means console echo only.
            checks.push(soft(key_check("TTS (openai)", api_key.is_some(), "OPENAI_API_KEY")))
        }
        TtsSettings::ElevenLabs { api_key, .. } => checks.push(soft(key_check(
            "TTS (elevenlabs)",
            api_key.is_some(),
            "ELEVENLABS_API_KEY",
        ))),
        TtsSettings::Console => checks.push(Check::ok("TTS: console output only")),
    }

    checks
}

fn key_check(what: &str, present: bool, var: &str) -> Check {
    if present {
        Check::ok(format!("{what}: API key set"))
    } else {
        Check::error(format!("{what}: API key missing (set it in config or {var})"))
    }
}

fn soft(check: Check) -> Check {
    match check.severity {
        Severity::Error => Check { severity: Severity::Warn, ..check },
        _ => check,
    }
}

/// Phrases the shortest-match parser can never reach.
pub fn phrase_checks(table: &CommandTable) -> Vec<Check> {
    let shadowed = table.shadowed_phrases();
    if shadowed.is_empty() {
        return vec![Check::ok(format!("{} command phrases, none shadowed", table.len()))];
    }
    shadowed
        .into_iter()
        .map(|(short, long)| Check::warn(format!("\"{long}\" is unreachable: \"{short}\" matches first")))
        .collect()
}

pub fn config_checks(report: &ValidationReport) -> Vec<Check> {
    let mut checks: Vec<Check> = report
        .errors
        .iter()
        .map(|e| Check::error(format!("config {}: {}", e.path, e.message)))
        .collect();
    checks.extend(
        report
            .warnings
            .iter()
            .map(|w| Check::warn(format!("config {}: {}", w.path, w.message))),
    );
    if checks.is_empty() {
        checks.push(Check::ok("Configuration is valid"));
    }
    checks
}

/// `${VAR}` references in the raw config file, checked against `lookup`.
pub fn env_checks(raw: &Value, lookup: impl Fn(&str) -> Option<String>) -> Vec<Check> {
    let vars = mowa_config::collect_referenced_vars(raw);
    if vars.is_empty() {
        return vec![Check::ok("Config references no environment variables")];
    }
    vars.into_iter()
        .map(|var| match lookup(&var) {
            Some(value) if !value.is_empty() => Check::ok(format!("${{{var}}} is set")),
            _ => Check::error(format!("${{{var}}} is referenced in the config but not set")),
        })
        .collect()
}

/// Executes the full doctor diagnosis. Returns whether every check passed
/// without errors.
///
/// `file_checks` covers the config file itself: its env references and,
/// when it could not be loaded, the load failure.
pub fn run(
    settings: &Settings,
    table: &CommandTable,
    report: &ValidationReport,
    file_checks: Vec<Check>,
) -> Result<bool> {
    note_info("Running mowa doctor");

    let path_var = env::var_os("PATH");
    let mut configuration = file_checks;
    configuration.extend(config_checks(report));
    let sections = [
        ("Configuration", configuration),
        ("External tools", tool_checks(settings, path_var.as_deref())),
        ("API keys", key_checks(settings)),
        ("Command phrases", phrase_checks(table)),
    ];

    let mut healthy = true;
    for (title, checks) in sections {
        println!("\n{title}:");
        for check in checks {
            match check.severity {
                Severity::Ok => note_success(&check.message),
                Severity::Warn => note_warn(&check.message),
                Severity::Error => {
                    healthy = false;
                    note_error(&check.message);
                }
            }
        }
    }

    println!();
    if healthy {
        note_success("All checks passed");
    } else {
        note_error("Some checks failed; fix the errors above");
    }
    Ok(healthy)
}
