mod app;
mod commands_cmd;
mod config;
mod doctor_cmd;
mod terminal_output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use mowa_commands::{Dispatch, Interpreter};
use mowa_config::{MowaConfig, ValidationReport};
use mowa_understanding::LineCapture;

use config::Settings;

#[derive(Parser)]
#[command(name = "mowa")]
#[command(about = "Polish voice command shell")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $MOWA_CONFIG_DIR/config.yaml or ~/.mowa/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Listen on the microphone and execute spoken commands
    Listen,
    /// Read commands typed on stdin, one per line
    Type,
    /// Execute a single utterance
    Run {
        /// The utterance, e.g. `sprawdź pogodę kraków`
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// List the registered commands
    Commands {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Check external tools, API keys and command phrases
    Doctor,
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config with secrets masked
    Show,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .clone()
        .unwrap_or_else(|| mowa_config::config_file_path(&mowa_config::config_dir()))
}

/// Load the config. Validation findings are logged by `prepare`.
async fn load(log_level: Option<&str>, path: &Path) -> Result<(MowaConfig, Settings)> {
    let (config, _report) = mowa_config::load_and_prepare(path)
        .await
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    let mut settings = Settings::from_config(&config);
    if let Some(level) = log_level {
        settings.log_level = level.to_string();
    }
    Ok((config, settings))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let path = config_path(&cli);

    match cli.command {
        // A broken config file must not block rewriting it.
        Commands::Config { action: ConfigAction::Init { force } } => {
            mowa_logging::init_logger(None, cli.log_level.as_deref().unwrap_or("info"));
            init_config(&path, force).await
        }
        // Doctor diagnoses a config that fails to load.
        Commands::Doctor => {
            mowa_logging::init_logger(None, cli.log_level.as_deref().unwrap_or("info"));
            doctor(&path).await
        }
        command => {
            let (config, settings) = load(cli.log_level.as_deref(), &path).await?;
            mowa_logging::init_logger(settings.log_dir.as_deref(), &settings.log_level);
            info!(config = %path.display(), platform = ?settings.platform, "mowa starting");
            execute(command, &path, &config, &settings).await
        }
    }
}

async fn execute(
    command: Commands,
    path: &Path,
    config: &MowaConfig,
    settings: &Settings,
) -> Result<ExitCode> {
    match command {
        Commands::Listen => {
            let mut interpreter = Interpreter::new(app::build_dispatcher(settings)?);
            let mut microphone = app::build_microphone(settings)?;
            interpreter.run(&mut microphone).await?;
        }
        Commands::Type => {
            let mut interpreter = Interpreter::new(app::build_dispatcher(settings)?);
            let mut stdin = LineCapture::stdin();
            interpreter.run(&mut stdin).await?;
        }
        Commands::Run { words } => {
            let mut interpreter = Interpreter::new(app::build_dispatcher(settings)?);
            match interpreter.handle_text(&words.join(" ")).await {
                Ok(Dispatch::UnknownCommand | Dispatch::ArityMismatch { .. }) => {
                    return Ok(ExitCode::from(2));
                }
                Ok(_) => {}
                Err(e) => {
                    error!(error = %e, "Command failed");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Commands { json } => {
            let table = mowa_commands::builtin_table(&app::builtin_options(settings))?;
            commands_cmd::run(&table, json)?;
        }
        Commands::Doctor => return doctor(path).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let value = serde_json::to_value(config)?;
                print!("{}", serde_yaml::to_string(&mowa_config::redact(&value))?);
            }
            ConfigAction::Init { force } => return init_config(path, force).await,
        },
    }

    Ok(ExitCode::SUCCESS)
}

async fn doctor(path: &Path) -> Result<ExitCode> {
    let raw = mowa_config::load_config_value(path)
        .await
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    let mut file_checks = doctor_cmd::env_checks(&raw, |name| std::env::var(name).ok());

    let (config, report) = match mowa_config::prepare(raw, &std::env::vars().collect()) {
        Ok(prepared) => prepared,
        Err(e) => {
            warn!(error = %format!("{e:#}"), "Config could not be prepared; checking defaults");
            file_checks.push(doctor_cmd::Check::load_failure(&e));
            let defaults = mowa_config::apply_all_defaults(MowaConfig::default());
            (defaults, ValidationReport::default())
        }
    };

    let settings = Settings::from_config(&config);
    let table = mowa_commands::builtin_table(&app::builtin_options(&settings))?;
    if doctor_cmd::run(&settings, &table, &report, file_checks)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

async fn init_config(path: &Path, force: bool) -> Result<ExitCode> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let defaults = mowa_config::apply_all_defaults(MowaConfig::default());
    mowa_config::write_config(&defaults, path).await?;
    terminal_output::note_success(&format!("Wrote {}", path.display()));
    Ok(ExitCode::SUCCESS)
}
