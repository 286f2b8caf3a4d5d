/// Built-in command handlers.
///
/// Each handler is a concrete struct implementing `NullaryAction` or
/// `UnaryAction`. Feedback goes through the notifier on the context.
use anyhow::Result;
use async_trait::async_trait;
use mowa_browser::SearchEngine;
use mowa_core::{SystemError, WeatherReport};
use tracing::{info, warn};

use crate::types::{ActionContext, CommandPhrase, Flow, NullaryAction, UnaryAction};

pub const UNSUPPORTED_MUTE_FEEDBACK: &str =
    "System operacyjny nie jest obsługiwany przez funkcję zmiany głośności.";

// ---------------------------------------------------------------------------
// otwórz przeglądarkę
// ---------------------------------------------------------------------------

pub struct OpenBrowserHandler {
    pub engine: SearchEngine,
}

#[async_trait]
impl NullaryAction for OpenBrowserHandler {
    async fn run(&self, ctx: &mut ActionContext<'_>) -> Result<Flow> {
        ctx.services.browser.open_url(self.engine.home()).await?;
        ctx.say("Otwieram przeglądarkę").await?;
        Ok(Flow::Continue)
    }
}

// ---------------------------------------------------------------------------
// wyszukaj
// ---------------------------------------------------------------------------

pub struct SearchHandler {
    pub engine: SearchEngine,
}

#[async_trait]
impl UnaryAction for SearchHandler {
    async fn run(&self, ctx: &mut ActionContext<'_>, query: &str) -> Result<Flow> {
        ctx.services.browser.open_url(&self.engine.search(query)).await?;
        ctx.say(&format!("Szukam: {query}")).await?;
        Ok(Flow::Continue)
    }
}

// ---------------------------------------------------------------------------
// szukaj wikipedia
// ---------------------------------------------------------------------------

pub struct WikipediaHandler {
    pub engine: SearchEngine,
}

#[async_trait]
impl UnaryAction for WikipediaHandler {
    async fn run(&self, ctx: &mut ActionContext<'_>, query: &str) -> Result<Flow> {
        ctx.services.browser.open_url(&self.engine.wikipedia(query)).await?;
        ctx.say(&format!("Szukam {query} na Wikipedii")).await?;
        Ok(Flow::Continue)
    }
}

// ---------------------------------------------------------------------------
// sprawdź pogodę
// ---------------------------------------------------------------------------

/// One sentence: `Pogoda dla <city>: Label: value, Label: value`.
pub fn format_weather(city: &str, report: &WeatherReport) -> String {
    let readings = report
        .readings()
        .iter()
        .map(|r| format!("{}: {}", r.label, r.value))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Pogoda dla {city}: {readings}")
}

pub struct WeatherHandler;

#[async_trait]
impl UnaryAction for WeatherHandler {
    async fn run(&self, ctx: &mut ActionContext<'_>, city: &str) -> Result<Flow> {
        let text = match ctx.services.weather.get_weather(city).await {
            Some(report) if !report.is_empty() => format_weather(city, &report),
            _ => format!("Nie znaleziono danych dla {city}."),
        };
        ctx.say(&text).await?;
        Ok(Flow::Continue)
    }
}

// ---------------------------------------------------------------------------
// zamknij
// ---------------------------------------------------------------------------

pub struct ExitHandler;

#[async_trait]
impl NullaryAction for ExitHandler {
    async fn run(&self, ctx: &mut ActionContext<'_>) -> Result<Flow> {
        // Exit even when the farewell cannot be spoken.
        if let Err(e) = ctx.say("Do zobaczenia!").await {
            warn!(error = %format!("{e:#}"), "Farewell feedback failed");
        }
        Ok(Flow::Exit)
    }
}

// ---------------------------------------------------------------------------
// komendy
// ---------------------------------------------------------------------------

pub struct ListCommandsHandler;

#[async_trait]
impl NullaryAction for ListCommandsHandler {
    async fn run(&self, ctx: &mut ActionContext<'_>) -> Result<Flow> {
        let phrases = ctx
            .table
            .phrases()
            .map(CommandPhrase::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        ctx.say(&format!("Dostępne komendy to: {phrases}")).await?;
        Ok(Flow::Continue)
    }
}

// ---------------------------------------------------------------------------
// powiedz
// ---------------------------------------------------------------------------

pub struct SayHandler;

#[async_trait]
impl UnaryAction for SayHandler {
    async fn run(&self, ctx: &mut ActionContext<'_>, text: &str) -> Result<Flow> {
        ctx.say(text).await?;
        Ok(Flow::Continue)
    }
}

// ---------------------------------------------------------------------------
// muzyka / zegar
// ---------------------------------------------------------------------------

/// Launches a desktop application, then announces it.
pub struct LaunchHandler {
    pub target: String,
    pub feedback: String,
}

#[async_trait]
impl NullaryAction for LaunchHandler {
    async fn run(&self, ctx: &mut ActionContext<'_>) -> Result<Flow> {
        info!(target = %self.target, "[Commands] Launching application");
        ctx.services.system.launch(&self.target).await?;
        ctx.say(&self.feedback).await?;
        Ok(Flow::Continue)
    }
}

// ---------------------------------------------------------------------------
// włącz / wyłącz tryb cichy
// ---------------------------------------------------------------------------

pub struct SilentModeHandler {
    pub enable: bool,
}

impl SilentModeHandler {
    fn messages(&self) -> (&'static str, &'static str) {
        if self.enable {
            ("Włączam tryb cichy", "Tryb cichy jest już włączony")
        } else {
            ("Wyłączam tryb cichy", "Tryb cichy jest już wyłączony")
        }
    }
}

#[async_trait]
impl NullaryAction for SilentModeHandler {
    async fn run(&self, ctx: &mut ActionContext<'_>) -> Result<Flow> {
        let (changed, unchanged) = self.messages();
        if ctx.session.is_silent() == self.enable {
            ctx.say(unchanged).await?;
            return Ok(Flow::Continue);
        }

        match ctx.services.system.set_muted(self.enable).await {
            Ok(()) => {
                ctx.session.set_silent(self.enable);
                ctx.say(changed).await?;
            }
            Err(SystemError::Unsupported { os }) => {
                warn!(%os, "Volume control not supported");
                ctx.say(UNSUPPORTED_MUTE_FEEDBACK).await?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(Flow::Continue)
    }
}
