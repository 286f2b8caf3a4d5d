pub mod dispatch;
pub mod handlers;
pub mod interpreter;
pub mod parser;
pub mod registry;
pub mod session;
pub mod types;

#[cfg(test)]
mod testing;

use mowa_browser::SearchEngine;

pub use dispatch::{CommandDispatcher, Dispatch, Services};
pub use handlers::{
    ExitHandler, LaunchHandler, ListCommandsHandler, OpenBrowserHandler, SayHandler,
    SearchHandler, SilentModeHandler, WeatherHandler, WikipediaHandler, format_weather,
};
pub use interpreter::{Cycle, Interpreter, normalize_utterance};
pub use parser::{ParseResult, parse};
pub use registry::{CommandTable, RegistryError};
pub use session::SessionState;
pub use types::{
    ActionContext, Arity, CommandPhrase, Flow, Handler, HandlerDescriptor, NullaryAction,
    UnaryAction,
};

/// Settings the built-in handlers need beyond their collaborators.
#[derive(Debug, Clone)]
pub struct BuiltinOptions {
    pub search: SearchEngine,
    /// Command line that starts the music player.
    pub music: String,
    /// Command line that starts the clock application.
    pub clock: String,
}

impl BuiltinOptions {
    pub fn new(search: SearchEngine, music: impl Into<String>, clock: impl Into<String>) -> Self {
        Self {
            search,
            music: music.into(),
            clock: clock.into(),
        }
    }
}

/// The built-in command table, in listing order.
pub fn builtin_table(options: &BuiltinOptions) -> Result<CommandTable, RegistryError> {
    let search = || options.search.clone();
    let mut table = CommandTable::new();

    table.register(
        "otwórz przeglądarkę",
        "Open the browser home page",
        Handler::nullary(OpenBrowserHandler { engine: search() }),
    )?;
    table.register(
        "wyszukaj",
        "Search the web",
        Handler::unary(SearchHandler { engine: search() }),
    )?;
    table.register(
        "szukaj wikipedia",
        "Open a Wikipedia article",
        Handler::unary(WikipediaHandler { engine: search() }),
    )?;
    table.register(
        "sprawdź pogodę",
        "Read current weather for a city",
        Handler::unary(WeatherHandler),
    )?;
    table.register("zamknij", "Say goodbye and exit", Handler::nullary(ExitHandler))?;
    table.register("komendy", "List available commands", Handler::nullary(ListCommandsHandler))?;
    table.register("powiedz", "Repeat the given text", Handler::unary(SayHandler))?;
    table.register(
        "muzyka",
        "Launch the music player",
        Handler::nullary(LaunchHandler {
            target: options.music.clone(),
            feedback: "Otwieram odtwarzacz muzyki".into(),
        }),
    )?;
    table.register(
        "zegar",
        "Launch the clock",
        Handler::nullary(LaunchHandler {
            target: options.clock.clone(),
            feedback: "Otwieram zegar".into(),
        }),
    )?;
    table.register(
        "włącz tryb cichy",
        "Mute the system",
        Handler::nullary(SilentModeHandler { enable: true }),
    )?;
    table.register(
        "wyłącz tryb cichy",
        "Unmute the system",
        Handler::nullary(SilentModeHandler { enable: false }),
    )?;

    Ok(table)
}

/// Build a dispatcher pre-wired with all built-in handlers.
pub fn build_default_dispatcher(
    options: &BuiltinOptions,
    services: Services,
) -> Result<CommandDispatcher, RegistryError> {
    Ok(CommandDispatcher::new(builtin_table(options)?, services))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_options;

    #[test]
    fn builtin_table_registers_every_command() {
        let table = builtin_table(&test_options()).unwrap();
        assert_eq!(table.len(), 11);
        assert_eq!(table.lookup("zamknij").unwrap().arity(), Arity::Nullary);
        assert_eq!(table.lookup("sprawdź pogodę").unwrap().arity(), Arity::Unary);
        assert_eq!(table.phrases().next().unwrap().as_str(), "otwórz przeglądarkę");
    }
}
