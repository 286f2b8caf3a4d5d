/// Command dispatch: resolve a parsed phrase to its handler and invoke it.
use std::sync::Arc;

use anyhow::Result;
use mowa_core::{Browser, Notify, SystemControl, WeatherClient};
use tracing::{debug, info, warn};

use crate::registry::CommandTable;
use crate::session::SessionState;
use crate::types::{ActionContext, Flow, Handler};

pub const UNKNOWN_COMMAND_FEEDBACK: &str = "Nie rozumiem tej komendy.";
pub const ARITY_MISMATCH_FEEDBACK: &str = "Nieprawidłowa liczba parametrów";

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Collaborators available to every handler.
#[derive(Clone)]
pub struct Services {
    pub notifier: Arc<dyn Notify>,
    pub weather: Arc<dyn WeatherClient>,
    pub browser: Arc<dyn Browser>,
    pub system: Arc<dyn SystemControl>,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of one dispatch. Unknown input and arity mismatches are outcomes,
/// not errors: feedback has already been spoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Executed(Flow),
    UnknownCommand,
    ArityMismatch { expected: usize, actual: usize },
}

impl Dispatch {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Executed(Flow::Continue) => "executed",
            Self::Executed(Flow::Exit) => "exit",
            Self::UnknownCommand => "unknown_command",
            Self::ArityMismatch { .. } => "arity_mismatch",
        }
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Executed(Flow::Exit))
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

pub struct CommandDispatcher {
    table: CommandTable,
    services: Services,
}

impl CommandDispatcher {
    pub fn new(table: CommandTable, services: Services) -> Self {
        Self { table, services }
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Speak dispatcher feedback. A notifier failure here is only logged:
    /// unknown input and arity mismatches never fail the dispatch.
    async fn report(&self, feedback: &str) {
        if let Err(e) = self.services.notifier.speak(feedback).await {
            warn!(error = %format!("{e:#}"), feedback, "Dispatcher feedback failed");
        }
    }

    /// Invoke the handler registered for `phrase`.
    ///
    /// An empty or unregistered phrase and a parameter count that differs from
    /// the handler's arity are reported through the notifier and returned as
    /// outcomes. Errors raised by the handler itself propagate.
    pub async fn execute(
        &self,
        phrase: &str,
        parameters: &[String],
        session: &mut SessionState,
    ) -> Result<Dispatch> {
        let Some(entry) = (!phrase.is_empty()).then(|| self.table.lookup(phrase)).flatten() else {
            debug!(phrase, "No command matched");
            self.report(UNKNOWN_COMMAND_FEEDBACK).await;
            return Ok(Dispatch::UnknownCommand);
        };

        let expected = entry.arity().count();
        if parameters.len() != expected {
            debug!(phrase, expected, actual = parameters.len(), "Arity mismatch");
            self.report(ARITY_MISMATCH_FEEDBACK).await;
            return Ok(Dispatch::ArityMismatch { expected, actual: parameters.len() });
        }

        info!(phrase, "[Commands] Dispatching");
        let mut ctx = ActionContext {
            services: &self.services,
            session,
            table: &self.table,
        };
        let flow = match &entry.handler {
            Handler::Nullary(action) => action.run(&mut ctx).await?,
            Handler::Unary(action) => action.run(&mut ctx, &parameters[0]).await?,
        };
        Ok(Dispatch::Executed(flow))
    }
}
