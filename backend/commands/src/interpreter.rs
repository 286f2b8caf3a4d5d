/// The interpreter loop: capture → parse → dispatch, until exit.
use anyhow::Result;
use mowa_core::{CaptureError, SpeechCapture};
use mowa_logging::{EventLogger, InterpreterEvent};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::dispatch::{CommandDispatcher, Dispatch};
use crate::parser::parse;
use crate::session::SessionState;

pub const UNINTELLIGIBLE_MESSAGE: &str = "Nie zrozumiałem, powtórz proszę.";

/// Trim and lowercase recognized text before parsing.
pub fn normalize_utterance(text: &str) -> String {
    text.trim().to_lowercase()
}

/// What happened in one capture cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    Continue,
    Exit,
    InputClosed,
}

pub struct Interpreter {
    dispatcher: CommandDispatcher,
    session: SessionState,
    session_id: String,
}

impl Interpreter {
    pub fn new(dispatcher: CommandDispatcher) -> Self {
        Self {
            dispatcher,
            session: SessionState::default(),
            session_id: Uuid::new_v4().to_string(),
        }
    }

    /// Normalize, parse and dispatch one utterance.
    ///
    /// Handler and collaborator errors are returned to the caller.
    pub async fn handle_text(&mut self, text: &str) -> Result<Dispatch> {
        let normalized = normalize_utterance(text);
        EventLogger::log_event(
            &self.session_id,
            InterpreterEvent::Heard { text: normalized.clone() },
        );

        let parsed = parse(self.dispatcher.table(), &normalized);
        let phrase = parsed.phrase_str().to_string();
        let result = self
            .dispatcher
            .execute(&phrase, &parsed.parameters, &mut self.session)
            .await;

        match &result {
            Ok(outcome) => EventLogger::log_event(
                &self.session_id,
                InterpreterEvent::Dispatched {
                    phrase,
                    parameters: parsed.parameters,
                    outcome: outcome.label().to_string(),
                },
            ),
            Err(e) => EventLogger::log_event(
                &self.session_id,
                InterpreterEvent::HandlerFailed {
                    phrase,
                    error_msg: format!("{e:#}"),
                },
            ),
        }
        result
    }

    /// Run one listen → dispatch cycle.
    ///
    /// Only a capture device failure is returned as an error; everything else
    /// is logged and the loop may continue.
    pub async fn run_cycle(&mut self, capture: &mut dyn SpeechCapture) -> Result<Cycle> {
        info!("Waiting for command");
        let text = match capture.listen().await {
            Ok(text) => text,
            Err(CaptureError::Closed) => {
                info!("Input closed");
                return Ok(Cycle::InputClosed);
            }
            Err(e) if e.is_transient() => {
                if matches!(e, CaptureError::Unintelligible) {
                    warn!("{UNINTELLIGIBLE_MESSAGE}");
                } else {
                    warn!(error = %e, "Recognition failed");
                }
                EventLogger::log_event(
                    &self.session_id,
                    InterpreterEvent::CaptureFailed { error_msg: e.to_string() },
                );
                return Ok(Cycle::Continue);
            }
            Err(e) => {
                error!(error = %e, "Capture device failed");
                return Err(e.into());
            }
        };

        info!(text = %text, "Heard");
        match self.handle_text(&text).await {
            Ok(outcome) if outcome.is_exit() => Ok(Cycle::Exit),
            Ok(_) => Ok(Cycle::Continue),
            Err(e) => {
                error!(error = %format!("{e:#}"), "Command failed");
                Ok(Cycle::Continue)
            }
        }
    }

    /// Loop until the exit command runs or the input is closed.
    pub async fn run(&mut self, capture: &mut dyn SpeechCapture) -> Result<()> {
        for (shorter, longer) in self.dispatcher.table().shadowed_phrases() {
            warn!(%shorter, %longer, "Command is unreachable: a shorter phrase always matches first");
        }
        info!(session_id = %self.session_id, commands = self.dispatcher.table().len(), "Interpreter started");

        loop {
            match self.run_cycle(capture).await? {
                Cycle::Continue => continue,
                Cycle::Exit | Cycle::InputClosed => break,
            }
        }

        info!(session_id = %self.session_id, "Interpreter stopped");
        Ok(())
    }
}
