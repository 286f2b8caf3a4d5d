//! Interpreter Event Logger
//!
//! Structured events (heard text, dispatch outcome, failures) emitted through
//! `tracing` under the `interpreter_events` target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum InterpreterEvent {
    Heard {
        text: String,
    },
    Dispatched {
        phrase: String,
        parameters: Vec<String>,
        outcome: String,
    },
    CaptureFailed {
        error_msg: String,
    },
    HandlerFailed {
        phrase: String,
        error_msg: String,
    },
}

impl InterpreterEvent {
    fn redacted(mut self) -> Self {
        match &mut self {
            InterpreterEvent::Heard { text } => {
                *text = redact_sensitive_data(text);
            }
            InterpreterEvent::Dispatched { parameters, .. } => {
                for p in parameters.iter_mut() {
                    *p = redact_sensitive_data(p);
                }
            }
            InterpreterEvent::CaptureFailed { error_msg }
            | InterpreterEvent::HandlerFailed { error_msg, .. } => {
                *error_msg = redact_sensitive_data(error_msg);
            }
        }
        self
    }
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: InterpreterEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Redact and emit one interpreter event.
    pub fn log_event(session_id: &str, event: InterpreterEvent) {
        let entry = Self::entry(session_id, event);
        info!(target: "interpreter_events", event = ?entry, "Interpreter event");
    }

    fn entry(session_id: &str, event: InterpreterEvent) -> EventLogEntry {
        EventLogEntry {
            session_id: session_id.into(),
            timestamp: Utc::now(),
            event: event.redacted(),
        }
    }
}
