//! Structured logging for mowa.
//!
//! Console + rolling NDJSON file output, redaction of secrets, and the
//! interpreter event log.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogEntry, EventLogger, InterpreterEvent};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
