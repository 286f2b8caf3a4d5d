use thiserror::Error;

/// Failure of a single listen/recognize attempt.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Audio was captured but nothing usable was recognized.
    #[error("speech was not intelligible")]
    Unintelligible,

    /// The recognition backend failed (HTTP error, bad response, crashed process).
    #[error("recognition service error: {0}")]
    Service(String),

    /// The input source is exhausted (end of typed input).
    #[error("input closed")]
    Closed,

    /// The capture device could not be started at all.
    #[error("capture device error: {0}")]
    Device(String),
}

impl CaptureError {
    /// Whether the interpreter loop may simply try again on the next cycle.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unintelligible | Self::Service(_))
    }
}

/// Failure of an OS-level action (mute, application launch).
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("operation not supported on {os}")]
    Unsupported { os: String },

    #[error("command `{command}` failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_capture_errors() {
        assert!(CaptureError::Unintelligible.is_transient());
        assert!(CaptureError::Service("timeout".into()).is_transient());
        assert!(!CaptureError::Closed.is_transient());
        assert!(!CaptureError::Device("rec not found".into()).is_transient());
    }

    #[test]
    fn system_error_messages() {
        let err = SystemError::Unsupported { os: "haiku".into() };
        assert_eq!(err.to_string(), "operation not supported on haiku");
    }
}
