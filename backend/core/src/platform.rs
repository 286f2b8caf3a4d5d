use std::fmt;

/// Host operating system, as far as OS-level actions care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Other(String),
}

impl Platform {
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => Self::Linux,
            "macos" => Self::MacOs,
            "windows" => Self::Windows,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => f.write_str("linux"),
            Self::MacOs => f.write_str("macos"),
            Self::Windows => f.write_str("windows"),
            Self::Other(os) => f.write_str(os),
        }
    }
}
