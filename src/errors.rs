use std::fmt;

/// Failures while loading a sheet.
///
/// A missing join match (no accounts, no branch) is not a failure and never
/// shows up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The export endpoint answered with a non-success status.
    Http {
        /// URL that was requested.
        url: String,
        /// HTTP status code returned.
        status: u16,
    },
    /// The request never produced a response (DNS, TLS, timeout, body read).
    Network(String),
    /// A local sheet file could not be read.
    Io(String),
}

impl LoadError {
    /// Short label for log fields and status lines.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Http { .. } => "http",
            LoadError::Network(_) => "network",
            LoadError::Io(_) => "io",
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Http { url, status } => {
                write!(f, "Failed to fetch CSV: {} returned {}", url, status)
            }
            LoadError::Network(msg) => write!(f, "Network error: {}", msg),
            LoadError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        LoadError::Network(err.to_string())
    }
}
