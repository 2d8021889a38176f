use thiserror::Error;

/// Everything that can go wrong while reading a page.
///
/// Errors stay typed inside the crate; they are turned into the single-line
/// report string only by [`crate::formatter::render_error`].
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("URL must not be empty")]
    MissingUrl,

    #[error("invalid URL '{url}', it must include http:// or https:// ({reason})")]
    InvalidUrl { url: String, reason: String },

    #[error("timeout must be between {min} and {max} seconds, got {value}")]
    InvalidTimeout { value: u64, min: u64, max: u64 },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("request timed out after {secs} seconds, the target site responded too slowly")]
    Timeout { secs: u64 },

    /// The detail is kept for logging; the user-facing message is generic.
    #[error("connection failed, check the network or whether the target site is reachable")]
    Connection(String),

    #[error("HTTP {status} - server returned an error")]
    HttpStatus { status: u16 },

    #[error("request failed - {0}")]
    Request(String),

    #[error("{kind}: {detail}")]
    Extraction { kind: String, detail: String },
}

impl ReaderError {
    /// Stable tag for the error, used by the JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            ReaderError::MissingUrl => "missing_url",
            ReaderError::InvalidUrl { .. } => "invalid_url",
            ReaderError::InvalidTimeout { .. } => "invalid_timeout",
            ReaderError::Config(_) => "config",
            ReaderError::Timeout { .. } => "timeout",
            ReaderError::Connection(_) => "connection",
            ReaderError::HttpStatus { .. } => "http_status",
            ReaderError::Request(_) => "request",
            ReaderError::Extraction { .. } => "extraction",
        }
    }

    /// True when the error was raised before any network traffic happened.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ReaderError::MissingUrl
                | ReaderError::InvalidUrl { .. }
                | ReaderError::InvalidTimeout { .. }
                | ReaderError::Config(_)
        )
    }
}

impl From<tokio::task::JoinError> for ReaderError {
    fn from(err: tokio::task::JoinError) -> Self {
        let kind = if err.is_panic() { "Panic" } else { "Cancelled" };
        ReaderError::Extraction {
            kind: kind.to_string(),
            detail: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReaderError>;
