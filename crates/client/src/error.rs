use thiserror::Error;

/// Why a poll produced no snapshot.  All variants end up in the same error
/// banner; they stay distinct for logging.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout, truncated body.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// The body was not a valid stats document.
    #[error("invalid stats document: {0}")]
    Decode(#[from] serde_json::Error),

    /// The document carried an `error` field.
    #[error("server reported: {0}")]
    Server(String),
}

impl FetchError {
    /// Short label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status(_)    => "status",
            Self::Decode(_)    => "decode",
            Self::Server(_)    => "server",
        }
    }
}
