use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum DashError {
    #[error("config error: {0}")]
    Config(String),

    #[error("preference store error: {0}")]
    Preference(String),

    #[error("theme error: {0}")]
    Theme(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = DashError> = std::result::Result<T, E>;
