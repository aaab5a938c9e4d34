//! Error types for the storage, export and configuration boundaries.
//!
//! The scheduling functions themselves are total and never return these.

/// Errors raised when progress crosses an I/O boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("unknown {kind} value '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("app state '{key}' holds invalid value '{value}'")]
    InvalidState { key: &'static str, value: String },

    #[error("timestamp {millis} ms is out of range")]
    InvalidTimestamp { millis: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;
