//! Error types for Veritas

use thiserror::Error;

/// Result type alias using Veritas Error
pub type Result<T> = std::result::Result<T, Error>;

/// Veritas error types
#[derive(Error, Debug)]
pub enum Error {
    /// The backend answered outside the 2xx range.
    #[error("HTTP error! status: {status} ({url})")]
    Http { status: u16, url: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl Error {
    /// HTTP status carried by the error, if the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_carries_status() {
        let err = Error::Http {
            status: 404,
            url: "http://localhost:8874/api/missing".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert_eq!(err.status(), Some(404));
    }
}
