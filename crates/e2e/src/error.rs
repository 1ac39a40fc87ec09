//! Error types for E2E testing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Mock backend failed to start: {0}")]
    ServerStartup(String),

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;
