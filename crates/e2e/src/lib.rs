//! Veritas E2E Test Support
//!
//! Runs an in-process mock of the Veritas backend so the API client and the
//! dashboard can be exercised over real HTTP.

pub mod error;
pub mod server;

pub use error::{E2eError, E2eResult};
pub use server::{MockBackend, RecordedRequest};

/// Install a test log subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
