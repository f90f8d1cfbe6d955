//! Error types for the host-signals crate.

use thiserror::Error;

/// Errors that can occur while reading a host capability.
///
/// None of these are fatal to a caller: a missing capability simply means
/// the corresponding reading stays absent.
#[derive(Debug, Error)]
pub enum SignalError {
    /// The battery subsystem reported an error.
    #[error("Battery error: {0}")]
    Battery(String),

    /// Network request failed before a response arrived.
    #[error("Network request failed: {0}")]
    Network(String),

    /// Server answered with a non-success status.
    #[error("Location service returned HTTP {0}")]
    Http(u16),

    /// Response body could not be interpreted.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}
