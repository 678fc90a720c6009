//! Error types for Kohonen map training.

use thiserror::Error;

/// The main error type for Kohonen operations.
#[derive(Error, Debug)]
pub enum KohonenError {
    /// Invalid configuration or malformed initial neuron layout.
    ///
    /// Raised before any training work starts.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Winner search found no neuron eligible to win.
    ///
    /// Every candidate carried the conscience flag, which means the
    /// conscience bookkeeping was broken by the caller or a previous step.
    #[error("Winner search exhausted all candidates: every neuron is excluded")]
    ExhaustedCandidates,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for Kohonen operations.
pub type Result<T> = std::result::Result<T, KohonenError>;

impl From<serde_json::Error> for KohonenError {
    fn from(err: serde_json::Error) -> Self {
        KohonenError::Serialization(err.to_string())
    }
}
