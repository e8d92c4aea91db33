//! Error types for the toolkit.

use chainref_core::CoreError;
use chainref_links::LinkError;
use thiserror::Error;

/// Errors that can occur during toolkit operations.
#[derive(Debug, Error)]
pub enum ChainrefError {
    /// Identifier derivation or hashing error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Link building or parsing error.
    #[error("link error: {0}")]
    Link(#[from] LinkError),

    /// Configuration could not be read.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl ChainrefError {
    /// True for errors caused by malformed caller input.
    pub fn is_malformed_input(&self) -> bool {
        match self {
            ChainrefError::Core(e) => e.is_malformed_input(),
            ChainrefError::Link(e) => matches!(e, LinkError::MalformedInput(_)),
            ChainrefError::Config(_) => false,
        }
    }
}

/// Result type for toolkit operations.
pub type Result<T> = std::result::Result<T, ChainrefError>;
