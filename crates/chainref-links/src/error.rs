//! Error types for link addressing.

use thiserror::Error;

/// Errors that can occur while building or parsing links.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// A link part, path or key did not have the required shape.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The recorded parts do not form the full ancestor chain of the deepest link.
    #[error("incomplete address: {recorded} part(s) recorded, {required} required")]
    IncompleteAddress { recorded: usize, required: usize },
}

impl LinkError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        LinkError::MalformedInput(msg.into())
    }
}

/// Result type for link operations.
pub type Result<T> = std::result::Result<T, LinkError>;
