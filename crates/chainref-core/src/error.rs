//! Error types for chainref core.

use thiserror::Error;

/// Errors that can occur while encoding entries or deriving identifiers.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Hex input was not valid, even-length hexadecimal.
    #[error("malformed hex input: {0}")]
    MalformedHex(#[from] hex::FromHexError),

    /// An external id in the list carried no value.
    #[error("external id at index {index} has no value")]
    MissingExternalId { index: usize },

    /// A length prefix does not fit the signed 16-bit range.
    #[error("length {0} does not fit a signed 16-bit length prefix")]
    LengthOutOfRange(usize),

    /// Reading a stream for hashing failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// True for errors caused by malformed caller input.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            CoreError::MalformedHex(_) | CoreError::MissingExternalId { .. }
        )
    }

    /// True for length-prefix range violations.
    pub fn is_range_error(&self) -> bool {
        matches!(self, CoreError::LengthOutOfRange(_))
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
