//! Error types for owlkb-core

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A canonical term string could not be decoded
    #[error("Invalid term encoding: {0}")]
    InvalidTerm(String),
}

impl Error {
    /// Create an invalid term error
    pub fn invalid_term(msg: impl Into<String>) -> Self {
        Error::InvalidTerm(msg.into())
    }
}
