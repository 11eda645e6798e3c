//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Only
//! failures that must reach the caller live here: a malformed identifier, a rejected
//! configuration, or a repeated draw. Lookups that fall outside the vector field or the
//! collision grid are not errors; they surface as `None` and end the affected trace.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid identifier '{identifier}': {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("sigil has already been drawn")]
    AlreadyDrawn,

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn invalid_identifier(identifier: &str, reason: impl Into<String>) -> Self {
        Error::InvalidIdentifier {
            identifier: identifier.to_owned(),
            reason: reason.into(),
        }
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
