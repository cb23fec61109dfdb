// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A raw operator-supplied value was rejected. The message is shown as-is.
    #[error("{reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Unknown mode '{0}', expected 'mock' or 'live'")]
    UnknownMode(String),
}

impl Error {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
