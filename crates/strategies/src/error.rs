// In crates/strategies/src/error.rs

use crate::oco::OcoState;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid strategy parameters: {0}")]
    InvalidParameters(String),

    /// A TWAP chunk failed. Earlier chunks stay placed; nothing is rolled back.
    #[error("TWAP chunk {chunk}/{chunks} failed after {placed} placed: {source}")]
    ChunkFailed {
        chunk: u32,
        chunks: u32,
        placed: usize,
        #[source]
        source: execution::Error,
    },

    #[error("Execution error: {0}")]
    Execution(#[from] execution::Error),

    #[error("Invalid OCO state transition from {from:?} to {to:?}")]
    InvalidTransition { from: OcoState, to: OcoState },
}

pub type Result<T> = std::result::Result<T, Error>;
