// In crates/app-config/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    /// Live mode needs both API credentials; raised before any client is built.
    #[error("API key/secret not set: missing environment variable {var}")]
    MissingCredentials { var: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
