// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, BinanceSettings, Credentials, Settings, SimulationSettings};

pub const API_KEY_VAR: &str = "BINANCE_API_KEY";
pub const API_SECRET_VAR: &str = "BINANCE_API_SECRET";

/// Loads the application settings from the `config/` directory.
///
/// See [`load_settings_from`] for the layering rules.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from(Path::new("config"), &environment)
}

/// Loads settings with layered sources, later ones overriding earlier ones:
/// 1. `<dir>/base.toml` (optional).
/// 2. `<dir>/<environment>.toml` (optional).
/// 3. Environment variables prefixed `APP__`, e.g. `APP__BINANCE__REST_BASE_URL`.
///
/// Every section has defaults, so a missing directory yields a usable `Settings`.
pub fn load_settings_from(dir: &Path, environment: &str) -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::from(dir.join("base")).required(false))
        .add_source(File::from(dir.join(environment)).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings: Settings = settings.try_deserialize()?;
    Ok(settings)
}

impl Credentials {
    /// Reads `BINANCE_API_KEY` and `BINANCE_API_SECRET` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds credentials from an arbitrary variable lookup. Missing or blank
    /// values are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or(Error::MissingCredentials { var })
        };
        Ok(Self {
            api_key: read(API_KEY_VAR)?,
            secret_key: read(API_SECRET_VAR)?,
        })
    }
}
