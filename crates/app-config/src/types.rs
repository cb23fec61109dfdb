// In crates/app-config/src/types.rs

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    /// Settings for the Binance API.
    #[serde(default)]
    pub binance: BinanceSettings,
    /// Defaults for the simulated strategies when the CLI flag is omitted.
    #[serde(default)]
    pub simulation: SimulationSettings,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the console output. The log file always records DEBUG and up.
    pub log_level: String,
    /// Append-only log file, relative to the working directory.
    pub log_file: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "info".to_string(),
            log_file: PathBuf::from("bot.log"),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BinanceSettings {
    /// The REST API base URL for Binance USDT-M futures.
    pub rest_base_url: String,
    /// Optional `recvWindow` sent with signed requests, in milliseconds.
    pub recv_window: Option<u64>,
}

impl Default for BinanceSettings {
    fn default() -> Self {
        Self {
            rest_base_url: "https://fapi.binance.com".to_string(),
            recv_window: Some(5000),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SimulationSettings {
    pub twap_chunks: u32,
    pub twap_interval_secs: f64,
    /// Pause before the OCO simulator picks its executed leg.
    pub oco_settle_secs: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            twap_chunks: 5,
            twap_interval_secs: 1.0,
            oco_settle_secs: 1.0,
        }
    }
}

/// API credentials for live trading. Never read from config files.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub secret_key: String,
}

// Keep the secret out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
