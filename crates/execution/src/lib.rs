// In crates/execution/src/lib.rs

use app_config::{Credentials, Settings};
use async_trait::async_trait;
use core_types::{Mode, OrderRequest, OrderResponse, Side, Symbol, TimeInForce};
use rust_decimal::Decimal;

pub mod clock;
pub mod error;
pub mod live;
pub mod mock;

// Re-export public types
pub use clock::{OrderIdGenerator, SequentialIds, SystemClock};
pub use error::{Error, Result};
pub use live::LiveExecutor;
pub use mock::MockExecutor;

/// The universal interface for an execution handler.
///
/// An `Executor` takes a validated `OrderRequest` and submits it to a target,
/// which is either the live exchange or the local mock engine. Callers pick the
/// implementation once, at construction time, and never branch on mode again.
#[async_trait]
pub trait Executor: Send + Sync {
    /// The name of the executor (e.g., "LiveExecutor", "MockExecutor").
    fn name(&self) -> &'static str;

    fn mode(&self) -> Mode;

    /// Submits one order and returns the response for it.
    async fn place_order(&self, request: &OrderRequest) -> Result<OrderResponse>;

    /// Places a market order. The mock engine reports it `FILLED`.
    async fn place_market_order(
        &self,
        symbol: &Symbol,
        side: Side,
        quantity: Decimal,
    ) -> Result<OrderResponse> {
        let request = OrderRequest::market(symbol.clone(), side, quantity)?;
        self.place_order(&request).await
    }

    /// Places a limit order. The mock engine reports it `NEW`.
    async fn place_limit_order(
        &self,
        symbol: &Symbol,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        time_in_force: TimeInForce,
    ) -> Result<OrderResponse> {
        let request = OrderRequest::limit(symbol.clone(), side, quantity, price, time_in_force)?;
        self.place_order(&request).await
    }
}

/// Builds the executor for `mode`, reading live credentials from the process environment.
///
/// Mock mode never reads credentials or builds an HTTP client. Live mode
/// fails here, before any order is attempted, if either credential is missing.
pub fn build_executor(mode: Mode, settings: &Settings) -> Result<Box<dyn Executor>> {
    build_executor_with(mode, settings, |name| std::env::var(name).ok())
}

/// Same as [`build_executor`], with credentials resolved through `lookup`.
pub fn build_executor_with<F>(mode: Mode, settings: &Settings, lookup: F) -> Result<Box<dyn Executor>>
where
    F: Fn(&str) -> Option<String>,
{
    match mode {
        Mode::Mock => Ok(Box::new(MockExecutor::new())),
        Mode::Live => {
            let credentials = Credentials::from_lookup(lookup).inspect_err(|e| {
                tracing::error!(error = %e, "Failed to initialize live client");
            })?;
            build_live_executor(settings, &credentials)
        }
    }
}

/// Builds a live executor from explicit credentials.
pub fn build_live_executor(
    settings: &Settings,
    credentials: &Credentials,
) -> Result<Box<dyn Executor>> {
    let api_client = api_client::ApiClient::new(&settings.binance, credentials).inspect_err(|e| {
        tracing::error!(error = %e, "Failed to initialize live client");
    })?;
    tracing::warn!("LIVE TRADING IS ENABLED. REAL ORDERS WILL BE PLACED.");
    Ok(Box::new(LiveExecutor::new(api_client)))
}

/// Shared log line for every placement, whatever the target.
pub(crate) fn log_placement(mode: Mode, request: &OrderRequest) {
    let kind = match request.order_type() {
        core_types::OrderType::Market => "market",
        core_types::OrderType::Limit => "limit",
    };
    tracing::info!("Placing {} order | mode={} | {}", kind, mode, request);
}
