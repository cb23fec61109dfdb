// In crates/execution/src/live.rs
use crate::{Error, Executor, Result};
use api_client::ApiClient;
use async_trait::async_trait;
use core_types::{Mode, OrderRequest, OrderResponse};

/// An executor that places real orders on Binance USDT-M futures.
///
/// Each call is a single signed request. Failures are logged and handed back
/// to the caller as-is: no retry, no backoff, no partial-fill handling.
#[derive(Debug, Clone)]
pub struct LiveExecutor {
    /// The API client for communicating with Binance.
    api_client: ApiClient,
}

impl LiveExecutor {
    pub fn new(api_client: ApiClient) -> Self {
        Self { api_client }
    }
}

#[async_trait]
impl Executor for LiveExecutor {
    fn name(&self) -> &'static str {
        "LiveExecutor"
    }

    fn mode(&self) -> Mode {
        Mode::Live
    }

    async fn place_order(&self, request: &OrderRequest) -> Result<OrderResponse> {
        crate::log_placement(Mode::Live, request);

        let raw = match self.api_client.place_order(request).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(error = %e, "Live {} order failed", request.order_type());
                return Err(Error::ApiClientError(e));
            }
        };
        tracing::debug!(?raw, "Exchange accepted order");

        let response = raw.into_order_response().inspect_err(|e| {
            tracing::error!(error = %e, "Could not interpret exchange order response");
        })?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_config::{BinanceSettings, Credentials};
    use core_types::{Side, Symbol};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn transport_failures_are_returned_not_retried() {
        // Nothing listens on the discard port, so the connection is refused.
        let settings = BinanceSettings {
            rest_base_url: "http://127.0.0.1:9".to_string(),
            recv_window: None,
        };
        let credentials = Credentials {
            api_key: "key".to_string(),
            secret_key: "secret".to_string(),
        };
        let executor = LiveExecutor::new(ApiClient::new(&settings, &credentials).unwrap());
        let symbol: Symbol = "BTCUSDT".parse().unwrap();

        let err = executor
            .place_market_order(&symbol, Side::Buy, dec!(0.001))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ApiClientError(api_client::Error::RequestFailed(_))
        ));
    }
}
