// In crates/api-client/src/lib.rs

use app_config::{BinanceSettings, Credentials};
use chrono::Utc;
use core_types::OrderRequest;
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
// Create a type alias for the HMAC-SHA256 implementation.
type HmacSha256 = Hmac<Sha256>;

pub mod error;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use types::*;

impl ApiClient {
    /// Constructs a new ApiClient from BinanceSettings and the live credentials.
    pub fn new(settings: &BinanceSettings, credentials: &Credentials) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;
        Ok(ApiClient {
            http_client,
            api_key: credentials.api_key.clone(),
            secret_key: credentials.secret_key.clone(),
            base_url: settings.rest_base_url.trim_end_matches('/').to_string(),
            recv_window: settings.recv_window,
        })
    }

    /// Generates an HMAC-SHA256 signature for a given query string.
    ///
    /// # Returns
    ///
    /// A hexadecimal string representation of the signature.
    fn sign(&self, query_string: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| Error::ClientBuildError(format!("invalid secret key: {}", e)))?;
        mac.update(query_string.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Appends `timestamp` and `signature` to `params`, signing everything before them.
    fn create_signed_query(&self, params: &mut String, timestamp: i64) -> Result<()> {
        if !params.is_empty() {
            params.push('&');
        }
        params.push_str(&format!("timestamp={}", timestamp));

        let signature = self.sign(params)?;
        params.push_str(&format!("&signature={}", signature));
        Ok(())
    }

    /// Places a new market or limit order.
    /// Corresponds to `POST /fapi/v1/order`.
    pub async fn place_order(&self, request: &OrderRequest) -> Result<NewOrderResponse> {
        let mut params = order_params(request, self.recv_window);
        self.create_signed_query(&mut params, Utc::now().timestamp_millis())?;

        let url = format!("{}/fapi/v1/order", self.base_url);
        tracing::debug!(%url, order_type = %request.order_type(), "Sending signed order request");

        let response = self
            .http_client
            .post(&url)
            .header("X-MBX-APIKEY", &self.api_key)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(params)
            .send()
            .await
            .map_err(Error::RequestFailed)?;

        let text = response.text().await.map_err(Error::RequestFailed)?;
        parse_order_response(&text)
    }
}

/// Builds the unsigned form body for an order request.
pub(crate) fn order_params(request: &OrderRequest, recv_window: Option<u64>) -> String {
    let mut params = format!(
        "symbol={}&side={}&type={}&quantity={}",
        request.symbol(),
        request.side(),
        request.order_type(),
        request.quantity().normalize(),
    );
    if let Some(price) = request.price() {
        params.push_str(&format!("&price={}", price.normalize()));
    }
    if let Some(tif) = request.time_in_force() {
        params.push_str(&format!("&timeInForce={}", tif));
    }
    if let Some(window) = recv_window {
        params.push_str(&format!("&recvWindow={}", window));
    }
    params
}

/// Parses an order endpoint body, turning Binance `{code, msg}` error objects
/// into `Error::ApiError`.
pub(crate) fn parse_order_response(text: &str) -> Result<NewOrderResponse> {
    let value: Value = serde_json::from_str(text).map_err(Error::DeserializationFailed)?;

    if let Some(code) = value.get("code") {
        // Successful order responses never carry a code.
        let msg = value
            .get("msg")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string();
        return Err(Error::ApiError {
            code: code.as_i64().unwrap_or(-1),
            msg,
        });
    }

    let order_response: NewOrderResponse =
        serde_json::from_value(value).map_err(Error::DeserializationFailed)?;
    Ok(order_response)
}
