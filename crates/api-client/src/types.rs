// In crates/api-client/src/types.rs

use core_types::{OrderPrice, OrderResponse, OrderStatus, OrderType, Side, Symbol, TimeInForce};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

/// The main client for interacting with the Binance Futures API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// The persistent HTTP client.
    pub http_client: Client,
    /// The user's Binance API key.
    pub api_key: String,
    /// The user's Binance secret key.
    pub(crate) secret_key: String,
    /// The base URL for the Binance Futures API.
    pub base_url: String,
    /// `recvWindow` appended to signed requests, if set.
    pub recv_window: Option<u64>,
}

/// Response of `POST /fapi/v1/order`.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderResponse {
    pub order_id: u64,
    pub symbol: String,
    pub status: OrderStatus,
    pub side: Side,
    pub r#type: OrderType,
    pub orig_qty: Decimal,
    pub executed_qty: Decimal,
    pub price: Decimal,
    #[serde(default)]
    pub avg_price: Option<Decimal>,
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
}

impl NewOrderResponse {
    /// Converts the exchange payload into the shared response type.
    ///
    /// Market orders report `price = 0` on the exchange; they are echoed with
    /// the "market" sentinel like their mock counterparts.
    pub fn into_order_response(self) -> crate::Result<OrderResponse> {
        let symbol: Symbol = self.symbol.parse()?;
        let price = match self.r#type {
            OrderType::Market => OrderPrice::Market,
            OrderType::Limit => OrderPrice::Limit(self.price),
        };
        let time_in_force = match self.r#type {
            OrderType::Market => None,
            OrderType::Limit => self.time_in_force,
        };
        Ok(OrderResponse {
            order_id: self.order_id,
            symbol,
            status: self.status,
            side: self.side,
            order_type: self.r#type,
            orig_qty: self.orig_qty,
            executed_qty: self.executed_qty,
            price,
            time_in_force,
        })
    }
}
