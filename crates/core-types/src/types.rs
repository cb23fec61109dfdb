// In crates/core-types/src/types.rs

use crate::validation::validate_symbol;
use crate::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A trading pair symbol, e.g. "BTCUSDT".
///
/// Only obtainable through `validate_symbol`, so holding one means the
/// format check already passed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(pub(crate) String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        validate_symbol(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        validate_symbol(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

/// Represents the side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side that closes a position opened on `self`.
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::validation::validate_side(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Market,
    Limit,
}

impl OrderType {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How long a limit order stays on the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good-til-cancelled.
    #[default]
    Gtc,
    /// Immediate-or-cancel.
    Ioc,
    /// Fill-or-kill.
    Fok,
}

impl TimeInForce {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
            TimeInForce::Ioc => "IOC",
            TimeInForce::Fok => "FOK",
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeInForce {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GTC" => Ok(TimeInForce::Gtc),
            "IOC" => Ok(TimeInForce::Ioc),
            "FOK" => Ok(TimeInForce::Fok),
            _ => Err(Error::validation(
                "time_in_force",
                "Time in force must be GTC, IOC or FOK",
            )),
        }
    }
}

/// Order lifecycle status, in the exchange's wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    PartiallyFilled,
    Filled,
    Canceled,
    Rejected,
    Expired,
}

/// Where orders are sent: fabricated locally or forwarded to the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Mock,
    Live,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Mock => f.write_str("mock"),
            Mode::Live => f.write_str("live"),
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mock" => Ok(Mode::Mock),
            "live" => Ok(Mode::Live),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

/// A validated, immutable order ready to hand to an executor.
///
/// Fields are private: the only way in is `market` or `limit`, both of which
/// reject non-positive quantities and prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    symbol: Symbol,
    side: Side,
    quantity: Decimal,
    order_type: OrderType,
    price: Option<Decimal>,
    time_in_force: Option<TimeInForce>,
}

impl OrderRequest {
    pub fn market(symbol: Symbol, side: Side, quantity: Decimal) -> Result<Self> {
        ensure_positive(quantity, "quantity", "Quantity")?;
        Ok(Self {
            symbol,
            side,
            quantity,
            order_type: OrderType::Market,
            price: None,
            time_in_force: None,
        })
    }

    pub fn limit(
        symbol: Symbol,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        time_in_force: TimeInForce,
    ) -> Result<Self> {
        ensure_positive(quantity, "quantity", "Quantity")?;
        ensure_positive(price, "price", "Price")?;
        Ok(Self {
            symbol,
            side,
            quantity,
            order_type: OrderType::Limit,
            price: Some(price),
            time_in_force: Some(time_in_force),
        })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Limit price; `None` for market orders.
    pub fn price(&self) -> Option<Decimal> {
        self.price
    }

    pub fn time_in_force(&self) -> Option<TimeInForce> {
        self.time_in_force
    }
}

impl fmt::Display for OrderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.symbol, self.side, self.quantity)?;
        if let Some(price) = self.price {
            write!(f, " @ {}", price)?;
        }
        Ok(())
    }
}

fn ensure_positive(value: Decimal, field: &'static str, label: &str) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(Error::validation(field, format!("{label} must be > 0")));
    }
    Ok(())
}

/// The price echoed on an order response: the literal string "market" for
/// market orders, otherwise the limit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OrderPrice {
    Market,
    Limit(Decimal),
}

impl From<OrderPrice> for String {
    fn from(price: OrderPrice) -> Self {
        match price {
            OrderPrice::Market => "market".to_string(),
            OrderPrice::Limit(p) => p.to_string(),
        }
    }
}

impl TryFrom<String> for OrderPrice {
    type Error = rust_decimal::Error;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        if value.eq_ignore_ascii_case("market") {
            return Ok(OrderPrice::Market);
        }
        Decimal::from_str(&value).map(OrderPrice::Limit)
    }
}

/// The outcome of a single placement call. Created once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: u64,
    pub symbol: Symbol,
    pub status: OrderStatus,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub orig_qty: Decimal,
    pub executed_qty: Decimal,
    pub price: OrderPrice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn btc() -> Symbol {
        "BTCUSDT".parse().unwrap()
    }

    #[test]
    fn opposite_side_flips() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn limit_request_carries_price_and_tif() {
        let req = OrderRequest::limit(btc(), Side::Buy, dec!(0.001), dec!(60000), TimeInForce::default()).unwrap();
        assert_eq!(req.order_type(), OrderType::Limit);
        assert_eq!(req.price(), Some(dec!(60000)));
        assert_eq!(req.time_in_force(), Some(TimeInForce::Gtc));
        assert_eq!(req.to_string(), "BTCUSDT BUY 0.001 @ 60000");
    }

    #[test]
    fn requests_reject_non_positive_values() {
        assert!(OrderRequest::market(btc(), Side::Sell, dec!(0)).is_err());
        assert!(OrderRequest::limit(btc(), Side::Sell, dec!(1), dec!(-5), TimeInForce::Gtc).is_err());
    }

    #[test]
    fn symbol_deserialization_is_validated() {
        let ok: Symbol = serde_json::from_str("\"ETHUSDT\"").unwrap();
        assert_eq!(ok.as_str(), "ETHUSDT");
        assert!(serde_json::from_str::<Symbol>("\"eth\"").is_err());
    }

    #[test]
    fn market_response_serializes_with_exchange_keys() {
        let resp = OrderResponse {
            order_id: 1_700_000_000,
            symbol: btc(),
            status: OrderStatus::Filled,
            side: Side::Buy,
            order_type: OrderType::Market,
            orig_qty: dec!(0.002),
            executed_qty: dec!(0.002),
            price: OrderPrice::Market,
            time_in_force: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["orderId"], 1_700_000_000u64);
        assert_eq!(json["status"], "FILLED");
        assert_eq!(json["side"], "BUY");
        assert_eq!(json["type"], "MARKET");
        assert_eq!(json["executedQty"], "0.002");
        assert_eq!(json["price"], "market");
        assert!(json.get("timeInForce").is_none());

        let back: OrderResponse = serde_json::from_value(json).unwrap();
        assert_eq!(back, resp);
    }

    #[test]
    fn mode_parses_known_values_only() {
        assert_eq!("mock".parse::<Mode>().unwrap(), Mode::Mock);
        assert_eq!("live".parse::<Mode>().unwrap(), Mode::Live);
        assert!("paper".parse::<Mode>().is_err());
    }

    #[test]
    fn time_in_force_parses_case_insensitively() {
        assert_eq!("ioc".parse::<TimeInForce>().unwrap(), TimeInForce::Ioc);
        assert!("DAY".parse::<TimeInForce>().is_err());
    }
}
