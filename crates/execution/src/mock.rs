// In crates/execution/src/mock.rs

use crate::clock::{OrderIdGenerator, SystemClock};
use crate::{Executor, Result};
use async_trait::async_trait;
use core_types::{Mode, OrderPrice, OrderRequest, OrderResponse, OrderStatus, OrderType};
use rust_decimal::Decimal;

/// Fabricates exchange responses locally. No network, no book, no error path.
///
/// Market orders come back `FILLED` for the full quantity with the "market"
/// price sentinel; limit orders come back `NEW` with nothing executed.
pub struct MockExecutor<G = SystemClock> {
    ids: G,
}

impl MockExecutor<SystemClock> {
    pub fn new() -> Self {
        Self { ids: SystemClock }
    }
}

impl Default for MockExecutor<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: OrderIdGenerator> MockExecutor<G> {
    /// Uses `ids` instead of the wall clock for order ids.
    pub fn with_id_generator(ids: G) -> Self {
        Self { ids }
    }

    fn fabricate(&self, request: &OrderRequest) -> OrderResponse {
        let order_id = self.ids.next_id();
        match request.order_type() {
            OrderType::Market => OrderResponse {
                order_id,
                symbol: request.symbol().clone(),
                status: OrderStatus::Filled,
                side: request.side(),
                order_type: OrderType::Market,
                orig_qty: request.quantity(),
                executed_qty: request.quantity(),
                price: OrderPrice::Market,
                time_in_force: None,
            },
            OrderType::Limit => OrderResponse {
                order_id,
                symbol: request.symbol().clone(),
                status: OrderStatus::New,
                side: request.side(),
                order_type: OrderType::Limit,
                orig_qty: request.quantity(),
                executed_qty: Decimal::ZERO,
                // Limit requests always carry a price.
                price: request.price().map_or(OrderPrice::Market, OrderPrice::Limit),
                time_in_force: request.time_in_force(),
            },
        }
    }
}

#[async_trait]
impl<G: OrderIdGenerator> Executor for MockExecutor<G> {
    fn name(&self) -> &'static str {
        "MockExecutor"
    }

    fn mode(&self) -> Mode {
        Mode::Mock
    }

    async fn place_order(&self, request: &OrderRequest) -> Result<OrderResponse> {
        crate::log_placement(Mode::Mock, request);
        let response = self.fabricate(request);
        if let Ok(json) = serde_json::to_string(&response) {
            tracing::debug!("{}", json);
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SequentialIds;
    use core_types::{Side, Symbol, TimeInForce};
    use rust_decimal_macros::dec;

    fn btc() -> Symbol {
        "BTCUSDT".parse().unwrap()
    }

    fn executor() -> MockExecutor<SequentialIds> {
        MockExecutor::with_id_generator(SequentialIds::starting_at(1))
    }

    #[tokio::test]
    async fn market_orders_are_filled_and_echoed() {
        let resp = executor()
            .place_market_order(&btc(), Side::Buy, dec!(0.001))
            .await
            .unwrap();

        assert_eq!(resp.order_id, 1);
        assert_eq!(resp.symbol, btc());
        assert_eq!(resp.status, OrderStatus::Filled);
        assert_eq!(resp.side, Side::Buy);
        assert_eq!(resp.orig_qty, dec!(0.001));
        assert_eq!(resp.executed_qty, dec!(0.001));
        assert_eq!(resp.price, OrderPrice::Market);
    }

    #[tokio::test]
    async fn limit_orders_are_new_and_echo_price() {
        let resp = executor()
            .place_limit_order(&btc(), Side::Sell, dec!(0.5), dec!(60000), TimeInForce::Gtc)
            .await
            .unwrap();

        assert_eq!(resp.status, OrderStatus::New);
        assert_eq!(resp.side, Side::Sell);
        assert_eq!(resp.orig_qty, dec!(0.5));
        assert_eq!(resp.executed_qty, Decimal::ZERO);
        assert_eq!(resp.price, OrderPrice::Limit(dec!(60000)));
        assert_eq!(resp.time_in_force, Some(TimeInForce::Gtc));
    }

    #[tokio::test]
    async fn ids_come_from_the_injected_generator() {
        let exec = executor();
        let first = exec.place_market_order(&btc(), Side::Buy, dec!(1)).await.unwrap();
        let second = exec.place_market_order(&btc(), Side::Buy, dec!(1)).await.unwrap();
        assert_eq!((first.order_id, second.order_id), (1, 2));
    }

    #[tokio::test]
    async fn non_positive_quantity_never_reaches_the_engine() {
        let err = executor()
            .place_market_order(&btc(), Side::Buy, dec!(0))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::InvalidOrder(_)));
    }
}
