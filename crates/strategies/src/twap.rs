// In crates/strategies/src/twap.rs

use crate::{Error, ExecutionStrategy, Result};
use async_trait::async_trait;
use core_types::{OrderResponse, Side, Symbol};
use execution::Executor;
use rust_decimal::Decimal;
use std::time::Duration;

/// How a TWAP run splits its quantity over time. Derived from the operator's
/// input and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TwapPlan {
    total_quantity: Decimal,
    chunks: u32,
    per_chunk: Decimal,
    interval: Duration,
}

impl TwapPlan {
    pub fn new(total_quantity: Decimal, chunks: u32, interval_secs: f64) -> Result<Self> {
        if total_quantity <= Decimal::ZERO {
            return Err(Error::InvalidParameters("TWAP quantity must be > 0".into()));
        }
        if chunks == 0 {
            return Err(Error::InvalidParameters("TWAP needs at least one chunk".into()));
        }
        let interval = Duration::try_from_secs_f64(interval_secs).map_err(|_| {
            Error::InvalidParameters(format!(
                "TWAP interval must be a non-negative number of seconds, got {interval_secs}"
            ))
        })?;

        let plan = Self {
            total_quantity,
            chunks,
            per_chunk: total_quantity / Decimal::from(chunks),
            interval,
        };
        // Division rounds, so the remainder chunk can vanish at the precision limit.
        if plan.per_chunk <= Decimal::ZERO || plan.last_chunk() <= Decimal::ZERO {
            return Err(Error::InvalidParameters(format!(
                "quantity {total_quantity} is too small to split into {chunks} chunks"
            )));
        }
        Ok(plan)
    }

    fn last_chunk(&self) -> Decimal {
        self.total_quantity - self.per_chunk * Decimal::from(self.chunks - 1)
    }

    pub fn total_quantity(&self) -> Decimal {
        self.total_quantity
    }

    pub fn chunks(&self) -> u32 {
        self.chunks
    }

    pub fn per_chunk(&self) -> Decimal {
        self.per_chunk
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The size of every chunk, in placement order.
    ///
    /// All chunks are `per_chunk` except the last, which takes whatever is left
    /// so the sizes add up to the total exactly.
    pub fn chunk_quantities(&self) -> Vec<Decimal> {
        let mut quantities = vec![self.per_chunk; (self.chunks - 1) as usize];
        quantities.push(self.last_chunk());
        quantities
    }
}

/// Splits one market order into equal chunks placed `interval` apart.
#[derive(Debug, Clone)]
pub struct Twap {
    symbol: Symbol,
    side: Side,
    plan: TwapPlan,
}

impl Twap {
    pub fn new(symbol: Symbol, side: Side, plan: TwapPlan) -> Self {
        Self { symbol, side, plan }
    }

    pub fn plan(&self) -> &TwapPlan {
        &self.plan
    }
}

#[async_trait]
impl ExecutionStrategy for Twap {
    type Outcome = Vec<OrderResponse>;

    fn name(&self) -> &'static str {
        "TWAP"
    }

    /// Places every chunk in order, sleeping `interval` after each one
    /// (including the last). The first failure stops the run.
    async fn run(&self, executor: &dyn Executor) -> Result<Vec<OrderResponse>> {
        let chunks = self.plan.chunks;
        tracing::info!(
            strategy = self.name(),
            symbol = %self.symbol,
            side = %self.side,
            total = %self.plan.total_quantity,
            "Starting {}: {} chunks, {} each",
            self.name(),
            chunks,
            self.plan.per_chunk
        );

        let mut results = Vec::with_capacity(chunks as usize);
        for (chunk, quantity) in (1..=chunks).zip(self.plan.chunk_quantities()) {
            tracing::info!("Placing chunk {}/{}", chunk, chunks);

            let response = executor
                .place_market_order(&self.symbol, self.side, quantity)
                .await
                .map_err(|source| {
                    tracing::error!(
                        error = %source,
                        placed = results.len(),
                        "TWAP chunk {}/{} failed; stopping with earlier chunks left in place",
                        chunk,
                        chunks
                    );
                    Error::ChunkFailed {
                        chunk,
                        chunks,
                        placed: results.len(),
                        source,
                    }
                })?;
            results.push(response);

            tokio::time::sleep(self.plan.interval).await;
        }

        tracing::info!("TWAP simulation completed.");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingExecutor;
    use core_types::{OrderStatus, OrderType};
    use rust_decimal_macros::dec;
    use tokio::time::Instant;

    fn btc() -> Symbol {
        "BTCUSDT".parse().unwrap()
    }

    #[test]
    fn exact_split_gives_identical_chunks() {
        let plan = TwapPlan::new(dec!(0.01), 5, 1.0).unwrap();
        assert_eq!(plan.per_chunk(), dec!(0.002));
        assert_eq!(plan.chunk_quantities(), vec![dec!(0.002); 5]);
    }

    #[test]
    fn inexact_split_still_sums_to_total() {
        let plan = TwapPlan::new(dec!(1), 3, 0.0).unwrap();
        let quantities = plan.chunk_quantities();
        assert_eq!(quantities.len(), 3);
        assert_eq!(quantities[0], quantities[1]);
        assert_eq!(quantities.iter().copied().sum::<Decimal>(), dec!(1));
    }

    #[test]
    fn single_chunk_is_the_whole_order() {
        let plan = TwapPlan::new(dec!(0.7), 1, 2.5).unwrap();
        assert_eq!(plan.chunk_quantities(), vec![dec!(0.7)]);
        assert_eq!(plan.interval(), Duration::from_millis(2500));
    }

    #[test]
    fn rejects_bad_plans() {
        assert!(matches!(TwapPlan::new(dec!(1), 0, 1.0), Err(Error::InvalidParameters(_))));
        assert!(matches!(TwapPlan::new(dec!(0), 5, 1.0), Err(Error::InvalidParameters(_))));
        assert!(matches!(TwapPlan::new(dec!(1), 5, -1.0), Err(Error::InvalidParameters(_))));
        assert!(matches!(TwapPlan::new(dec!(1), 5, f64::NAN), Err(Error::InvalidParameters(_))));
    }

    #[test]
    fn rejects_splits_whose_last_chunk_rounds_away() {
        // 1e-27 / 6 rounds up to 2e-28, leaving nothing for the sixth chunk.
        let err = TwapPlan::new(dec!(0.000000000000000000000000001), 6, 0.0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameters(ref msg) if msg.contains("too small")));
        assert!(matches!(
            TwapPlan::new(dec!(0.0000000000000000000000000002), 3, 0.0),
            Err(Error::InvalidParameters(_))
        ));

        let plan = TwapPlan::new(dec!(0.0000000000000000000000000003), 3, 0.0).unwrap();
        assert!(plan.chunk_quantities().iter().all(|q| *q > Decimal::ZERO));
        assert_eq!(plan.total_quantity(), dec!(0.0000000000000000000000000003));
    }

    #[tokio::test(start_paused = true)]
    async fn places_each_chunk_in_order_with_interval_between() {
        let executor = RecordingExecutor::new();
        let twap = Twap::new(btc(), Side::Buy, TwapPlan::new(dec!(0.01), 5, 1.0).unwrap());

        let start = Instant::now();
        let results = twap.run(&executor).await.unwrap();

        assert_eq!(results.len(), 5);
        for (i, resp) in results.iter().enumerate() {
            assert_eq!(resp.order_id, i as u64 + 1);
            assert_eq!(resp.order_type, OrderType::Market);
            assert_eq!(resp.status, OrderStatus::Filled);
            assert_eq!(resp.side, Side::Buy);
            assert_eq!(resp.executed_qty, dec!(0.002));
        }

        let calls = executor.calls();
        assert_eq!(calls.len(), 5);
        for pair in calls.windows(2) {
            let gap = pair[1].1 - pair[0].1;
            assert!(gap >= Duration::from_secs(1) && gap < Duration::from_millis(1010), "gap {gap:?}");
        }
        assert!(calls.iter().all(|(req, _)| req.quantity() == dec!(0.002)));
        // The pause also follows the final chunk.
        assert!(start.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_chunk_stops_the_run() {
        let executor = RecordingExecutor::failing_on(3);
        let twap = Twap::new(btc(), Side::Sell, TwapPlan::new(dec!(1), 5, 0.5).unwrap());

        let err = twap.run(&executor).await.unwrap_err();
        match err {
            Error::ChunkFailed { chunk, chunks, placed, .. } => {
                assert_eq!((chunk, chunks, placed), (3, 5, 2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(executor.calls().len(), 3);
    }
}
