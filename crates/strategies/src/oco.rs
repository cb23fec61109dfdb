// In crates/strategies/src/oco.rs

//! Simulated one-cancels-other pair.
//!
//! Both legs are plain limit orders on the side opposite the originating
//! position. After a settle delay the take-profit leg is always reported as
//! executed and the stop-loss leg's cancellation is only logged; no cancel
//! request ever reaches the executor.

use crate::{Error, ExecutionStrategy, Result};
use async_trait::async_trait;
use core_types::{OrderResponse, Side, Symbol, TimeInForce};
use execution::Executor;
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;

/// Bookkeeping status of a simulated pair. Only moves forward:
/// `PlacedBoth -> Executed -> CancelLogged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OcoState {
    PlacedBoth,
    Executed,
    CancelLogged,
}

impl OcoState {
    pub fn next(self) -> Option<OcoState> {
        match self {
            OcoState::PlacedBoth => Some(OcoState::Executed),
            OcoState::Executed => Some(OcoState::CancelLogged),
            OcoState::CancelLogged => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OcoLeg {
    TakeProfit,
    StopLoss,
}

impl OcoLeg {
    pub fn other(self) -> Self {
        match self {
            OcoLeg::TakeProfit => OcoLeg::StopLoss,
            OcoLeg::StopLoss => OcoLeg::TakeProfit,
        }
    }
}

/// The two placed legs plus the simulated outcome.
#[derive(Debug, Clone, Serialize)]
pub struct OcoPair {
    take_profit: OrderResponse,
    stop_loss: OrderResponse,
    state: OcoState,
    executed: Option<OcoLeg>,
}

impl OcoPair {
    pub fn new(take_profit: OrderResponse, stop_loss: OrderResponse) -> Self {
        Self {
            take_profit,
            stop_loss,
            state: OcoState::PlacedBoth,
            executed: None,
        }
    }

    pub fn state(&self) -> OcoState {
        self.state
    }

    pub fn leg(&self, leg: OcoLeg) -> &OrderResponse {
        match leg {
            OcoLeg::TakeProfit => &self.take_profit,
            OcoLeg::StopLoss => &self.stop_loss,
        }
    }

    pub fn take_profit(&self) -> &OrderResponse {
        &self.take_profit
    }

    pub fn stop_loss(&self) -> &OrderResponse {
        &self.stop_loss
    }

    pub fn executed_leg(&self) -> Option<OcoLeg> {
        self.executed
    }

    pub fn executed_order(&self) -> Option<&OrderResponse> {
        self.executed.map(|leg| self.leg(leg))
    }

    /// The leg whose cancellation was logged, once that has happened.
    pub fn cancelled_order(&self) -> Option<&OrderResponse> {
        match (self.state, self.executed) {
            (OcoState::CancelLogged, Some(leg)) => Some(self.leg(leg.other())),
            _ => None,
        }
    }

    fn advance(&mut self, to: OcoState) -> Result<()> {
        if self.state.next() != Some(to) {
            return Err(Error::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }

    /// Records `leg` as the executed one.
    pub fn mark_executed(&mut self, leg: OcoLeg) -> Result<&OrderResponse> {
        self.advance(OcoState::Executed)?;
        self.executed = Some(leg);
        Ok(self.leg(leg))
    }

    /// Logs the cancellation of the leg that did not execute. Nothing is sent
    /// to the exchange.
    pub fn log_cancellation(&mut self) -> Result<&OrderResponse> {
        let Some(executed) = self.executed else {
            return Err(Error::InvalidTransition {
                from: self.state,
                to: OcoState::CancelLogged,
            });
        };
        self.advance(OcoState::CancelLogged)?;

        let other = self.leg(executed.other());
        tracing::info!(
            order_id = other.order_id,
            "Cancellation of the other OCO leg logged (simulation, no cancel request sent)"
        );
        Ok(other)
    }
}

/// Simulated OCO: a take-profit and a stop-loss limit order for the same quantity.
#[derive(Debug, Clone)]
pub struct Oco {
    symbol: Symbol,
    side: Side,
    quantity: Decimal,
    take_profit: Decimal,
    stop_loss: Decimal,
    settle_delay: Duration,
}

impl Oco {
    /// `side` is the side of the originating position; both legs go the other way.
    pub fn new(
        symbol: Symbol,
        side: Side,
        quantity: Decimal,
        take_profit: Decimal,
        stop_loss: Decimal,
        settle_secs: f64,
    ) -> Result<Self> {
        if quantity <= Decimal::ZERO || take_profit <= Decimal::ZERO || stop_loss <= Decimal::ZERO {
            return Err(Error::InvalidParameters(
                "OCO quantity and prices must be > 0".into(),
            ));
        }
        let settle_delay = Duration::try_from_secs_f64(settle_secs).map_err(|_| {
            Error::InvalidParameters(format!(
                "OCO settle delay must be a non-negative number of seconds, got {settle_secs}"
            ))
        })?;
        Ok(Self {
            symbol,
            side,
            quantity,
            take_profit,
            stop_loss,
            settle_delay,
        })
    }

    /// The side both legs are placed on.
    pub fn leg_side(&self) -> Side {
        self.side.opposite()
    }
}

#[async_trait]
impl ExecutionStrategy for Oco {
    type Outcome = OcoPair;

    fn name(&self) -> &'static str {
        "OCO"
    }

    async fn run(&self, executor: &dyn Executor) -> Result<OcoPair> {
        let leg_side = self.leg_side();
        tracing::info!(strategy = self.name(), symbol = %self.symbol, "Placing simulated OCO orders...");

        let take_profit = executor
            .place_limit_order(&self.symbol, leg_side, self.quantity, self.take_profit, TimeInForce::Gtc)
            .await?;
        let stop_loss = executor
            .place_limit_order(&self.symbol, leg_side, self.quantity, self.stop_loss, TimeInForce::Gtc)
            .await
            .inspect_err(|_| {
                tracing::warn!(
                    order_id = take_profit.order_id,
                    "Stop-loss leg failed; take-profit leg stays open"
                );
            })?;
        let mut pair = OcoPair::new(take_profit, stop_loss);

        tracing::info!("OCO simulated: waiting for a simulated execution...");
        tokio::time::sleep(self.settle_delay).await;

        // Prices are not compared: the take-profit leg always wins.
        let executed_id = pair.mark_executed(OcoLeg::TakeProfit)?.order_id;
        tracing::info!("Simulated order executed: {}. Cancelling the other.", executed_id);
        pair.log_cancellation()?;

        Ok(pair)
    }
}
