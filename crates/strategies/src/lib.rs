// In crates/strategies/src/lib.rs

use async_trait::async_trait;
use execution::Executor;

pub mod error;
pub mod oco;
pub mod twap;

pub use error::{Error, Result};
pub use oco::{Oco, OcoLeg, OcoPair, OcoState};
pub use twap::{Twap, TwapPlan};

/// The universal interface for a simulated execution strategy.
///
/// A strategy composes several placements on one `Executor`, with simple
/// timing between them, and returns whatever it collected along the way.
/// Everything runs sequentially on the caller's task.
#[async_trait]
pub trait ExecutionStrategy: Send + Sync {
    type Outcome: Send;

    /// The name of the strategy.
    fn name(&self) -> &'static str;

    async fn run(&self, executor: &dyn Executor) -> Result<Self::Outcome>;
}
