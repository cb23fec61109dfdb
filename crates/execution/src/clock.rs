// In crates/execution/src/clock.rs

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of order ids for the mock engine.
pub trait OrderIdGenerator: Send + Sync {
    fn next_id(&self) -> u64;
}

/// Uses the current Unix time in seconds, so two orders placed within the
/// same second share an id.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl OrderIdGenerator for SystemClock {
    fn next_id(&self) -> u64 {
        u64::try_from(Utc::now().timestamp()).unwrap_or_default()
    }
}

/// Hands out `start, start + 1, ...`. Deterministic, for tests and replays.
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl OrderIdGenerator for SequentialIds {
    fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
