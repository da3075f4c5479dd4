// Path: crates/client/src/pacer.rs
use std::time::Duration;
use tokio::time::sleep;

/// Enforces a fixed pause between consecutive remote calls.
///
/// The first call goes out immediately; every later call waits `interval`
/// first, so no pause trails the last call of a batch.
#[derive(Debug, Clone)]
pub struct Pacer {
    interval: Duration,
    calls: usize,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval, calls: 0 }
    }

    /// Call immediately before each remote call.
    pub async fn ready(&mut self) {
        if self.calls > 0 && !self.interval.is_zero() {
            sleep(self.interval).await;
        }
        self.calls += 1;
    }

    /// Number of calls paced so far.
    pub fn calls(&self) -> usize {
        self.calls
    }
}
