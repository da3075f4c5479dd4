// Path: crates/telemetry/src/time.rs
use std::time::{Duration, Instant};

/// Logs the wall-clock duration of a named phase when dropped.
pub struct PhaseTimer {
    phase: &'static str,
    start: Instant,
}

impl PhaseTimer {
    pub fn new(phase: &'static str) -> Self {
        Self {
            phase,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for PhaseTimer {
    fn drop(&mut self) {
        tracing::info!(
            phase = self.phase,
            elapsed_ms = self.start.elapsed().as_millis() as u64,
            "phase finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_monotonic() {
        let timer = PhaseTimer::new("test");
        let first = timer.elapsed();
        std::thread::sleep(Duration::from_millis(2));
        assert!(timer.elapsed() > first);
    }
}
