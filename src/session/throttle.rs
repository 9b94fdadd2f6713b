//! Render rate limiting.
use std::time::{Duration, Instant};

/// Admits at most one render per `min_interval`. Callers pass the current
/// instant so the policy stays deterministic under test.
#[derive(Clone, Copy, Debug)]
pub struct RenderThrottle {
    min_interval: Duration,
    last: Option<Instant>,
}

impl Default for RenderThrottle {
    fn default() -> Self {
        Self::new(Duration::from_millis(50))
    }
}

impl RenderThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Record and allow a render at `now` if the interval has elapsed.
    pub fn admit(&mut self, now: Instant) -> bool {
        let ready = match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.min_interval,
        };
        if ready {
            self.last = Some(now);
        }
        ready
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
