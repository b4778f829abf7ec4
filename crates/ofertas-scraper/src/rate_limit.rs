//! Minimum-interval gate between fetch starts.
//!
//! One gate is shared by every caller of a [`crate::PageClient`] instance;
//! the interval applies system-wide, not per URL.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum interval between the starts of consecutive fetches.
///
/// The mutex on the last start time is held across the wait, so when the
/// gate is shared by concurrent callers their starts serialize: no two
/// fetches begin within the same interval.
pub struct RateGate {
    interval: Duration,
    last_start: Mutex<Option<Instant>>,
}

impl RateGate {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_start: Mutex::new(None),
        }
    }

    /// Suspends until at least the configured interval has passed since the
    /// previous fetch started, then records the new start time.
    pub async fn acquire(&self) {
        let mut last = self.last_start.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.interval {
                tokio::time::sleep(self.interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
