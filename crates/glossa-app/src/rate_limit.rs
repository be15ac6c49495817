use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use governor::clock::{Clock, DefaultClock};
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};
use tokio_util::sync::CancellationToken;

/// Per-identity lookup budget over a rolling window.
///
/// Keys are user ids or caller addresses; stale keys are evicted by a
/// periodic sweep so the table does not grow with one-off callers.
pub struct LookupRateLimiter {
    limiter: RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>,
    clock: DefaultClock,
}

impl LookupRateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        let burst = NonZeroU32::new(max_requests.max(1)).unwrap_or(NonZeroU32::MIN);
        let replenish = window
            .checked_div(burst.get())
            .filter(|interval| !interval.is_zero())
            .unwrap_or(Duration::from_millis(1));

        let quota = Quota::with_period(replenish)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        let clock = DefaultClock::default();
        let limiter = RateLimiter::new(quota, DefaultKeyedStateStore::default(), clock.clone());

        Self { limiter, clock }
    }

    /// Check one request against the caller's budget. On rejection, returns
    /// the earliest instant at which a retry can succeed.
    pub fn check(&self, key: &str) -> Result<(), DateTime<Utc>> {
        match self.limiter.check_key(&key.to_string()) {
            Ok(()) => Ok(()),
            Err(not_until) => {
                let wait = not_until.wait_time_from(self.clock.now());
                let reset_at = Utc::now()
                    + chrono::Duration::from_std(wait)
                        .unwrap_or_else(|_| chrono::Duration::seconds(1));
                Err(reset_at)
            }
        }
    }

    /// Drop state for keys whose budget has fully replenished.
    pub fn sweep(&self) {
        self.limiter.retain_recent();
    }

    /// Periodic eviction task; stops when the token is cancelled.
    pub fn spawn_sweeper(
        self: &Arc<Self>,
        interval: Duration,
        cancel: CancellationToken,
    ) -> tokio::task::JoinHandle<()> {
        let limiter = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // immediate first tick

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        limiter.sweep();
                    }
                    _ = cancel.cancelled() => {
                        tracing::debug!("rate limiter sweeper stopped");
                        break;
                    }
                }
            }
        })
    }
}
