// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Interval-gate rate limiter for upstream balance queries.
//!
//! The limiter hands out start slots at least one interval apart. A caller
//! reserves the earliest free slot while holding the lock, then sleeps until
//! it outside the lock, so concurrent callers queue in reservation order.
//!
//! Time comes from `tokio::time`, which lets tests pause and advance the
//! clock deterministically.

use std::{sync::Arc, time::Duration};

use tokio::{sync::Mutex, time::Instant};
use tracing::trace;

/// Enforces a minimum interval between the starts of consecutive requests.
///
/// The first acquire on a fresh limiter returns immediately. Each later
/// acquire waits until `interval` has passed since the previous slot. Clones
/// share state, so one limiter can pace every pass against the same API key.
///
/// # Example
///
/// ```rust
/// use supplyscan::transport::RateLimiter;
/// use std::time::Duration;
///
/// # async fn example() {
/// let limiter = RateLimiter::per_second(4);
///
/// for _ in 0..3 {
///     limiter.acquire().await;
///     // issue one request
/// }
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RateLimiter {
    interval: Duration,
    state: Arc<Mutex<RateLimitState>>,
}

impl RateLimiter {
    /// Creates a limiter allowing `requests` per `period`, evenly spaced.
    ///
    /// Requests are spread at `period / requests` rather than allowed in
    /// bursts. A zero `requests` is treated as one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use supplyscan::transport::RateLimiter;
    /// use std::time::Duration;
    ///
    /// // 100 requests per minute, one every 600ms
    /// let limiter = RateLimiter::new(100, Duration::from_secs(60));
    /// assert_eq!(limiter.interval(), Duration::from_millis(600));
    /// ```
    pub fn new(requests: u32, period: Duration) -> Self {
        Self::with_min_delay(period / requests.max(1))
    }

    /// Creates a limiter from requests per second.
    pub fn per_second(requests: u32) -> Self {
        Self::new(requests, Duration::from_secs(1))
    }

    /// Creates a limiter with a fixed minimum delay between request starts.
    pub fn with_min_delay(delay: Duration) -> Self {
        Self {
            interval: delay,
            state: Arc::new(Mutex::new(RateLimitState::default())),
        }
    }

    /// Creates a limiter that never waits.
    pub fn unlimited() -> Self {
        Self::with_min_delay(Duration::ZERO)
    }

    /// Minimum spacing between request starts.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until the caller may start its next request.
    pub async fn acquire(&self) {
        let slot = {
            let mut state = self.state.lock().await;
            state.reserve(Instant::now(), self.interval)
        };

        if slot > Instant::now() {
            trace!(wait = ?slot.saturating_duration_since(Instant::now()), "Rate limit wait");
            tokio::time::sleep_until(slot).await;
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::unlimited()
    }
}

/// Internal state for the interval gate.
#[derive(Debug, Default)]
struct RateLimitState {
    /// Start time handed to the most recent caller
    last_slot: Option<Instant>,
}

impl RateLimitState {
    /// Reserve the earliest slot at or after `now` that respects `interval`.
    fn reserve(&mut self, now: Instant, interval: Duration) -> Instant {
        let slot = match self.last_slot {
            Some(last) => now.max(last + interval),
            None => now,
        };
        self.last_slot = Some(slot);
        slot
    }
}
