//! Per-host politeness delay between fetches.
//!
//! An explicit context object owned by the pipeline, not process-global
//! state. The pipeline is single-tasked, so a plain map of timestamps is the
//! whole synchronization story: no fetch to a host may start until
//! [`RateLimiter::delay`] has elapsed since the previous fetch to that host.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::{Instant, sleep};

/// Default minimum delay between successive fetches to one host.
pub const REQUEST_DELAY: Duration = Duration::from_millis(2500);

/// Tracks the last fetch time per host and enforces the delay.
#[derive(Debug)]
pub struct RateLimiter {
    delay: Duration,
    last_fetch: HashMap<String, Instant>,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        Self { delay, last_fetch: HashMap::new() }
    }

    /// Blocks until the host is allowed another fetch, then records the new
    /// fetch time. The first fetch to a host never waits.
    pub async fn wait(&mut self, host: &str) {
        if let Some(last) = self.last_fetch.get(host) {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                let remaining = self.delay - elapsed;
                tracing::debug!(host, wait_ms = remaining.as_millis() as u64, "rate limit wait");
                sleep(remaining).await;
            }
        }
        self.last_fetch.insert(host.to_string(), Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(REQUEST_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_fetch_never_waits() {
        let mut limiter = RateLimiter::default();
        let start = Instant::now();

        limiter.wait("example.com").await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_host_waits_full_delay() {
        let mut limiter = RateLimiter::new(Duration::from_millis(2500));
        let start = Instant::now();

        limiter.wait("example.com").await;
        limiter.wait("example.com").await;
        assert!(start.elapsed() >= Duration::from_millis(2500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hosts_are_limited_independently() {
        let mut limiter = RateLimiter::new(Duration::from_millis(2500));
        let start = Instant::now();

        limiter.wait("a.example.com").await;
        limiter.wait("b.example.com").await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_time_counts_toward_delay() {
        let mut limiter = RateLimiter::new(Duration::from_millis(2500));

        limiter.wait("example.com").await;
        sleep(Duration::from_millis(2000)).await;

        let before = Instant::now();
        limiter.wait("example.com").await;
        assert_eq!(before.elapsed(), Duration::from_millis(500));
    }
}
