//! HTTP fetching with retry and exponential backoff.
//!
//! One GET per seed URL, with transient failures (timeouts, connection
//! errors, HTTP 429 and 5xx) retried up to [`FetchConfig::max_retries`]
//! times. Non-transient statuses fail on first sight. All outcomes are
//! reported to the caller; nothing is silently dropped.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{ColligoError, Result};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent declared on every request, including robots.txt fetches.
    pub user_agent: String,
    /// Retries after the initial attempt for transient failures.
    pub max_retries: u32,
    /// Backoff base: attempt N waits `retry_base_delay * 2^(N-1)`.
    pub retry_base_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 20,
            user_agent: "Mozilla/5.0 (compatible; Colligo/0.1; +https://github.com/stormlightlabs/colligo)"
                .to_string(),
            max_retries: 3,
            retry_base_delay: Duration::from_secs(1),
        }
    }
}

/// A successfully fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final HTTP status code.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
    /// Number of attempts it took, counting the successful one.
    pub attempts: u32,
}

/// Builds the shared HTTP client carrying the user agent and timeout.
pub fn build_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(&config.user_agent)
        .build()
        .map_err(ColligoError::Http)
}

/// Fetches a URL, retrying transient failures with exponential backoff.
///
/// # Errors
///
/// - [`ColligoError::HttpStatus`] for a non-transient status, or a transient
///   one once retries are exhausted.
/// - [`ColligoError::Timeout`] when the final attempt timed out.
/// - [`ColligoError::Http`] for terminal transport errors.
pub async fn fetch_url(client: &Client, url: &Url, config: &FetchConfig) -> Result<FetchedPage> {
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;

        let result = client
            .get(url.clone())
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await;

        match result {
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    let body = response.text().await?;
                    return Ok(FetchedPage { status: status.as_u16(), body, attempts: attempt });
                }

                let transient = status.as_u16() == 429 || status.is_server_error();
                if transient && attempt <= config.max_retries {
                    let delay = backoff_delay(config.retry_base_delay, attempt);
                    tracing::debug!(%url, status = status.as_u16(), attempt, delay_ms = delay.as_millis() as u64, "transient status, retrying");
                    tokio::time::sleep(delay).await;
                    continue;
                }

                return Err(ColligoError::HttpStatus { status: status.as_u16(), attempts: attempt });
            }
            Err(e) => {
                if (e.is_timeout() || e.is_connect()) && attempt <= config.max_retries {
                    let delay = backoff_delay(config.retry_base_delay, attempt);
                    tracing::debug!(%url, error = %e, attempt, delay_ms = delay.as_millis() as u64, "transport error, retrying");
                    tokio::time::sleep(delay).await;
                    continue;
                }

                if e.is_timeout() {
                    return Err(ColligoError::Timeout { timeout: config.timeout });
                }
                return Err(ColligoError::Http(e));
            }
        }
    }
}

/// `base * 2^(attempt-1)`, with the exponent capped so the multiply cannot
/// overflow.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(16);
    base.saturating_mul(2u32.pow(exponent))
}
