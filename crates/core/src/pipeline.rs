//! Batch orchestration: validate, robots-check, rate-limit, fetch, extract,
//! persist — strictly in that order, strictly sequentially, one URL at a
//! time in input order.
//!
//! Every per-URL failure becomes a recorded [`UrlOutcome`]; a single bad URL
//! never aborts the batch. The only fatal path is an unusable output
//! directory, which aborts before any fetch happens.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;

use crate::extract::{ExtractConfig, extract_text};
use crate::fetch::{FetchConfig, build_client, fetch_url};
use crate::limiter::{RateLimiter, REQUEST_DELAY};
use crate::output;
use crate::robots::RobotsChecker;
use crate::validate::{host_key, parse_seed_url};
use crate::{ColligoError, Result};

/// One batch invocation: a subject and their seed URLs, in order.
#[derive(Debug, Clone)]
pub struct SeedRequest {
    pub subject_name: String,
    pub urls: Vec<String>,
}

impl SeedRequest {
    pub fn new(subject_name: impl Into<String>, urls: Vec<String>) -> Self {
        Self { subject_name: subject_name.into(), urls }
    }
}

/// Classified outcome for one seed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlStatus {
    /// Text extracted and written to an output file.
    Success,
    /// The seed string is not a fetchable http/https URL.
    InvalidUrl,
    /// The host's robots.txt disallows our user agent; no content GET issued.
    RobotsDisallowed,
    /// Terminal HTTP failure. The code is 0 when no response was received
    /// at all (DNS failure, connection refused after retries).
    HttpError(u16),
    /// The request still timed out after retries.
    Timeout,
    /// The page fetched but no strategy extracted usable text.
    ParseError,
}

/// Recorded result for one seed URL.
#[derive(Debug, Clone)]
pub struct UrlOutcome {
    pub url: String,
    pub status: UrlStatus,
    /// Path of the written file, for successes only.
    pub output_path: Option<PathBuf>,
}

/// Configuration for a batch run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub fetch: FetchConfig,
    pub extract: ExtractConfig,
    /// Minimum delay between fetches to the same host.
    pub request_delay: Duration,
    /// Directory receiving the raw text files.
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            extract: ExtractConfig::default(),
            request_delay: REQUEST_DELAY,
            output_dir: PathBuf::from(output::RAW_DATA_DIR),
        }
    }
}

/// Drives the whole per-URL sequence and owns all cross-cutting state: the
/// HTTP client, the robots cache, and the rate limiter.
pub struct Pipeline {
    config: PipelineConfig,
    client: Client,
    robots: RobotsChecker,
    limiter: RateLimiter,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let client = build_client(&config.fetch)?;
        let robots = RobotsChecker::new(client.clone(), config.fetch.user_agent.clone());
        let limiter = RateLimiter::new(config.request_delay);

        Ok(Self { config, client, robots, limiter })
    }

    /// Processes every seed URL in order and returns one outcome per URL.
    ///
    /// # Errors
    ///
    /// Only configuration-level failures (uncreatable or unwritable output
    /// directory) abort the batch; everything else is a recorded outcome.
    pub async fn run(&mut self, request: &SeedRequest) -> Result<Vec<UrlOutcome>> {
        output::ensure_output_dir(&self.config.output_dir)?;

        let mut outcomes = Vec::with_capacity(request.urls.len());
        for (i, raw_url) in request.urls.iter().enumerate() {
            let (status, output_path) = self.process_url(&request.subject_name, raw_url, i + 1).await?;

            tracing::info!(url = %raw_url, status = ?status, "seed URL processed");
            outcomes.push(UrlOutcome { url: raw_url.clone(), status, output_path });
        }

        Ok(outcomes)
    }

    async fn process_url(&mut self, subject: &str, raw_url: &str, index: usize) -> Result<(UrlStatus, Option<PathBuf>)> {
        let url = match parse_seed_url(raw_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(url = raw_url, error = %e, "rejected seed URL");
                return Ok((UrlStatus::InvalidUrl, None));
            }
        };

        if !self.robots.check(&url).await.is_allowed() {
            return Ok((UrlStatus::RobotsDisallowed, None));
        }

        self.limiter.wait(&host_key(&url)).await;

        let page = match fetch_url(&self.client, &url, &self.config.fetch).await {
            Ok(page) => page,
            Err(ColligoError::Timeout { .. }) => return Ok((UrlStatus::Timeout, None)),
            Err(ColligoError::HttpStatus { status, attempts }) => {
                tracing::debug!(%url, status, attempts, "terminal HTTP status");
                return Ok((UrlStatus::HttpError(status), None));
            }
            Err(e) => {
                tracing::debug!(%url, error = %e, "fetch failed without a response");
                return Ok((UrlStatus::HttpError(0), None));
            }
        };

        let extraction = match extract_text(&page.body, &self.config.extract) {
            Ok(extraction) => extraction,
            Err(e) => {
                tracing::debug!(%url, error = %e, "no extractable content");
                return Ok((UrlStatus::ParseError, None));
            }
        };

        // A failed write means the output directory went away mid-batch;
        // that is a configuration problem, so it propagates.
        let path = output::write_raw_text(&self.config.output_dir, subject, index, url.as_str(), &extraction.text)?;

        Ok((UrlStatus::Success, Some(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(output_dir: PathBuf) -> PipelineConfig {
        PipelineConfig {
            request_delay: Duration::from_millis(10),
            output_dir,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_invalid_urls_recorded_without_network() {
        let tmp = tempfile::tempdir().unwrap();
        let mut pipeline = Pipeline::new(test_config(tmp.path().to_path_buf())).unwrap();

        let request = SeedRequest::new("Test Person", vec!["not-a-url".to_string(), "".to_string()]);
        let outcomes = pipeline.run(&request).await.unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.status == UrlStatus::InvalidUrl));
        assert!(outcomes.iter().all(|o| o.output_path.is_none()));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_run_creates_output_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("Raw_Data");
        let mut pipeline = Pipeline::new(test_config(out.clone())).unwrap();

        let request = SeedRequest::new("Test Person", vec![]);
        let outcomes = pipeline.run(&request).await.unwrap();

        assert!(outcomes.is_empty());
        assert!(out.is_dir());
    }
}
