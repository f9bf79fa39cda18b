//! Seed URL validation.
//!
//! Purely syntactic checks: a valid seed URL is an absolute http/https URL
//! with a host. Reachability is the fetcher's problem, not ours.

use url::Url;

use crate::{ColligoError, Result};

/// Parses a candidate seed URL, rejecting anything that is not an absolute
/// http/https URL with a host.
pub fn parse_seed_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ColligoError::InvalidUrl("empty URL".to_string()));
    }

    let url = Url::parse(trimmed).map_err(|e| ColligoError::InvalidUrl(format!("{}: {}", trimmed, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ColligoError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                trimmed, other
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(ColligoError::InvalidUrl(format!("{}: missing host", trimmed)));
    }

    Ok(url)
}

/// Boolean wrapper around [`parse_seed_url`]. Never panics on malformed input.
pub fn is_valid_url(input: &str) -> bool {
    parse_seed_url(input).is_ok()
}

/// Canonical per-host identity used by the robots cache and the rate limiter.
///
/// Includes the port when one is explicit in the URL, so two servers on the
/// same machine are tracked independently.
pub fn host_key(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}
