//! robots.txt policy checks with a per-host cache.
//!
//! The policy file is fetched at most once per host per batch run. An
//! unreachable or non-2xx robots resource degrades to a permissive default:
//! the fetch proceeds, but the fallback is logged at WARN so it can never be
//! mistaken for an explicit allow.

use std::collections::HashMap;

use reqwest::Client;
use robotstxt::DefaultMatcher;
use url::Url;

use crate::validate::host_key;

/// Outcome of a robots policy check for one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotsDecision {
    /// The host's robots.txt explicitly permits this fetch.
    Allowed,
    /// No usable robots.txt for the host; permissive fallback applied.
    AllowedByDefault,
    /// The host's robots.txt disallows this fetch for our user agent.
    Disallowed,
}

impl RobotsDecision {
    /// Whether the target may be fetched.
    pub fn is_allowed(&self) -> bool {
        !matches!(self, RobotsDecision::Disallowed)
    }
}

/// Fetches, caches, and evaluates robots.txt policies per host.
pub struct RobotsChecker {
    client: Client,
    user_agent: String,
    /// Host key -> robots.txt body. `None` records an unreachable policy so
    /// the host is not re-fetched within the batch.
    cache: HashMap<String, Option<String>>,
}

impl RobotsChecker {
    pub fn new(client: Client, user_agent: impl Into<String>) -> Self {
        Self { client, user_agent: user_agent.into(), cache: HashMap::new() }
    }

    /// Decides whether `url` may be fetched under its host's robots policy.
    ///
    /// Network failure on the robots fetch is never propagated; it degrades
    /// to [`RobotsDecision::AllowedByDefault`].
    pub async fn check(&mut self, url: &Url) -> RobotsDecision {
        let host = host_key(url);

        if !self.cache.contains_key(&host) {
            let body = self.fetch_robots(url).await;
            if body.is_none() {
                tracing::warn!(host = %host, "robots.txt unreachable, applying permissive default");
            }
            self.cache.insert(host.clone(), body);
        }

        match self.cache.get(&host).and_then(|body| body.as_deref()) {
            Some(body) => {
                let mut matcher = DefaultMatcher::default();
                if matcher.one_agent_allowed_by_robots(body, &self.user_agent, url.as_str()) {
                    RobotsDecision::Allowed
                } else {
                    tracing::info!(%url, user_agent = %self.user_agent, "robots.txt disallows fetch");
                    RobotsDecision::Disallowed
                }
            }
            None => RobotsDecision::AllowedByDefault,
        }
    }

    /// Derives `scheme://host[:port]/robots.txt` and fetches it once.
    async fn fetch_robots(&self, url: &Url) -> Option<String> {
        let mut robots_url = url.clone();
        robots_url.set_path("/robots.txt");
        robots_url.set_query(None);
        robots_url.set_fragment(None);

        match self.client.get(robots_url.clone()).send().await {
            Ok(response) if response.status().is_success() => response.text().await.ok(),
            Ok(response) => {
                tracing::debug!(%robots_url, status = response.status().as_u16(), "no usable robots.txt");
                None
            }
            Err(e) => {
                tracing::debug!(%robots_url, error = %e, "robots.txt fetch failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matcher_disallows_listed_path() {
        let body = "User-agent: *\nDisallow: /private/\n";
        let mut matcher = DefaultMatcher::default();

        assert!(!matcher.one_agent_allowed_by_robots(body, "Colligo", "https://example.com/private/page"));
        assert!(matcher.one_agent_allowed_by_robots(body, "Colligo", "https://example.com/public"));
    }

    #[test]
    fn test_empty_policy_allows_everything() {
        let mut matcher = DefaultMatcher::default();
        assert!(matcher.one_agent_allowed_by_robots("", "Colligo", "https://example.com/anything"));
    }

    #[test]
    fn test_decision_is_allowed() {
        assert!(RobotsDecision::Allowed.is_allowed());
        assert!(RobotsDecision::AllowedByDefault.is_allowed());
        assert!(!RobotsDecision::Disallowed.is_allowed());
    }
}
