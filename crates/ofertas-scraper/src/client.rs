//! HTTP page client: one rate-limited, retried fetch per call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::FetchError;
use crate::rate_limit::RateGate;
use crate::traits::PageFetcher;

/// Total attempts per URL, including the first.
const FETCH_ATTEMPTS: u32 = 3;

/// Fetches page bodies with a global rate gate and linear retry backoff.
///
/// The gate applies once per [`PageFetcher::fetch_text`] call, before the
/// attempt loop; when the client is shared across concurrent callers the
/// gate serializes fetch starts globally. Redirects are followed (reqwest
/// default) and every request carries the configured `User-Agent`.
pub struct PageClient {
    client: Client,
    gate: RateGate,
    /// Base unit of the linear backoff: the wait after attempt `n` (zero
    /// based) is `backoff_base × (n + 1)`.
    backoff_base: Duration,
}

impl PageClient {
    /// Creates a client with the given per-request timeout, minimum
    /// interval between fetch starts, and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout: Duration,
        rate_limit: Duration,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            gate: RateGate::new(rate_limit),
            backoff_base: Duration::from_secs(1),
        })
    }

    /// Overrides the base unit of the retry backoff. Tests pass zero to
    /// avoid real sleeps.
    #[must_use]
    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    async fn attempt(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl PageFetcher for PageClient {
    /// Fetches the body of `url`, retrying any transport or status failure.
    ///
    /// Waits at the rate gate, then tries up to [`FETCH_ATTEMPTS`] times
    /// with a linear backoff between attempts (no wait after the last).
    /// Exhaustion degrades to `None`, indistinguishable to the caller from
    /// any other "could not fetch" outcome.
    async fn fetch_text(&self, url: &str) -> Option<String> {
        self.gate.acquire().await;

        for attempt in 0..FETCH_ATTEMPTS {
            match self.attempt(url).await {
                Ok(body) => return Some(body),
                Err(err) => {
                    tracing::warn!(
                        url,
                        attempt = attempt + 1,
                        error = %err,
                        "fetch attempt failed"
                    );
                    if attempt + 1 < FETCH_ATTEMPTS {
                        tokio::time::sleep(self.backoff_base * (attempt + 1)).await;
                    }
                }
            }
        }

        tracing::error!(url, attempts = FETCH_ATTEMPTS, "giving up on URL");
        None
    }
}
