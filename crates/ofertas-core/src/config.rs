//! Run configuration shared by the engine and the CLI.

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Maximum number of offers collected per run.
pub const DEFAULT_MAX_ITEMS: usize = 120;

/// Minimum interval between request starts.
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(800);

/// Concurrent detail fetches.
pub const DEFAULT_MAX_CONCURRENCY: usize = 6;

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Identifies the scraper to the target site unless overridden.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; OfertasScraper/1.0; +contact@example.com)";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be an http(s) URL, got \"{url}\"")]
    UnsupportedScheme { field: &'static str, url: String },

    #[error("max_items must be at least 1")]
    ZeroMaxItems,

    #[error("max_concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

/// Everything a scrape run needs to know, validated once at startup.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// First list page visited by the frontier collector.
    pub seed_url: Url,
    /// Site root: resolves relative links and classifies external hosts.
    pub base_url: Url,
    pub max_items: usize,
    pub rate_limit: Duration,
    pub max_concurrency: usize,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ScrapeConfig {
    /// Configuration with the standard defaults for everything except the
    /// two URLs.
    #[must_use]
    pub fn new(seed_url: Url, base_url: Url) -> Self {
        Self {
            seed_url,
            base_url,
            max_items: DEFAULT_MAX_ITEMS,
            rate_limit: DEFAULT_RATE_LIMIT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Checks the invariants the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first violated constraint:
    /// non-http(s) URLs, a zero item cap, zero concurrency, or a zero
    /// timeout.
    pub fn validated(self) -> Result<Self, ConfigError> {
        for (field, url) in [("seed_url", &self.seed_url), ("base_url", &self.base_url)] {
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::UnsupportedScheme {
                    field,
                    url: url.to_string(),
                });
            }
        }
        if self.max_items == 0 {
            return Err(ConfigError::ZeroMaxItems);
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(self)
    }
}
