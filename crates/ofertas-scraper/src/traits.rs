//! Capability seams between the pipeline stages.
//!
//! The collector, harvester, and coordinator depend only on these traits,
//! so tests substitute canned fixtures for the network and the parsers.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use ofertas_core::OfferRecord;

/// Rate-limited, retried page fetching.
///
/// Implemented by [`crate::PageClient`]. Every failure mode (transport
/// error, non-2xx status, exhausted retries) degrades to `None`; callers
/// treat "could not fetch" uniformly and never see an error type.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the body of `url`, or `None` when every attempt failed.
    async fn fetch_text(&self, url: &str) -> Option<String>;
}

/// Sharing a fetcher between the collector and the harvester keeps the rate
/// gate global across both phases.
#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch_text(&self, url: &str) -> Option<String> {
        (**self).fetch_text(url).await
    }
}

/// Candidate-link extraction from a list page.
///
/// Both methods return unordered, deduplicated sets of absolute URLs;
/// callers must not rely on any enumeration order.
pub trait ListPageParser: Send + Sync {
    /// Links whose path matches the detail-page shape.
    fn detail_links(&self, html: &str) -> HashSet<String>;

    /// Links to further list pages: explicit `rel="next"` targets plus
    /// anchors whose visible text looks like a "next/more" control.
    fn pagination_links(&self, html: &str) -> HashSet<String>;
}

/// Extraction of one offer record from a detail page.
pub trait DetailParser: Send + Sync {
    /// Never fails: heuristics that find nothing leave their field empty.
    fn parse(&self, html: &str, url: &str) -> OfferRecord;
}
