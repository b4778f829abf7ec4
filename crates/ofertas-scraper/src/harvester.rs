//! Detail harvester: bounded-concurrency fetch+parse over detail URLs.

use futures::stream::{self, StreamExt};

use ofertas_core::OfferRecord;

use crate::traits::{DetailParser, PageFetcher};

/// Fetches and parses detail pages with a bounded number in flight.
///
/// The shared fetcher's rate gate still applies underneath, so effective
/// throughput is bounded by both the concurrency limit and the rate
/// interval.
pub struct DetailHarvester<F, P> {
    fetcher: F,
    detail_parser: P,
    max_concurrency: usize,
}

impl<F: PageFetcher, P: DetailParser> DetailHarvester<F, P> {
    pub fn new(fetcher: F, detail_parser: P, max_concurrency: usize) -> Self {
        Self {
            fetcher,
            detail_parser,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Harvests one record per fetchable URL.
    ///
    /// A URL whose fetch fails (after the fetcher's own retries) contributes
    /// nothing; there are no partial records. Results arrive in completion
    /// order, not submission order; the caller imposes any final ordering.
    pub async fn harvest(&self, urls: &[String]) -> Vec<OfferRecord> {
        let results: Vec<Option<OfferRecord>> = stream::iter(urls)
            .map(|url| async move {
                let html = self.fetcher.fetch_text(url).await?;
                Some(self.detail_parser.parse(&html, url))
            })
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await;

        let records: Vec<OfferRecord> = results.into_iter().flatten().collect();
        let failed = urls.len() - records.len();
        if failed > 0 {
            tracing::warn!(
                succeeded = records.len(),
                failed,
                "some detail pages could not be fetched"
            );
        } else {
            tracing::info!(succeeded = records.len(), "harvested all detail pages");
        }
        records
    }
}

#[cfg(test)]
#[path = "harvester_test.rs"]
mod tests;
