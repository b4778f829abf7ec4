//! Pipeline coordinator: collect, harvest, order, persist.

use ofertas_core::{OfferRecord, OfferSink};

use crate::collector::LinkCollector;
use crate::harvester::DetailHarvester;
use crate::traits::{DetailParser, ListPageParser, PageFetcher};

/// Counts reported by one pipeline run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub urls_discovered: usize,
    pub records_harvested: usize,
    pub sinks_failed: usize,
}

/// Sequences the frontier collector and the detail harvester, imposes the
/// final record order, and hands the result to each configured sink.
///
/// An empty outcome at either stage ends the run early without touching the
/// sinks. That is reported, not raised: the engine has no fatal error path.
pub struct ScrapeCoordinator<F, LP, DP> {
    collector: LinkCollector<F, LP>,
    harvester: DetailHarvester<F, DP>,
}

impl<F, LP, DP> ScrapeCoordinator<F, LP, DP>
where
    F: PageFetcher,
    LP: ListPageParser,
    DP: DetailParser,
{
    pub fn new(collector: LinkCollector<F, LP>, harvester: DetailHarvester<F, DP>) -> Self {
        Self {
            collector,
            harvester,
        }
    }

    pub async fn run(
        &self,
        seed_url: &str,
        max_items: usize,
        sinks: &[Box<dyn OfferSink>],
    ) -> RunSummary {
        tracing::info!(seed_url, max_items, "starting scrape");

        let detail_urls = self.collector.collect(seed_url, max_items).await;
        if detail_urls.is_empty() {
            tracing::error!("no detail URLs collected");
            return RunSummary::default();
        }

        let mut records = self.harvester.harvest(&detail_urls).await;
        if records.is_empty() {
            tracing::error!("no offers harvested");
            return RunSummary {
                urls_discovered: detail_urls.len(),
                ..RunSummary::default()
            };
        }

        sort_records(&mut records);

        let mut sinks_failed = 0;
        for sink in sinks {
            match sink.save(&records) {
                Ok(()) => {
                    tracing::info!(
                        destination = %sink.destination(),
                        count = records.len(),
                        "offers saved"
                    );
                }
                Err(err) => {
                    sinks_failed += 1;
                    tracing::error!(
                        destination = %sink.destination(),
                        error = %err,
                        "failed to persist offers"
                    );
                }
            }
        }

        RunSummary {
            urls_discovered: detail_urls.len(),
            records_harvested: records.len(),
            sinks_failed,
        }
    }
}

/// Numeric ids ascending; records without a parseable id keep their
/// relative arrival order after all numeric ones (the sort is stable).
fn sort_records(records: &mut [OfferRecord]) {
    records.sort_by_key(|record| {
        let id = record.numeric_id();
        (id.is_none(), id.unwrap_or_default())
    });
}

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod tests;
