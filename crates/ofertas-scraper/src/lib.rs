pub mod client;
pub mod collector;
pub mod coordinator;
pub mod detail;
pub mod error;
pub mod harvester;
pub mod list_page;
pub mod rate_limit;
pub mod rules;
pub mod text;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use client::PageClient;
pub use collector::LinkCollector;
pub use coordinator::{RunSummary, ScrapeCoordinator};
pub use detail::OfferDetailParser;
pub use error::FetchError;
pub use harvester::DetailHarvester;
pub use list_page::OfferListParser;
pub use rules::ExtractionRules;
pub use traits::{DetailParser, ListPageParser, PageFetcher};
