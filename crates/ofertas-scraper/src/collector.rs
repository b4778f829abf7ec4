//! Frontier collector: breadth-first traversal of list pages.

use std::collections::{HashSet, VecDeque};

use crate::traits::{ListPageParser, PageFetcher};

/// Walks list pages breadth-first, accumulating detail URLs up to a cap.
///
/// The frontier state (visited pages, FIFO queue, discovered links) lives
/// for one `collect` call and is never shared; the collector itself is
/// sequential, so no locking is needed here.
pub struct LinkCollector<F, P> {
    fetcher: F,
    list_parser: P,
}

impl<F: PageFetcher, P: ListPageParser> LinkCollector<F, P> {
    pub fn new(fetcher: F, list_parser: P) -> Self {
        Self {
            fetcher,
            list_parser,
        }
    }

    /// Collects up to `max_items` detail URLs starting from `seed_url`.
    ///
    /// Pages that fail to fetch are skipped and traversal continues; a seed
    /// that fails simply yields an empty result. Each page is visited at
    /// most once, and pagination is only followed while the cap has not
    /// been reached. Returned URLs are unique, in discovery order.
    pub async fn collect(&self, seed_url: &str, max_items: usize) -> Vec<String> {
        let mut discovered: Vec<String> = Vec::new();
        let mut discovered_set: HashSet<String> = HashSet::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = VecDeque::from([seed_url.to_owned()]);

        while let Some(page_url) = queue.pop_front() {
            if discovered.len() >= max_items {
                break;
            }
            if !visited.insert(page_url.clone()) {
                continue;
            }

            tracing::info!(page = %page_url, "collecting links");
            let Some(html) = self.fetcher.fetch_text(&page_url).await else {
                continue;
            };

            let detail_links = self.list_parser.detail_links(&html);
            let found = detail_links.len();
            for link in detail_links {
                if discovered.len() >= max_items {
                    break;
                }
                if discovered_set.insert(link.clone()) {
                    discovered.push(link);
                }
            }
            tracing::info!(found, total = discovered.len(), "detail links on page");

            if discovered.len() < max_items {
                for link in self.list_parser.pagination_links(&html) {
                    if !visited.contains(&link) {
                        queue.push_back(link);
                    }
                }
            }
        }

        tracing::info!(total = discovered.len(), "link collection finished");
        discovered
    }
}

#[cfg(test)]
#[path = "collector_test.rs"]
mod tests;
