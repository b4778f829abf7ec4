//! List-page parsing: detail-link discovery and pagination discovery.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use scraper::{Html, Selector};

use crate::rules::ExtractionRules;
use crate::text::element_text;
use crate::traits::ListPageParser;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));

static REL_NEXT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[rel="next"], link[rel="next"]"#).expect("valid selector"));

/// Finds detail and pagination links on a list page.
pub struct OfferListParser {
    rules: Arc<ExtractionRules>,
}

impl OfferListParser {
    #[must_use]
    pub fn new(rules: Arc<ExtractionRules>) -> Self {
        Self { rules }
    }
}

impl ListPageParser for OfferListParser {
    /// Anchors whose href matches the detail-path shape, resolved to
    /// absolute URLs and deduplicated.
    fn detail_links(&self, html: &str) -> HashSet<String> {
        let document = Html::parse_document(html);
        let mut links = HashSet::new();

        for anchor in document.select(&ANCHOR_SELECTOR) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if self.rules.detail_href.is_match(href) {
                if let Some(absolute) = self.rules.resolve(href) {
                    links.insert(absolute);
                }
            }
        }

        links
    }

    /// Union of two strategies: elements explicitly marked `rel="next"`,
    /// and anchors whose visible text contains a pagination keyword.
    fn pagination_links(&self, html: &str) -> HashSet<String> {
        let document = Html::parse_document(html);
        let mut links = HashSet::new();

        for element in document.select(&REL_NEXT_SELECTOR) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = self.rules.resolve(href) {
                    links.insert(absolute);
                }
            }
        }

        for anchor in document.select(&ANCHOR_SELECTOR) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let text = element_text(anchor).to_lowercase();
            if self
                .rules
                .pagination_texts
                .iter()
                .any(|keyword| text.contains(keyword.as_str()))
            {
                if let Some(absolute) = self.rules.resolve(href) {
                    links.insert(absolute);
                }
            }
        }

        links
    }
}

#[cfg(test)]
#[path = "list_page_test.rs"]
mod tests;
