//! Detail-page parsing: ordered field heuristics over text blocks.
//!
//! Each field has its own priority/fallback policy; a rule that finds
//! nothing yields an empty value and never fails the record. The policies
//! encode two opposite assumptions: offer text is a short promotional tag
//! that longer matches contaminate (shortest wins), while descriptive prose
//! is more complete the longer it is once offer noise is excluded (longest
//! wins).

use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use scraper::{Html, Selector};

use ofertas_core::OfferRecord;

use crate::rules::ExtractionRules;
use crate::text::{element_text, text_blocks};
use crate::traits::DetailParser;

/// Blocks longer than this qualify as description candidates in tier 1.
const DESCRIPTION_MIN_CHARS: usize = 120;

/// Address blocks at or above this length are mixed content, not addresses.
const ADDRESS_MAX_CHARS: usize = 150;

/// How many distinct addresses to join when a page lists several locations.
const MAX_CEP_ADDRESSES: usize = 5;
const MAX_STREET_ADDRESSES: usize = 3;

static H1_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("valid selector"));
static H2_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2").expect("valid selector"));
static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid selector"));
static ANY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("*").expect("valid selector"));
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));
static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("valid selector"));

/// Leading all-caps label on an address block, e.g. `"MATRIZ: Rua ..."`.
static LABEL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z\s]+:").expect("valid regex"));

/// Turns one detail page into one [`OfferRecord`].
pub struct OfferDetailParser {
    rules: Arc<ExtractionRules>,
}

impl OfferDetailParser {
    #[must_use]
    pub fn new(rules: Arc<ExtractionRules>) -> Self {
        Self { rules }
    }

    fn extract_id(&self, url: &str) -> Option<String> {
        self.rules
            .detail_id
            .captures(url)
            .map(|caps| caps[1].to_owned())
    }

    /// First non-empty text walking the priority list: `h1`, `h2`, elements
    /// whose `data-testid` contains "title", elements whose `class`
    /// attribute contains "title", then the page `<title>`.
    fn extract_title(&self, document: &Html) -> String {
        for selector in [&*H1_SELECTOR, &*H2_SELECTOR] {
            for element in document.select(selector) {
                let text = element_text(element);
                if !text.is_empty() {
                    return text;
                }
            }
        }

        for attr in ["data-testid", "class"] {
            if let Some(text) = first_titled_element(document, attr) {
                return text;
            }
        }

        document
            .select(&TITLE_SELECTOR)
            .map(element_text)
            .find(|text| !text.is_empty())
            .unwrap_or_default()
    }

    /// Blocks opening with "oferta" win, shortest first; promo-keyword
    /// blocks are the fallback tier, again shortest.
    fn extract_offer(&self, blocks: &[String]) -> String {
        let prefixed = blocks.iter().filter(|b| self.rules.offer_prefix.is_match(b));
        if let Some(best) = shortest(prefixed) {
            return best.clone();
        }

        let keyword = blocks.iter().filter(|b| self.rules.offer_keywords.is_match(b));
        shortest(keyword).cloned().unwrap_or_default()
    }

    /// Longest block over the length threshold that carries no offer
    /// wording; falls back to the longest non-offer block of any length.
    fn extract_description(&self, blocks: &[String]) -> String {
        let non_offer = |b: &&String| {
            !self.rules.offer_prefix.is_match(b) && !self.rules.offer_keywords.is_match(b)
        };

        let long = blocks
            .iter()
            .filter(non_offer)
            .filter(|b| b.chars().count() > DESCRIPTION_MIN_CHARS);
        if let Some(best) = longest(long) {
            return best.clone();
        }

        longest(blocks.iter().filter(non_offer))
            .cloned()
            .unwrap_or_default()
    }

    /// Tier 1: postal-code blocks under the length cap, multiple locations
    /// joined. Tier 2: street-indicator blocks under the same cap.
    fn extract_address(&self, blocks: &[String]) -> String {
        let cep_blocks: Vec<&String> = blocks
            .iter()
            .filter(|b| {
                self.rules.postal_code.is_match(b) && b.chars().count() < ADDRESS_MAX_CHARS
            })
            .collect();

        if cep_blocks.len() == 1 {
            return cep_blocks[0].clone();
        }
        if cep_blocks.len() > 1 {
            // Dedup on the core address with any leading "LABEL:" stripped,
            // so "MATRIZ: Rua X" and "FILIAL: Rua X" count once.
            let mut unique: Vec<&String> = Vec::new();
            let mut seen: HashSet<String> = HashSet::new();
            for block in cep_blocks {
                let core = LABEL_PREFIX.replace(block, "").into_owned();
                if seen.insert(core) {
                    unique.push(block);
                }
            }
            unique.sort_by_key(|b| b.chars().count());
            return join_blocks(&unique, MAX_CEP_ADDRESSES);
        }

        let mut street_blocks: Vec<&String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for block in blocks {
            if self.rules.street_indicator.is_match(block)
                && block.chars().count() < ADDRESS_MAX_CHARS
                && seen.insert(block.as_str())
            {
                street_blocks.push(block);
            }
        }
        if street_blocks.is_empty() {
            return String::new();
        }
        street_blocks.sort_by_key(|b| b.chars().count());
        join_blocks(&street_blocks, MAX_STREET_ADDRESSES)
    }

    /// Tier 1 scans only address-bearing blocks; tier 2 falls back to the
    /// raw page text. Matches are formatted `(DD) NNNNN-NNNN`, deduplicated,
    /// and joined in lexicographic order.
    fn extract_phone(&self, blocks: &[String], html: &str) -> String {
        let mut phones = BTreeSet::new();

        let address_bearing = blocks.iter().filter(|b| {
            self.rules.postal_code.is_match(b) || self.rules.street_indicator.is_match(b)
        });
        for block in address_bearing {
            self.collect_phones(block, &mut phones);
        }

        if phones.is_empty() {
            self.collect_phones(html, &mut phones);
        }

        phones.into_iter().collect::<Vec<_>>().join(" | ")
    }

    fn collect_phones(&self, text: &str, out: &mut BTreeSet<String>) {
        for caps in self.rules.phone.captures_iter(text) {
            out.insert(format!("({}) {}-{}", &caps[1], &caps[2], &caps[3]));
        }
    }

    /// First anchor in document order whose target is an absolute URL on a
    /// foreign host.
    fn extract_website(&self, document: &Html) -> String {
        let host = self.rules.base_host();
        document
            .select(&ANCHOR_SELECTOR)
            .filter_map(|anchor| anchor.value().attr("href"))
            .find(|href| {
                (href.starts_with("http://") || href.starts_with("https://"))
                    && !href.contains(host)
            })
            .map(str::to_owned)
            .unwrap_or_default()
    }

    /// Per image: last `srcset` candidate (highest resolution by
    /// convention) when the attribute is present, plain `src` otherwise.
    /// Resolved against the base URL; first occurrence wins on duplicates.
    fn extract_images(&self, document: &Html) -> Vec<String> {
        let mut images = Vec::new();
        let mut seen = HashSet::new();

        for img in document.select(&IMG_SELECTOR) {
            let candidate = match img.value().attr("srcset") {
                Some(srcset) => last_srcset_candidate(srcset),
                None => img.value().attr("src").map(str::to_owned),
            };
            let Some(raw) = candidate else { continue };
            let Some(absolute) = self.rules.resolve(&raw) else {
                continue;
            };
            if seen.insert(absolute.clone()) {
                images.push(absolute);
            }
        }

        images
    }
}

impl DetailParser for OfferDetailParser {
    fn parse(&self, html: &str, url: &str) -> OfferRecord {
        let document = Html::parse_document(html);
        let blocks = text_blocks(&document);

        OfferRecord {
            id: self.extract_id(url),
            url: url.to_owned(),
            title: self.extract_title(&document),
            offer: self.extract_offer(&blocks),
            description: self.extract_description(&blocks),
            address: self.extract_address(&blocks),
            phone: self.extract_phone(&blocks, html),
            website: self.extract_website(&document),
            images: self.extract_images(&document),
        }
    }
}

/// First element in document order whose `attr` value contains "title"
/// case-insensitively and whose text is non-empty.
fn first_titled_element(document: &Html, attr: &str) -> Option<String> {
    document.select(&ANY_SELECTOR).find_map(|element| {
        let value = element.value().attr(attr)?;
        if !value.to_lowercase().contains("title") {
            return None;
        }
        let text = element_text(element);
        (!text.is_empty()).then_some(text)
    })
}

/// Last (by convention highest-resolution) URL in a `srcset` attribute.
fn last_srcset_candidate(srcset: &str) -> Option<String> {
    srcset
        .split(',')
        .filter_map(|entry| entry.split_whitespace().next())
        .last()
        .map(str::to_owned)
}

/// Shortest by character count; first wins ties.
fn shortest<'a>(blocks: impl Iterator<Item = &'a String>) -> Option<&'a String> {
    let mut best: Option<(&'a String, usize)> = None;
    for block in blocks {
        let len = block.chars().count();
        if best.is_none_or(|(_, best_len)| len < best_len) {
            best = Some((block, len));
        }
    }
    best.map(|(block, _)| block)
}

/// Longest by character count; first wins ties.
fn longest<'a>(blocks: impl Iterator<Item = &'a String>) -> Option<&'a String> {
    let mut best: Option<(&'a String, usize)> = None;
    for block in blocks {
        let len = block.chars().count();
        if best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((block, len));
        }
    }
    best.map(|(block, _)| block)
}

fn join_blocks(blocks: &[&String], limit: usize) -> String {
    blocks
        .iter()
        .take(limit)
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
#[path = "detail_test.rs"]
mod tests;
