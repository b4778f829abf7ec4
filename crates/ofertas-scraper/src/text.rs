//! Text-block extraction: the intermediate the field heuristics operate on.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

/// Fragments at or below this many characters are noise, not blocks.
const MIN_BLOCK_CHARS: usize = 10;

static CONTENT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p, li, div").expect("valid selector"));

static EXTRA_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span, h3, h4, h5, h6").expect("valid selector"));

/// Collapses runs of whitespace into single spaces and trims the ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Inner text of an element (all descendants) with whitespace collapsed.
#[must_use]
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

/// Extracts the normalized, deduplicated text blocks of a page.
///
/// Scans content-bearing containers (`p`, `li`, `div`) first and heading /
/// span elements second, keeps fragments longer than [`MIN_BLOCK_CHARS`]
/// characters, and drops duplicates while preserving first-seen order.
/// Nested containers each contribute their full descendant text, so an
/// outer `div` may yield a block that contains an inner one; the dedup is
/// exact-match only.
#[must_use]
pub fn text_blocks(document: &Html) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut seen = HashSet::new();

    for selector in [&*CONTENT_SELECTOR, &*EXTRA_SELECTOR] {
        for element in document.select(selector) {
            let text = element_text(element);
            if text.chars().count() > MIN_BLOCK_CHARS && seen.insert(text.clone()) {
                blocks.push(text);
            }
        }
    }

    blocks
}
