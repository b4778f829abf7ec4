//! Site-specific extraction rules.
//!
//! Everything that ties the engine to one target site lives here: the base
//! URL, the detail-path shape, and the text patterns the field heuristics
//! match against. The parsers take a rule set at construction and never
//! hardcode a pattern themselves.

use regex::Regex;
use url::Url;

pub struct ExtractionRules {
    /// Site root: resolves relative links and classifies external hosts.
    pub base_url: Url,
    /// Shape of a relative detail-page href, e.g. `/home/details/123`.
    pub detail_href: Regex,
    /// Digit run extracted from a detail URL to form the record id.
    pub detail_id: Regex,
    /// Brazilian phone shape with DDD, prefix, and suffix capture groups.
    pub phone: Regex,
    /// CEP postal code, e.g. `01310-100`.
    pub postal_code: Regex,
    /// Abbreviated street designators (Rua, Av., Largo, ...).
    pub street_indicator: Regex,
    /// A text block opening with the word "oferta".
    pub offer_prefix: Regex,
    /// Broader two-for-one promo wording.
    pub offer_keywords: Regex,
    /// Lowercased substrings that mark an anchor as a pagination control.
    pub pagination_texts: Vec<String>,
}

impl ExtractionRules {
    /// The default rule set, tuned to doisporum.net.
    #[must_use]
    pub fn for_base(base_url: Url) -> Self {
        Self {
            base_url,
            detail_href: Regex::new(r"^/home/details/\d+/?$").expect("valid regex"),
            detail_id: Regex::new(r"/details/(\d+)").expect("valid regex"),
            phone: Regex::new(r"\(?(\d{2})\)?\s?(\d{4,5})-(\d{4})").expect("valid regex"),
            postal_code: Regex::new(r"\b\d{5}-\d{3}\b").expect("valid regex"),
            street_indicator: Regex::new(r"(?i)Rua|Av\.?|R\.|Al\.?|Largo|Praça|Praca|Rod\.")
                .expect("valid regex"),
            offer_prefix: Regex::new(r"(?i)^oferta\b").expect("valid regex"),
            offer_keywords: Regex::new(r"(?i)2\s*por\s*1|dois\s*por\s*um|2x1")
                .expect("valid regex"),
            pagination_texts: ["próximo", "proximo", "seguinte", "next", "mais"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Host component of the base URL, used to classify external links.
    #[must_use]
    pub fn base_host(&self) -> &str {
        self.base_url.host_str().unwrap_or_default()
    }

    /// Resolves `href` against the base URL. Absolute inputs pass through
    /// unchanged; unjoinable inputs yield `None`.
    #[must_use]
    pub fn resolve(&self, href: &str) -> Option<String> {
        self.base_url.join(href).ok().map(Url::into)
    }
}
