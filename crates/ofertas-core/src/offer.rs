//! The offer record, the unit of scraper output.

use serde::{Deserialize, Serialize};

/// One offer extracted from a detail page.
///
/// Built in a single construction step by the detail parser; fields are not
/// re-derived afterwards. Every text field defaults to the empty string when
/// the corresponding heuristic finds nothing; absence of data is not an
/// error.
///
/// `images` holds absolute URLs with no duplicates. The order is the
/// insertion order of the dedup pass, not necessarily document order;
/// consumers that care about equality should compare it as a set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferRecord {
    /// Decimal-digit identifier derived from the detail URL path. Absent
    /// when the URL does not match the expected numeric-id shape.
    #[serde(default)]
    pub id: Option<String>,

    /// Canonical absolute URL of the detail page.
    pub url: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub offer: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub website: String,

    #[serde(default)]
    pub images: Vec<String>,
}

impl OfferRecord {
    /// The id parsed as a number, when present and parseable.
    ///
    /// Used by the final ordering pass: records with a numeric id sort
    /// ascending, the rest sort after them.
    #[must_use]
    pub fn numeric_id(&self) -> Option<u64> {
        self.id.as_deref().and_then(|id| id.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_id(id: Option<&str>) -> OfferRecord {
        OfferRecord {
            id: id.map(str::to_owned),
            url: "https://doisporum.net/home/details/42".to_owned(),
            ..OfferRecord::default()
        }
    }

    #[test]
    fn numeric_id_parses_digits() {
        assert_eq!(record_with_id(Some("42")).numeric_id(), Some(42));
    }

    #[test]
    fn numeric_id_absent_when_no_id() {
        assert_eq!(record_with_id(None).numeric_id(), None);
    }

    #[test]
    fn numeric_id_absent_when_not_parseable() {
        // 21 digits overflows u64; treated the same as a missing id.
        assert_eq!(
            record_with_id(Some("123456789012345678901")).numeric_id(),
            None
        );
    }

    #[test]
    fn serializes_images_as_array() {
        let mut record = record_with_id(Some("7"));
        record.images = vec!["https://cdn.example.com/a.jpg".to_owned()];
        let json = serde_json::to_string(&record).expect("serializable");
        assert!(json.contains(r#""images":["https://cdn.example.com/a.jpg"]"#));
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let record: OfferRecord =
            serde_json::from_str(r#"{"url":"https://doisporum.net/home/details/1"}"#)
                .expect("deserializable");
        assert_eq!(record.url, "https://doisporum.net/home/details/1");
        assert_eq!(record.id, None);
        assert!(record.title.is_empty());
        assert!(record.images.is_empty());
    }
}
