//! Persistence seam between the pipeline and the export formats.

use thiserror::Error;

use crate::offer::OfferRecord;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error for {destination}: {source}")]
    Serialize {
        destination: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV error for {destination}: {reason}")]
    Csv { destination: String, reason: String },
}

/// An output destination for the final, ordered record sequence.
///
/// The coordinator hands every configured sink the same slice; a sink that
/// receives zero records must no-op with a warning rather than fail.
pub trait OfferSink: Send + Sync {
    /// Human-readable destination identifier, used in logs.
    fn destination(&self) -> String;

    /// Persists the records.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] when the destination cannot be written.
    fn save(&self, records: &[OfferRecord]) -> Result<(), SinkError>;
}
