//! Persistence collaborators for offer records.
//!
//! Two sinks, both implementing [`ofertas_core::OfferSink`]: a flat CSV
//! export and a line-delimited JSON export. Both no-op with a warning when
//! handed zero records.

pub mod csv_sink;
pub mod jsonl_sink;

pub use csv_sink::CsvSink;
pub use jsonl_sink::JsonlSink;
