//! Line-delimited JSON export: one serialized record per line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use ofertas_core::{OfferRecord, OfferSink, SinkError};

pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OfferSink for JsonlSink {
    fn destination(&self) -> String {
        self.path.display().to_string()
    }

    fn save(&self, records: &[OfferRecord]) -> Result<(), SinkError> {
        if records.is_empty() {
            tracing::warn!(path = %self.path.display(), "no offers to write; skipping JSONL export");
            return Ok(());
        }

        let file = File::create(&self.path).map_err(|source| SinkError::Io {
            path: self.destination(),
            source,
        })?;
        write_records(BufWriter::new(file), records, &self.destination())?;

        tracing::info!(count = records.len(), path = %self.path.display(), "offers written to JSONL");
        Ok(())
    }
}

fn write_records<W: Write>(
    mut writer: W,
    records: &[OfferRecord],
    destination: &str,
) -> Result<(), SinkError> {
    for record in records {
        serde_json::to_writer(&mut writer, record).map_err(|source| SinkError::Serialize {
            destination: destination.to_owned(),
            source,
        })?;
        writer.write_all(b"\n").map_err(|source| SinkError::Io {
            path: destination.to_owned(),
            source,
        })?;
    }
    writer.flush().map_err(|source| SinkError::Io {
        path: destination.to_owned(),
        source,
    })
}
