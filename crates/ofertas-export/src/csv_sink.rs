//! Flat CSV export.
//!
//! The `images` sequence is flattened into two columns: a comma-joined
//! string for spreadsheet use and a JSON-array string that survives URLs
//! containing commas.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use ofertas_core::{OfferRecord, OfferSink, SinkError};

const HEADER: [&str; 10] = [
    "id",
    "url",
    "title",
    "offer",
    "description",
    "address",
    "phone",
    "website",
    "images",
    "images_json",
];

pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OfferSink for CsvSink {
    fn destination(&self) -> String {
        self.path.display().to_string()
    }

    fn save(&self, records: &[OfferRecord]) -> Result<(), SinkError> {
        if records.is_empty() {
            tracing::warn!(path = %self.path.display(), "no offers to write; skipping CSV export");
            return Ok(());
        }

        let file = File::create(&self.path).map_err(|source| SinkError::Io {
            path: self.destination(),
            source,
        })?;
        write_records(file, records, &self.destination())?;

        tracing::info!(count = records.len(), path = %self.path.display(), "offers written to CSV");
        Ok(())
    }
}

fn write_records<W: Write>(
    writer: W,
    records: &[OfferRecord],
    destination: &str,
) -> Result<(), SinkError> {
    let csv_error = |source: csv::Error| SinkError::Csv {
        destination: destination.to_owned(),
        reason: source.to_string(),
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER).map_err(csv_error)?;

    for record in records {
        let images_json =
            serde_json::to_string(&record.images).map_err(|source| SinkError::Serialize {
                destination: destination.to_owned(),
                source,
            })?;
        csv_writer
            .write_record([
                record.id.as_deref().unwrap_or(""),
                &record.url,
                &record.title,
                &record.offer,
                &record.description,
                &record.address,
                &record.phone,
                &record.website,
                &record.images.join(","),
                &images_json,
            ])
            .map_err(csv_error)?;
    }

    csv_writer.flush().map_err(|source| SinkError::Io {
        path: destination.to_owned(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> OfferRecord {
        OfferRecord {
            id: Some("42".to_owned()),
            url: "https://doisporum.net/home/details/42".to_owned(),
            title: "Pizzaria Bella".to_owned(),
            offer: "Oferta: 2x1 em pizzas".to_owned(),
            description: "Massas artesanais, forno a lenha".to_owned(),
            address: "Rua das Flores, 123 - CEP 01310-100".to_owned(),
            phone: "(11) 3265-4321".to_owned(),
            website: "https://www.pizzariabella.com.br".to_owned(),
            images: vec![
                "https://doisporum.net/img/a.jpg".to_owned(),
                "https://doisporum.net/img/b.jpg".to_owned(),
            ],
        }
    }

    fn rendered(records: &[OfferRecord]) -> String {
        let mut buffer = Vec::new();
        write_records(&mut buffer, records, "test.csv").expect("write succeeds");
        String::from_utf8(buffer).expect("valid UTF-8")
    }

    #[test]
    fn header_lists_every_column() {
        let output = rendered(&[sample_record()]);
        let header = output.lines().next().expect("header line");
        assert_eq!(
            header,
            "id,url,title,offer,description,address,phone,website,images,images_json"
        );
    }

    #[test]
    fn one_row_per_record() {
        let output = rendered(&[sample_record(), sample_record()]);
        assert_eq!(output.lines().count(), 3);
    }

    #[test]
    fn images_flatten_into_joined_and_json_columns() {
        let output = rendered(&[sample_record()]);
        assert!(output.contains("https://doisporum.net/img/a.jpg,https://doisporum.net/img/b.jpg"));
        assert!(output.contains(
            r#"[""https://doisporum.net/img/a.jpg"",""https://doisporum.net/img/b.jpg""]"#
        ));
    }

    #[test]
    fn missing_id_renders_as_empty_cell() {
        let mut record = sample_record();
        record.id = None;
        let output = rendered(&[record]);
        let row = output.lines().nth(1).expect("data row");
        assert!(row.starts_with(",https://doisporum.net/home/details/42"));
    }

    #[test]
    fn fields_with_separators_are_quoted() {
        let mut record = sample_record();
        record.description = "molhos, massas e sobremesas".to_owned();
        let output = rendered(&[record]);
        assert!(output.contains(r#""molhos, massas e sobremesas""#));
    }

    #[test]
    fn empty_input_is_a_warned_no_op() {
        let path = std::env::temp_dir().join("ofertas-csv-sink-empty-test.csv");
        let sink = CsvSink::new(&path);
        sink.save(&[]).expect("empty save is Ok");
        assert!(!path.exists());
    }
}
