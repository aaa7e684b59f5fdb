//! Serialization of normalized rows into the published CSV artifact.

use std::io::Write;

use super::{ColumnHeader, NormalizedRow};
use crate::error::{Error, Result};

/// Fixed labels for the metadata columns of the optional header row.
const METADATA_LABELS: [&str; 5] = ["file_type", "time_stamp", "object_type", "ne_name", "ne_type"];

/// Writes normalized rows as CSV.
///
/// Every field is double-quoted and records end in `\n`. No header row is
/// written unless [`write_header`](Self::write_header) is called.
pub struct ReportWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Self {
        let inner = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        Self { inner }
    }

    /// Write a header row from the report's `Object ID` labels.
    pub fn write_header(&mut self, header: &ColumnHeader) -> Result<()> {
        let labels = METADATA_LABELS.iter().copied().chain([
            header.object_id.as_str(),
            header.first.as_str(),
            header.second.as_str(),
        ]);
        self.inner.write_record(labels)?;
        Ok(())
    }

    pub fn write_row(&mut self, row: &NormalizedRow) -> Result<()> {
        self.inner.write_record(row.fields())?;
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

/// Serialize `rows` into an in-memory CSV artifact.
pub fn serialize_rows(rows: &[NormalizedRow], header: Option<&ColumnHeader>) -> Result<Vec<u8>> {
    let mut writer = ReportWriter::new(Vec::new());
    if let Some(header) = header {
        writer.write_header(header)?;
    }
    for row in rows {
        writer.write_row(row)?;
    }
    writer.finish()
}
