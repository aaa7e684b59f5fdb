//! Tar archive unpacking.
//!
//! Walks every entry of one opened archive, keeps regular `.csv` files
//! whose name is in the report registry, and publishes one normalized
//! artifact per kept entry.

use std::io::{Cursor, Read};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::publish::{normalize_prefix, Publisher, RandomSuffix, SuffixSource};
use crate::report::{serialize_rows, ReportNormalizer, ReportType};

/// Tunables for artifact generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnpackOptions {
    /// Emit a header row built from the report's `Object ID` line.
    pub include_header: bool,
}

/// Outcome for one published entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySummary {
    /// Entry name inside the archive
    pub entry: String,
    pub report_type: ReportType,
    /// Destination key the artifact was written to
    pub key: String,
    /// Data rows flattened
    pub data_rows: usize,
    /// Normalized rows written
    pub rows: usize,
    /// Records dropped as malformed
    pub skipped: usize,
}

/// Drives the normalizer over archive entries and publishes the results.
pub struct ArchiveUnpacker<S: SuffixSource = RandomSuffix> {
    publisher: Publisher<S>,
    options: UnpackOptions,
}

impl<S: SuffixSource> ArchiveUnpacker<S> {
    pub fn new(publisher: Publisher<S>) -> Self {
        Self {
            publisher,
            options: UnpackOptions::default(),
        }
    }

    pub fn with_options(mut self, options: UnpackOptions) -> Self {
        self.options = options;
        self
    }

    /// Open `bytes` as a tar archive and unpack it.
    pub fn unpack_bytes(&mut self, bytes: &[u8], prefix: &str) -> Result<Vec<EntrySummary>> {
        let mut archive = tar::Archive::new(Cursor::new(bytes));
        self.unpack(&mut archive, prefix)
    }

    /// Process every entry of `archive`, publishing below `prefix`.
    ///
    /// Unrecognized entries are skipped silently. The first archive,
    /// CSV or store error aborts the run.
    pub fn unpack<R: Read>(
        &mut self,
        archive: &mut tar::Archive<R>,
        prefix: &str,
    ) -> Result<Vec<EntrySummary>> {
        let prefix = normalize_prefix(prefix);
        let mut summaries = Vec::new();

        for entry in archive.entries()? {
            let entry = entry?;
            if !entry.header().entry_type().is_file() {
                continue;
            }

            let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            if !has_csv_extension(&name) {
                continue;
            }

            let Some(report_type) = ReportType::from_entry_name(&name) else {
                debug!(entry = %name, "Ignoring unrecognized report");
                continue;
            };

            summaries.push(self.process_entry(report_type, name, entry, &prefix)?);
        }

        Ok(summaries)
    }

    fn process_entry<R: Read>(
        &mut self,
        report_type: ReportType,
        name: String,
        reader: R,
        prefix: &str,
    ) -> Result<EntrySummary> {
        let mut normalizer = ReportNormalizer::new(report_type, name.as_str(), reader);
        let rows = normalizer.by_ref().collect::<Result<Vec<_>>>()?;

        let header = if self.options.include_header {
            normalizer.column_header().cloned()
        } else {
            None
        };
        if self.options.include_header && header.is_none() {
            debug!(entry = %name, "No Object ID line, writing artifact without header");
        }

        let payload = serialize_rows(&rows, header.as_ref())?;
        let key = self.publisher.publish(report_type, prefix, payload)?;

        let summary = EntrySummary {
            entry: name,
            report_type,
            key,
            data_rows: normalizer.data_rows(),
            rows: rows.len(),
            skipped: normalizer.skips().len(),
        };
        info!(
            entry = %summary.entry,
            ne_name = %normalizer.metadata().ne_name,
            rows = summary.rows,
            skipped = summary.skipped,
            "Normalized report"
        );
        Ok(summary)
    }
}

/// Whether the text after the last `.` is `csv`, ignoring case.
fn has_csv_extension(name: &str) -> bool {
    name.rsplit('.')
        .next()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::BlockingStore;

    fn tar_with(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (name, body) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(body.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, name, body.as_bytes()).unwrap();
        }
        builder.into_inner().unwrap()
    }

    fn unpacker(store: &BlockingStore) -> ArchiveUnpacker {
        ArchiveUnpacker::new(Publisher::new(store.clone()))
    }

    #[test]
    fn test_has_csv_extension() {
        assert!(has_csv_extension("iSAM_ponOltUtilHistoryData.csv"));
        assert!(has_csv_extension("REPORT.CSV"));
        assert!(has_csv_extension("csv"));
        assert!(!has_csv_extension("report.csv.bak"));
        assert!(!has_csv_extension("report.txt"));
    }

    #[test]
    fn test_recognized_entry_is_published() {
        let store = BlockingStore::in_memory();
        let archive = tar_with(&[(
            "iSAM_ponOltUtilHistoryData.csv",
            "NE Name,NE1\nOID1,\"{1, 2, 3}\",\"{4, 5, 6}\"\n",
        )]);

        let summaries = unpacker(&store).unpack_bytes(&archive, "pm").unwrap();

        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.report_type, ReportType::PonOltUtilHistory);
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.data_rows, 1);
        assert_eq!(summary.skipped, 0);
        assert!(summary.key.starts_with("pm/ponOltUtilHistory_"));
        assert!(store.exists(&summary.key).unwrap());
    }

    #[test]
    fn test_unknown_and_non_csv_entries_ignored() {
        let store = BlockingStore::in_memory();
        let archive = tar_with(&[
            ("unknown.csv", "OID1,\"{1, 2, 3}\",\"{4, 5, 6}\"\n"),
            ("iSAM_ponOltUtilHistoryData.txt", "x\n"),
            ("notes", "x\n"),
        ]);

        let summaries = unpacker(&store).unpack_bytes(&archive, "pm/").unwrap();
        assert!(summaries.is_empty());
    }

    #[test]
    fn test_directory_entries_ignored() {
        let store = BlockingStore::in_memory();
        let mut builder = tar::Builder::new(Vec::new());
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Directory);
        header.set_size(0);
        header.set_mode(0o755);
        header.set_cksum();
        builder
            .append_data(&mut header, "iSAM_ponOltUtilHistoryData.csv", std::io::empty())
            .unwrap();
        let archive = builder.into_inner().unwrap();

        let summaries = unpacker(&store).unpack_bytes(&archive, "pm").unwrap();
        assert!(summaries.is_empty());
    }

    #[test]
    fn test_header_option() {
        let store = BlockingStore::in_memory();
        let archive = tar_with(&[(
            "iSAM_ng2OntOltUtilBulkHistoryData.csv",
            "Object ID,Tx,Rx\nOID1,\"{1, 2, 3}\",\"{4, 5, 6}\"\n",
        )]);

        let summaries = unpacker(&store)
            .with_options(UnpackOptions {
                include_header: true,
            })
            .unpack_bytes(&archive, "pm")
            .unwrap();

        let body = store.fetch(&summaries[0].key).unwrap();
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.starts_with("\"file_type\","));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_skips_are_reported() {
        let store = BlockingStore::in_memory();
        let archive = tar_with(&[(
            "iSAM_ponOltUtilRxOntHistoryData.csv",
            "OID1,\"{1, 2}\",\"{4, 5, 6}\"\nOID2,\"{1, 2, 3}\",\"{4, 5, 6}\"\ntrailer\n",
        )]);

        let summaries = unpacker(&store).unpack_bytes(&archive, "pm").unwrap();
        assert_eq!(summaries[0].rows, 3);
        assert_eq!(summaries[0].skipped, 2);
    }

    #[test]
    fn test_corrupt_archive_is_an_error() {
        let store = BlockingStore::in_memory();
        let garbage = vec![0xAB; 1024];
        assert!(unpacker(&store).unpack_bytes(&garbage, "pm").is_err());
    }
}
