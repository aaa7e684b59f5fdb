//! Bundle dispatch.
//!
//! The source key's extension decides how a bundle is handled:
//!
//! | Extension | Handling                                   |
//! |-----------|--------------------------------------------|
//! | `tar`     | fetched whole and unpacked directly        |
//! | `gz`      | nested bundle, see [`NestedArchiveHandler`] |
//! | other     | rejected before anything is fetched        |

use std::io::Cursor;

use serde::Serialize;
use tracing::info;

use super::nested::NestedArchiveHandler;
use super::unpack::{ArchiveUnpacker, EntrySummary};
use crate::error::{Error, Result};
use crate::io::BlockingStore;
use crate::publish::{RandomSuffix, SuffixSource};

/// How a source bundle is packaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleFormat {
    /// A single tar archive of CSV reports
    Tar,
    /// A compressed bundle of tar archives
    Nested,
}

impl BundleFormat {
    /// Pick the format for an extension, ignoring case.
    pub fn from_extension(extension: &str) -> Result<Self> {
        if extension.eq_ignore_ascii_case("tar") {
            Ok(BundleFormat::Tar)
        } else if extension.eq_ignore_ascii_case("gz") {
            Ok(BundleFormat::Nested)
        } else {
            Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            })
        }
    }
}

/// Text after the last `.` of `key`, or the whole key if it has none.
pub fn key_extension(key: &str) -> &str {
    key.rsplit('.').next().unwrap_or(key)
}

/// Result of processing one bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleReport {
    /// Source key
    pub source: String,
    /// Extension as it appeared in the key
    pub extension: String,
    pub format: BundleFormat,
    pub entries: Vec<EntrySummary>,
}

impl BundleReport {
    /// Normalized rows written across all entries.
    pub fn total_rows(&self) -> usize {
        self.entries.iter().map(|e| e.rows).sum()
    }

    /// Records skipped across all entries.
    pub fn total_skipped(&self) -> usize {
        self.entries.iter().map(|e| e.skipped).sum()
    }
}

/// Entry point of the pipeline: one source bundle in, artifacts out.
pub struct Unbundler<S: SuffixSource = RandomSuffix> {
    source: BlockingStore,
    unpacker: ArchiveUnpacker<S>,
    nested: NestedArchiveHandler,
}

impl<S: SuffixSource> Unbundler<S> {
    /// `source` is the store bundles are read from; the unpacker carries
    /// the destination.
    pub fn new(source: BlockingStore, unpacker: ArchiveUnpacker<S>) -> Self {
        Self {
            source,
            unpacker,
            nested: NestedArchiveHandler,
        }
    }

    /// Process the bundle at `key`, publishing artifacts below `prefix`.
    pub fn unbundle(&mut self, key: &str, prefix: &str) -> Result<BundleReport> {
        let extension = key_extension(key);
        let format = BundleFormat::from_extension(extension)?;

        let entries = match format {
            BundleFormat::Tar => {
                let bytes = self.source.fetch(key)?;
                info!(
                    store = self.source.name(),
                    key = %key,
                    bytes = bytes.len(),
                    "Fetched bundle"
                );
                let mut archive = tar::Archive::new(Cursor::new(bytes));
                self.unpacker.unpack(&mut archive, prefix)?
            }
            BundleFormat::Nested => {
                self.nested
                    .extract(&self.source, key, &mut self.unpacker, prefix)?
            }
        };

        Ok(BundleReport {
            source: key.to_string(),
            extension: extension.to_string(),
            format,
            entries,
        })
    }
}
