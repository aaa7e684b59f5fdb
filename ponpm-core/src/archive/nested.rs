//! Nested bundle handling (`.gz` bundles holding several tar archives).

use tracing::error;

use super::unpack::{ArchiveUnpacker, EntrySummary};
use crate::error::{Error, Result};
use crate::io::BlockingStore;
use crate::publish::SuffixSource;

/// Extracts the inner archives of a compressed bundle and unpacks each.
///
/// The inner layout of these bundles has not been pinned down, so the
/// handler refuses them instead of guessing. It never fetches the object.
#[derive(Debug, Clone, Copy, Default)]
pub struct NestedArchiveHandler;

impl NestedArchiveHandler {
    /// Always fails with [`Error::NotImplemented`].
    pub fn extract<S: SuffixSource>(
        &self,
        source: &BlockingStore,
        key: &str,
        _unpacker: &mut ArchiveUnpacker<S>,
        _prefix: &str,
    ) -> Result<Vec<EntrySummary>> {
        error!(
            store = source.name(),
            key = %key,
            "Nested archive bundles are not supported yet; no data extracted"
        );
        Err(Error::NotImplemented {
            key: key.to_string(),
        })
    }
}
