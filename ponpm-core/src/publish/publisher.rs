//! Artifact publishing.

use tracing::{error, info};

use super::naming::{KeyGenerator, RandomSuffix, SuffixSource};
use crate::error::Result;
use crate::io::BlockingStore;
use crate::report::ReportType;

/// Names and writes artifacts into one destination store.
pub struct Publisher<S: SuffixSource = RandomSuffix> {
    store: BlockingStore,
    keys: KeyGenerator<S>,
}

impl Publisher {
    /// Publisher with random suffixes and the UTC clock.
    pub fn new(store: BlockingStore) -> Self {
        Self::with_keys(store, KeyGenerator::new())
    }
}

impl<S: SuffixSource> Publisher<S> {
    pub fn with_keys(store: BlockingStore, keys: KeyGenerator<S>) -> Self {
        Self { store, keys }
    }

    /// Write `payload` under a fresh key below `prefix` and return the key.
    ///
    /// Store failures are logged here once and returned unchanged.
    pub fn publish(
        &mut self,
        report_type: ReportType,
        prefix: &str,
        payload: Vec<u8>,
    ) -> Result<String> {
        let size = payload.len();
        let result = self
            .keys
            .unique_key(&self.store, prefix, report_type)
            .and_then(|key| self.store.put(&key, payload).map(|()| key));

        match result {
            Ok(key) => {
                info!(
                    store = self.store.name(),
                    key = %key,
                    report_type = %report_type,
                    bytes = size,
                    "Published artifact"
                );
                Ok(key)
            }
            Err(e) => {
                error!(
                    store = self.store.name(),
                    report_type = %report_type,
                    error = %e,
                    "Failed to publish artifact"
                );
                Err(e)
            }
        }
    }
}
