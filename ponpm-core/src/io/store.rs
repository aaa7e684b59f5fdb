//! Blocking facade over an `object_store` client.
//!
//! The pipeline is synchronous: one bundle in, a handful of artifacts out.
//! [`BlockingStore`] exposes exactly the three operations it needs (fetch,
//! exists, put) and bridges each call onto tokio via [`run_async`].

use std::sync::Arc;

use bytes::Bytes;
use object_store::memory::InMemory;
use object_store::{path::Path as ObjectPath, ObjectStore, PutPayload};

use super::cloud::{run_async, CloudLocation};
use crate::error::{Result, StoreError};

/// A store handle shared by every component of one run.
#[derive(Clone)]
pub struct BlockingStore {
    inner: Arc<dyn ObjectStore>,
    name: String,
}

impl BlockingStore {
    /// Wrap an existing client. `name` is only used in log output.
    pub fn new(inner: Arc<dyn ObjectStore>, name: impl Into<String>) -> Self {
        Self {
            inner,
            name: name.into(),
        }
    }

    /// In-process store, mainly for tests. Contents are lost on drop.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()), "memory://")
    }

    /// Build the client for a parsed location.
    pub fn open(location: &CloudLocation) -> Result<Self> {
        Ok(Self::new(location.build_store()?, location.store_name()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Download a whole object into memory.
    pub fn fetch(&self, key: &str) -> Result<Bytes> {
        let path = ObjectPath::from(key);
        run_async(async {
            let result = self.inner.get(&path).await.map_err(|source| StoreError::Fetch {
                key: key.to_string(),
                source,
            })?;
            let bytes = result.bytes().await.map_err(|source| StoreError::Fetch {
                key: key.to_string(),
                source,
            })?;
            Ok(bytes)
        })
    }

    /// Check whether an object exists with a HEAD request.
    ///
    /// `NotFound` maps to `Ok(false)`; every other failure is an error.
    pub fn exists(&self, key: &str) -> Result<bool> {
        let path = ObjectPath::from(key);
        run_async(async {
            match self.inner.head(&path).await {
                Ok(_) => Ok(true),
                Err(object_store::Error::NotFound { .. }) => Ok(false),
                Err(source) => Err(StoreError::Probe {
                    key: key.to_string(),
                    source,
                }
                .into()),
            }
        })
    }

    /// Write `payload` to `key`, replacing any existing object.
    pub fn put(&self, key: &str, payload: Vec<u8>) -> Result<()> {
        let path = ObjectPath::from(key);
        run_async(async {
            self.inner
                .put(&path, PutPayload::from(payload))
                .await
                .map_err(|source| StoreError::Put {
                    key: key.to_string(),
                    source,
                })?;
            Ok(())
        })
    }
}

impl std::fmt::Debug for BlockingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingStore")
            .field("name", &self.name)
            .finish()
    }
}
