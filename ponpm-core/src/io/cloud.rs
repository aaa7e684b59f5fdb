//! Object store location parsing and client construction.
//!
//! Provides [`CloudLocation`], which turns a URL such as `s3://bucket/prefix/`
//! into an `object_store` client plus the key it points at.
//!
//! ## Supported Providers
//!
//! - AWS S3 (`s3://bucket/key`) - requires `s3` feature
//! - Google Cloud Storage (`gs://bucket/key`) - requires `gcs` feature
//! - Azure Blob Storage (`az://container/blob`) - requires `azure` feature
//! - S3-compatible (MinIO, R2, LocalStack) - requires `s3` feature + custom endpoint
//! - Local filesystem (`file:///abs/path`)
//! - In-process memory (`memory://name/key`), starts empty and is discarded at exit
//!
//! ## Usage
//!
//! ```ignore
//! use ponpm_core::io::{BlockingStore, CloudLocation};
//!
//! let location = CloudLocation::parse("s3://pon-drop/incoming/ne1.tar")?;
//! let store = BlockingStore::open(&location)?;
//! let bytes = store.fetch(location.key())?;
//! ```

use std::io;
use std::sync::Arc;

use object_store::ObjectStore;
use tokio::runtime::RuntimeFlavor;
use url::Url;

use crate::error::{Error, Result, StoreError};

/// Execute an async operation, handling runtime nesting correctly.
///
/// If called from within a multi-threaded tokio runtime, uses
/// `block_in_place` to allow blocking while running the future on the
/// current runtime's handle. A current-thread runtime cannot block in
/// place, so that case is an error. If called outside a runtime, creates
/// a temporary single-threaded runtime.
pub(crate) fn run_async<F, T>(future: F) -> Result<T>
where
    F: std::future::Future<Output = Result<T>>,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => match handle.runtime_flavor() {
            RuntimeFlavor::CurrentThread => Err(Error::Io(io::Error::other(
                "Blocking store calls need a multi-threaded runtime, \
                 found a current-thread runtime",
            ))),
            _ => tokio::task::block_in_place(|| handle.block_on(future)),
        },
        Err(_) => tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                Error::Io(io::Error::other(format!(
                    "Failed to create temporary runtime: {e}"
                )))
            })?
            .block_on(future),
    }
}

/// URL schemes understood by [`CloudLocation::parse`].
const SUPPORTED_SCHEMES: &[&str] = &["s3", "gs", "az", "azure", "file", "memory"];

/// Parsed object store location.
#[derive(Debug, Clone)]
pub struct CloudLocation {
    /// The parsed URL
    url: Url,
    /// Custom endpoint override (for S3-compatible services)
    endpoint: Option<String>,
    /// Whether to use anonymous (unsigned) requests
    anonymous: bool,
}

impl CloudLocation {
    /// Parse a store URL.
    ///
    /// Supported formats:
    /// - `s3://bucket/key` - AWS S3
    /// - `gs://bucket/key` - Google Cloud Storage
    /// - `az://container/blob` - Azure Blob Storage
    /// - `file:///abs/path` - local filesystem
    /// - `memory://name/key` - in-process store
    pub fn parse(url_str: &str) -> Result<Self> {
        let url = Url::parse(url_str)
            .map_err(|e| Error::Location(format!("Invalid URL '{url_str}': {e}")))?;

        let scheme = url.scheme();
        if !SUPPORTED_SCHEMES.contains(&scheme) {
            return Err(Error::Location(format!(
                "Unsupported URL scheme: {scheme}. Expected s3://, gs://, az://, file:// or memory://"
            )));
        }

        Ok(Self {
            url,
            endpoint: None,
            anonymous: false,
        })
    }

    /// Set a custom endpoint URL (for MinIO, R2, LocalStack, etc.).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Use anonymous (unsigned) requests for public buckets.
    pub fn with_anonymous(mut self, anonymous: bool) -> Self {
        self.anonymous = anonymous;
        self
    }

    /// Get the URL scheme (s3, gs, az, file, memory).
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Get the bucket/container name.
    pub fn bucket(&self) -> Option<&str> {
        self.url.host_str().filter(|host| !host.is_empty())
    }

    /// Get the object key/path.
    ///
    /// For destinations this is the prefix artifacts are written under.
    pub fn key(&self) -> &str {
        self.url.path().trim_start_matches('/')
    }

    /// Get the custom endpoint if set.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Human-readable name of the store this location lives in.
    pub fn store_name(&self) -> String {
        match self.bucket() {
            Some(bucket) => format!("{}://{}", self.scheme(), bucket),
            None => format!("{}://", self.scheme()),
        }
    }

    /// Build an ObjectStore for this location.
    pub fn build_store(&self) -> Result<Arc<dyn ObjectStore>> {
        match self.scheme() {
            #[cfg(feature = "s3")]
            "s3" => self.build_s3_store(),
            #[cfg(feature = "gcs")]
            "gs" => self.build_gcs_store(),
            #[cfg(feature = "azure")]
            "az" | "azure" => self.build_azure_store(),
            "file" => Ok(Arc::new(object_store::local::LocalFileSystem::new())),
            "memory" => Ok(Arc::new(object_store::memory::InMemory::new())),
            scheme => Err(Error::Location(format!(
                "Unsupported or disabled scheme: {scheme}"
            ))),
        }
    }

    #[cfg(any(feature = "s3", feature = "gcs", feature = "azure"))]
    fn require_bucket(&self, what: &str) -> Result<&str> {
        self.bucket().ok_or_else(|| {
            Error::Location(format!(
                "{} URL must include {what} name",
                self.scheme().to_uppercase()
            ))
        })
    }

    #[cfg(feature = "s3")]
    fn build_s3_store(&self) -> Result<Arc<dyn ObjectStore>> {
        use object_store::aws::AmazonS3Builder;

        let bucket = self.require_bucket("bucket")?;

        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);

        if let Some(endpoint) = &self.endpoint {
            builder = builder.with_endpoint(endpoint).with_allow_http(true);
        }

        if self.anonymous {
            builder = builder.with_skip_signature(true);
        }

        let store = builder.build().map_err(|source| StoreError::Build {
            scheme: "s3".to_string(),
            source,
        })?;

        Ok(Arc::new(store))
    }

    #[cfg(feature = "gcs")]
    fn build_gcs_store(&self) -> Result<Arc<dyn ObjectStore>> {
        use object_store::gcp::GoogleCloudStorageBuilder;

        let bucket = self.require_bucket("bucket")?;

        let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(bucket);

        if self.anonymous {
            builder = builder.with_anonymous(true);
        }

        let store = builder.build().map_err(|source| StoreError::Build {
            scheme: "gcs".to_string(),
            source,
        })?;

        Ok(Arc::new(store))
    }

    #[cfg(feature = "azure")]
    fn build_azure_store(&self) -> Result<Arc<dyn ObjectStore>> {
        use object_store::azure::MicrosoftAzureBuilder;

        let container = self.require_bucket("container")?;

        let mut builder = MicrosoftAzureBuilder::from_env().with_container_name(container);

        if self.anonymous {
            builder = builder.with_skip_signature(true);
        }

        let store = builder.build().map_err(|source| StoreError::Build {
            scheme: "azure".to_string(),
            source,
        })?;

        Ok(Arc::new(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_s3_url() {
        let loc = CloudLocation::parse("s3://pon-drop/incoming/ne1.tar").unwrap();
        assert_eq!(loc.scheme(), "s3");
        assert_eq!(loc.bucket(), Some("pon-drop"));
        assert_eq!(loc.key(), "incoming/ne1.tar");
        assert!(loc.endpoint().is_none());
    }

    #[test]
    fn test_parse_destination_prefix() {
        let loc = CloudLocation::parse("s3://pon-extracted/sdc_pon_extracted/").unwrap();
        assert_eq!(loc.bucket(), Some("pon-extracted"));
        assert_eq!(loc.key(), "sdc_pon_extracted/");
    }

    #[test]
    fn test_parse_bucket_root() {
        let loc = CloudLocation::parse("s3://pon-extracted").unwrap();
        assert_eq!(loc.key(), "");
        assert_eq!(loc.store_name(), "s3://pon-extracted");
    }

    #[test]
    fn test_parse_gcs_and_azure_urls() {
        let gcs = CloudLocation::parse("gs://bucket/a/b.tar").unwrap();
        assert_eq!(gcs.scheme(), "gs");
        assert_eq!(gcs.key(), "a/b.tar");

        let az = CloudLocation::parse("az://container/blob/path.tar").unwrap();
        assert_eq!(az.bucket(), Some("container"));
        assert_eq!(az.key(), "blob/path.tar");
    }

    #[test]
    fn test_parse_file_url() {
        let loc = CloudLocation::parse("file:///var/spool/pon/ne1.tar").unwrap();
        assert_eq!(loc.bucket(), None);
        assert_eq!(loc.key(), "var/spool/pon/ne1.tar");
        assert_eq!(loc.store_name(), "file://");
    }

    #[test]
    fn test_parse_invalid_scheme() {
        assert!(matches!(
            CloudLocation::parse("http://example.com/file"),
            Err(Error::Location(_))
        ));
        assert!(CloudLocation::parse("ftp://bucket/key").is_err());
        assert!(CloudLocation::parse("not a url").is_err());
    }

    #[test]
    fn test_with_endpoint_and_anonymous() {
        let loc = CloudLocation::parse("s3://bucket/key")
            .unwrap()
            .with_endpoint("http://localhost:4566")
            .with_anonymous(true);
        assert_eq!(loc.endpoint(), Some("http://localhost:4566"));
        assert!(loc.anonymous);
    }

    #[test]
    fn test_build_memory_store() {
        let loc = CloudLocation::parse("memory://scratch/out/").unwrap();
        assert!(loc.build_store().is_ok());
    }

    #[test]
    fn test_run_async_outside_runtime() {
        let value = run_async(async { Ok(7) }).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_run_async_inside_multi_thread_runtime() {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .build()
            .unwrap();
        let handle = rt.spawn(async { run_async(async { Ok(11) }) });
        let value = rt.block_on(handle).unwrap().unwrap();
        assert_eq!(value, 11);
    }

    #[test]
    fn test_run_async_inside_current_thread_runtime_is_an_error() {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let result = rt.block_on(async { run_async(async { Ok(3) }) });
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
