//! # ponpm-core
//!
//! Unpacking and normalization engine for PON performance-monitoring
//! report bundles.
//!
//! Network elements export their PM counters as CSV reports packed into
//! tar bundles. Each report carries a few metadata lines followed by data
//! rows whose counters are 3-element arrays. This crate fetches a bundle
//! from an object store, flattens every recognized report into one row per
//! array position and publishes the result under a collision-free key.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ponpm_core::prelude::*;
//!
//! let source = CloudLocation::parse("s3://pm-raw/incoming/NE1.tar").unwrap();
//! let dest = CloudLocation::parse("s3://pm-clean/sdc_pon_extracted").unwrap();
//!
//! let publisher = Publisher::new(BlockingStore::open(&dest).unwrap());
//! let mut unbundler = Unbundler::new(
//!     BlockingStore::open(&source).unwrap(),
//!     ArchiveUnpacker::new(publisher),
//! );
//!
//! let report = unbundler.unbundle(source.key(), dest.key()).unwrap();
//! println!("{} rows written", report.total_rows());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                           ponpm-core                                |
//! +---------------------------------------------------------------------+
//! |  archive/    - Extension dispatch, tar walking, nested bundles      |
//! |  report/     - Report registry, normalizer, CSV writer              |
//! |  publish/    - Key generation, collision probing, upload            |
//! |  io/         - Object store locations and blocking store handle     |
//! |  error/      - Error types                                          |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Crate Features
//!
//! - `default` - S3 support
//! - `s3` - Amazon S3 and S3-compatible stores
//! - `gcs` - Google Cloud Storage
//! - `azure` - Azure Blob Storage
//!
//! `file://` and `memory://` locations are always available.
//!
//! ## Recognized Reports
//!
//! | Entry name | Report type |
//! |------------|-------------|
//! | `iSAM_ponOltUtilTxOntHistoryData.csv` | `ponOltUtilTxOntHistory` |
//! | `iSAM_ponOltUtilRxOntHistoryData.csv` | `ponOltUtilRxOntHistory` |
//! | `iSAM_ponOltUtilHistoryData.csv` | `ponOltUtilHistory` |
//! | `iSAM_ontOltUtilBulkHistoryData.csv` | `ontOltUtilBulkHistory` |
//! | `iSAM_ng2ChannelPairOltUtilTxOntHistoryData.csv` | `ng2CpOltTxOntHistory` |
//! | `iSAM_ng2ChannelPairOltUtilRxOntHistoryData.csv` | `ng2CpOltRxOntHistory` |
//! | `iSAM_ng2ChannelPairOltUtilHistoryData.csv` | `ng2CpOltUtilHistory` |
//! | `iSAM_ng2OntOltUtilBulkHistoryData.csv` | `ng2OntOltUtilBulkHistory` |

pub mod archive;
pub mod error;
pub mod io;
pub mod prelude;
pub mod publish;
pub mod report;

// Re-export commonly used types at crate root for convenience
pub use archive::{
    key_extension, ArchiveUnpacker, BundleFormat, BundleReport, EntrySummary,
    NestedArchiveHandler, UnpackOptions, Unbundler,
};
pub use error::{Error, Result, StoreError};
pub use io::{BlockingStore, CloudLocation};
pub use publish::{
    normalize_prefix, Clock, KeyGenerator, Publisher, RandomSuffix, SuffixSource, SUFFIX_RANGE,
    TIMESTAMP_FORMAT,
};
pub use report::{
    serialize_rows, ColumnHeader, NormalizedRow, ReportMetadata, ReportNormalizer, ReportType,
    ReportWriter, RowSkip, SkipReason, ARRAY_WIDTH,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
