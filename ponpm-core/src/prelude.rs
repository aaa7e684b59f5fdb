//! Convenient re-exports for common usage.
//!
//! ```rust,no_run
//! use ponpm_core::prelude::*;
//!
//! let store = BlockingStore::in_memory();
//! let unbundler = Unbundler::new(store.clone(), ArchiveUnpacker::new(Publisher::new(store)));
//! ```

// Pipeline
pub use crate::archive::{ArchiveUnpacker, BundleReport, EntrySummary, UnpackOptions, Unbundler};

// Reports
pub use crate::report::{NormalizedRow, ReportNormalizer, ReportType};

// Publishing
pub use crate::publish::{KeyGenerator, Publisher};

// I/O types
pub use crate::io::{BlockingStore, CloudLocation};

// Error types
pub use crate::error::{Error, Result};
