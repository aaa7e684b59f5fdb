//! Bundle unpacking.
//!
//! [`Unbundler`] picks a handler from the bundle's extension. Tar bundles
//! go through [`ArchiveUnpacker`], which normalizes and publishes each
//! recognized report.

mod dispatch;
mod nested;
mod unpack;

pub use dispatch::{key_extension, BundleFormat, BundleReport, Unbundler};
pub use nested::NestedArchiveHandler;
pub use unpack::{ArchiveUnpacker, EntrySummary, UnpackOptions};
