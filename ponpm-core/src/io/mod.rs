//! Object store I/O.
//!
//! - [`CloudLocation`] - URL parsing and per-scheme client construction
//! - [`BlockingStore`] - the fetch / exists / put capability handed to the pipeline

mod cloud;
mod store;

pub use cloud::CloudLocation;
pub use store::BlockingStore;
