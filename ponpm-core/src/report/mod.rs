//! Report identification and normalization.
//!
//! - [`ReportType`] - fixed entry-name registry
//! - [`ReportNormalizer`] - lazy flattening of one report body
//! - [`ReportWriter`] - CSV serialization of normalized rows

mod normalize;
mod registry;
mod writer;

pub use normalize::{
    ColumnHeader, NormalizedRow, ReportMetadata, ReportNormalizer, RowSkip, SkipReason,
    ARRAY_WIDTH,
};
pub use registry::ReportType;
pub use writer::{serialize_rows, ReportWriter};
