//! Destination naming and artifact upload.

mod naming;
mod publisher;

pub use naming::{
    normalize_prefix, Clock, KeyGenerator, RandomSuffix, SuffixSource, SUFFIX_RANGE,
    TIMESTAMP_FORMAT,
};
pub use publisher::Publisher;
