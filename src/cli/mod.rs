//! Command-line interface module.
//!
//! This module handles:
//! - Argument parsing via clap
//! - Store and pipeline construction from those arguments
//! - Run summary output (text, JSON)

mod args;
mod output;
mod run;

pub use args::Args;
pub use output::{write_report_types, RunSummary, SummaryFormat, SummaryFormatter};
pub use run::run;
