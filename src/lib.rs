//! ponpm - Unpack PON performance-monitoring bundles.
//!
//! This library provides the command-line layer on top of `ponpm-core`:
//! argument parsing, store construction and run summaries.
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use ponpm::cli::{run, Args, SummaryFormatter};
//!
//! fn main() -> anyhow::Result<()> {
//!     let args = Args::parse_from(["ponpm", "s3://raw/NE1.tar", "--dest", "s3://clean/out"]);
//!     let summary = run(&args)?;
//!     SummaryFormatter::new(args.format).write(&summary, &mut std::io::stdout())?;
//!     Ok(())
//! }
//! ```

pub mod cli;

pub use ponpm_core::{Error, Result};
