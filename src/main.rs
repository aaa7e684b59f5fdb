//! ponpm CLI entry point.

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ponpm::cli::{run, write_report_types, Args, SummaryFormatter};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_filter().into()),
        )
        .with_writer(io::stderr)
        .init();

    let mut stdout = io::stdout();

    // Handle info-only commands
    if args.list_reports {
        write_report_types(&mut stdout)?;
        return Ok(());
    }

    let summary = run(&args)?;
    SummaryFormatter::new(args.format).write(&summary, &mut stdout)?;
    Ok(())
}
