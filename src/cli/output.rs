//! Run summary formatting.

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;

use ponpm_core::{BundleReport, ReportType};

/// Supported summary formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// One line per artifact plus totals (default)
    Text,
    /// A single JSON document
    Json,
}

/// What one invocation did.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// ponpm version that produced the artifacts
    pub version: &'static str,
    /// Store the bundle was read from
    pub source_store: String,
    /// Store artifacts were written to
    pub dest_store: String,
    /// Key prefix artifacts were written under
    pub prefix: String,
    pub bundle: BundleReport,
    pub total_rows: usize,
    pub total_skipped: usize,
}

impl RunSummary {
    pub fn new(
        source_store: String,
        dest_store: String,
        prefix: String,
        bundle: BundleReport,
    ) -> Self {
        Self {
            version: ponpm_core::VERSION,
            total_rows: bundle.total_rows(),
            total_skipped: bundle.total_skipped(),
            source_store,
            dest_store,
            prefix,
            bundle,
        }
    }
}

/// Writes a [`RunSummary`] in the selected format.
pub struct SummaryFormatter {
    format: SummaryFormat,
}

impl SummaryFormatter {
    pub fn new(format: SummaryFormat) -> Self {
        Self { format }
    }

    pub fn write<W: Write>(&self, summary: &RunSummary, writer: &mut W) -> std::io::Result<()> {
        match self.format {
            SummaryFormat::Text => self.write_text(summary, writer),
            SummaryFormat::Json => self.write_json(summary, writer),
        }
    }

    fn write_text<W: Write>(&self, summary: &RunSummary, writer: &mut W) -> std::io::Result<()> {
        let bundle = &summary.bundle;
        writeln!(
            writer,
            "Bundle: {}/{} ({})",
            summary.source_store, bundle.source, bundle.extension
        )?;

        for entry in &bundle.entries {
            writeln!(
                writer,
                "  {} -> {}/{} ({} rows, {} skipped)",
                entry.entry, summary.dest_store, entry.key, entry.rows, entry.skipped
            )?;
        }

        writeln!(
            writer,
            "Published {} artifact(s): {} rows, {} skipped",
            bundle.entries.len(),
            summary.total_rows,
            summary.total_skipped
        )
    }

    fn write_json<W: Write>(&self, summary: &RunSummary, writer: &mut W) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, summary)?;
        writeln!(writer)
    }
}

/// Print the report registry, one `entry name -> report type` per line.
pub fn write_report_types<W: Write>(writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "Recognized report entries:")?;
    writeln!(writer, "{:-<72}", "")?;
    for report_type in ReportType::all() {
        writeln!(writer, "  {:<48} {}", report_type.entry_name(), report_type)?;
    }
    Ok(())
}
