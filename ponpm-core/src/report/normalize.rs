//! CSV row normalizer.
//!
//! A PON report body mixes three kinds of lines:
//!
//! ```text
//! Time stamp,2024-01-01T00:00Z          <- file-level metadata
//! Object Type,ONT
//! NE Name,NE1
//! NE Type/Release,X1
//! Object ID,Tx Util,Rx Util             <- column header
//! OID1,"{1, 2, 3}","{4, 5, 6}"          <- data rows, two array fields each
//! ```
//!
//! [`ReportNormalizer`] walks the records lazily, keeps the most recent
//! metadata, and flattens every data row into three [`NormalizedRow`]s by
//! pairing the array elements index by index. Records that do not have
//! the columns their classification needs are skipped and reported as
//! [`RowSkip`]s rather than aborting the entry.

use std::collections::VecDeque;
use std::fmt;
use std::io::Read;

use serde::Serialize;
use tracing::warn;

use super::ReportType;
use crate::error::Result;

/// Number of elements in each array field.
pub const ARRAY_WIDTH: usize = 3;

const TIME_STAMP: &str = "Time stamp";
const OBJECT_TYPE: &str = "Object Type";
const NE_NAME: &str = "NE Name";
const NE_TYPE: &str = "NE Type/Release";
const OBJECT_ID: &str = "Object ID";

/// File-level fields taken from the report's header lines.
///
/// Every field starts empty and holds the value of the most recent
/// matching header line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportMetadata {
    pub time_stamp: String,
    pub object_type: String,
    pub ne_name: String,
    pub ne_type: String,
}

/// Labels from the `Object ID` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub object_id: String,
    pub first: String,
    pub second: String,
}

/// One flattened output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRow {
    pub report_type: ReportType,
    pub time_stamp: String,
    pub object_type: String,
    pub ne_name: String,
    pub ne_type: String,
    pub object_id: String,
    pub first: String,
    pub second: String,
}

impl NormalizedRow {
    /// Field values in output column order.
    pub fn fields(&self) -> [&str; 8] {
        [
            self.report_type.as_str(),
            &self.time_stamp,
            &self.object_type,
            &self.ne_name,
            &self.ne_type,
            &self.object_id,
            &self.first,
            &self.second,
        ]
    }
}

/// Why a record produced no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The record is shorter than its classification requires
    MissingColumn { needed: usize, found: usize },
    /// An array field holds fewer than three elements
    ArrayTooShort { column: usize, found: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingColumn { needed, found } => {
                write!(f, "expected at least {needed} columns, found {found}")
            }
            SkipReason::ArrayTooShort { column, found } => write!(
                f,
                "array in column {column} has {found} elements, expected {ARRAY_WIDTH}"
            ),
        }
    }
}

/// A record the normalizer dropped, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSkip {
    pub line: u64,
    pub reason: SkipReason,
}

/// What a single record turned out to be.
enum Line {
    Metadata,
    ColumnHeader(ColumnHeader),
    Data {
        object_id: String,
        first: Vec<String>,
        second: Vec<String>,
    },
}

/// Lazily normalizes one report body.
///
/// Yields `Ok(row)` for every flattened row and `Err` only for read
/// failures (I/O, invalid UTF-8). Skipped records are available from
/// [`skips`](Self::skips) once iteration is done.
pub struct ReportNormalizer<R: Read> {
    report_type: ReportType,
    source: String,
    records: csv::StringRecordsIntoIter<R>,
    metadata: ReportMetadata,
    header: Option<ColumnHeader>,
    pending: VecDeque<NormalizedRow>,
    data_rows: usize,
    skips: Vec<RowSkip>,
}

impl<R: Read> ReportNormalizer<R> {
    /// Normalize `reader`. `source` names the report in log output.
    pub fn new(report_type: ReportType, source: impl Into<String>, reader: R) -> Self {
        let records = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quote(b'"')
            .from_reader(reader)
            .into_records();

        Self {
            report_type,
            source: source.into(),
            records,
            metadata: ReportMetadata::default(),
            header: None,
            pending: VecDeque::with_capacity(ARRAY_WIDTH),
            data_rows: 0,
            skips: Vec::new(),
        }
    }

    /// Metadata as of the last record read.
    pub fn metadata(&self) -> &ReportMetadata {
        &self.metadata
    }

    /// Labels from the `Object ID` line, if one has been read.
    pub fn column_header(&self) -> Option<&ColumnHeader> {
        self.header.as_ref()
    }

    /// Data rows successfully flattened so far.
    pub fn data_rows(&self) -> usize {
        self.data_rows
    }

    /// Records dropped so far.
    pub fn skips(&self) -> &[RowSkip] {
        &self.skips
    }

    fn apply(&mut self, record: &csv::StringRecord) -> std::result::Result<(), SkipReason> {
        match classify(record)? {
            Line::Metadata => {
                // classify() already checked column 1 exists
                let value = record.get(1).unwrap_or_default().to_string();
                match record.get(0) {
                    Some(TIME_STAMP) => self.metadata.time_stamp = value,
                    Some(OBJECT_TYPE) => self.metadata.object_type = value,
                    Some(NE_NAME) => self.metadata.ne_name = value,
                    Some(NE_TYPE) => self.metadata.ne_type = value,
                    _ => {}
                }
            }
            Line::ColumnHeader(header) => self.header = Some(header),
            Line::Data {
                object_id,
                first,
                second,
            } => {
                self.data_rows += 1;
                for (a, b) in first.into_iter().zip(second).take(ARRAY_WIDTH) {
                    self.pending.push_back(NormalizedRow {
                        report_type: self.report_type,
                        time_stamp: self.metadata.time_stamp.clone(),
                        object_type: self.metadata.object_type.clone(),
                        ne_name: self.metadata.ne_name.clone(),
                        ne_type: self.metadata.ne_type.clone(),
                        object_id: object_id.clone(),
                        first: a,
                        second: b,
                    });
                }
            }
        }
        Ok(())
    }
}

impl<R: Read> Iterator for ReportNormalizer<R> {
    type Item = Result<NormalizedRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.pending.pop_front() {
                return Some(Ok(row));
            }

            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(e.into())),
            };

            if let Err(reason) = self.apply(&record) {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                warn!(
                    report = %self.source,
                    line,
                    reason = %reason,
                    "Skipping malformed record"
                );
                self.skips.push(RowSkip { line, reason });
            }
        }
    }
}

/// Classify a record by its first column. First matching label wins.
fn classify(record: &csv::StringRecord) -> std::result::Result<Line, SkipReason> {
    let found = record.len();
    let need = |needed: usize| {
        if found < needed {
            Err(SkipReason::MissingColumn { needed, found })
        } else {
            Ok(())
        }
    };

    match record.get(0).unwrap_or_default() {
        TIME_STAMP | OBJECT_TYPE | NE_NAME | NE_TYPE => {
            need(2)?;
            Ok(Line::Metadata)
        }
        OBJECT_ID => {
            need(3)?;
            Ok(Line::ColumnHeader(ColumnHeader {
                object_id: record[0].to_string(),
                first: record[1].to_string(),
                second: record[2].to_string(),
            }))
        }
        object_id => {
            let columns = rejoin_arrays(record.iter().skip(1));
            if columns.len() < 2 {
                return Err(SkipReason::MissingColumn {
                    needed: 3,
                    found: 1 + columns.len(),
                });
            }

            let first = split_array(&columns[0]);
            if first.len() < ARRAY_WIDTH {
                return Err(SkipReason::ArrayTooShort {
                    column: 1,
                    found: first.len(),
                });
            }
            let second = split_array(&columns[1]);
            if second.len() < ARRAY_WIDTH {
                return Err(SkipReason::ArrayTooShort {
                    column: 2,
                    found: second.len(),
                });
            }

            Ok(Line::Data {
                object_id: object_id.to_string(),
                first,
                second,
            })
        }
    }
}

/// Reassemble brace groups the CSV reader split apart.
///
/// `OID1,{1,2,3},{4,5,6}` without quotes reaches us as the fields
/// `{1`, `2`, `3}`, ... ; those are glued back into `{1, 2, 3}`.
/// Quoted arrays arrive whole and pass through untouched.
fn rejoin_arrays<'a>(fields: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut columns = Vec::new();
    let mut open: Option<String> = None;

    for field in fields {
        match open.as_mut() {
            Some(group) => {
                group.push_str(", ");
                group.push_str(field);
                if field.trim_end().ends_with('}') {
                    columns.extend(open.take());
                }
            }
            None => {
                let trimmed = field.trim();
                if trimmed.starts_with('{') && !trimmed.ends_with('}') {
                    open = Some(field.to_string());
                } else {
                    columns.push(field.to_string());
                }
            }
        }
    }
    // unterminated group: keep what we have
    columns.extend(open);
    columns
}

/// Split `{a, b, c}` into its elements.
///
/// Elements are whitespace separated with trailing commas; the compact
/// `{a,b,c}` form is accepted too.
fn split_array(raw: &str) -> Vec<String> {
    let inner = raw.trim().trim_matches(|c: char| c == '{' || c == '}');

    let tokens: Vec<&str> = inner
        .split_whitespace()
        .map(|token| token.trim_matches(','))
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.len() == 1 && inner.contains(',') {
        return inner
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();
    }

    tokens.into_iter().map(str::to_string).collect()
}
