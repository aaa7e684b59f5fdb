//! Report type registry.
//!
//! PON equipment names its performance-monitoring exports with fixed file
//! names. The registry maps each known name to the report type used in the
//! normalized output; anything else in a bundle is ignored.

use std::fmt;

use serde::{Serialize, Serializer};

/// Known performance-monitoring report types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportType {
    PonOltUtilTxOntHistory,
    PonOltUtilRxOntHistory,
    PonOltUtilHistory,
    OntOltUtilBulkHistory,
    Ng2CpOltTxOntHistory,
    Ng2CpOltRxOntHistory,
    Ng2CpOltUtilHistory,
    Ng2OntOltUtilBulkHistory,
}

/// Entry file name to report type. Matching is exact and case-sensitive.
static REPORT_TYPES: [(&str, ReportType); 8] = [
    (
        "iSAM_ponOltUtilTxOntHistoryData.csv",
        ReportType::PonOltUtilTxOntHistory,
    ),
    (
        "iSAM_ponOltUtilRxOntHistoryData.csv",
        ReportType::PonOltUtilRxOntHistory,
    ),
    (
        "iSAM_ponOltUtilHistoryData.csv",
        ReportType::PonOltUtilHistory,
    ),
    (
        "iSAM_ontOltUtilBulkHistoryData.csv",
        ReportType::OntOltUtilBulkHistory,
    ),
    (
        "iSAM_ng2ChannelPairOltUtilTxOntHistoryData.csv",
        ReportType::Ng2CpOltTxOntHistory,
    ),
    (
        "iSAM_ng2ChannelPairOltUtilRxOntHistoryData.csv",
        ReportType::Ng2CpOltRxOntHistory,
    ),
    (
        "iSAM_ng2ChannelPairOltUtilHistoryData.csv",
        ReportType::Ng2CpOltUtilHistory,
    ),
    (
        "iSAM_ng2OntOltUtilBulkHistoryData.csv",
        ReportType::Ng2OntOltUtilBulkHistory,
    ),
];

impl ReportType {
    /// Resolve an archive entry name to its report type.
    pub fn from_entry_name(name: &str) -> Option<Self> {
        REPORT_TYPES
            .iter()
            .find(|(entry_name, _)| *entry_name == name)
            .map(|(_, report_type)| *report_type)
    }

    /// Identifier written into normalized rows and artifact keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::PonOltUtilTxOntHistory => "ponOltUtilTxOntHistory",
            ReportType::PonOltUtilRxOntHistory => "ponOltUtilRxOntHistory",
            ReportType::PonOltUtilHistory => "ponOltUtilHistory",
            ReportType::OntOltUtilBulkHistory => "ontOltUtilBulkHistory",
            ReportType::Ng2CpOltTxOntHistory => "ng2CpOltTxOntHistory",
            ReportType::Ng2CpOltRxOntHistory => "ng2CpOltRxOntHistory",
            ReportType::Ng2CpOltUtilHistory => "ng2CpOltUtilHistory",
            ReportType::Ng2OntOltUtilBulkHistory => "ng2OntOltUtilBulkHistory",
        }
    }

    /// The archive entry name this report type is exported under.
    pub fn entry_name(&self) -> &'static str {
        REPORT_TYPES
            .iter()
            .find(|(_, report_type)| report_type == self)
            .map(|(entry_name, _)| *entry_name)
            .unwrap_or_default()
    }

    /// All known report types, in registry order.
    pub fn all() -> impl Iterator<Item = ReportType> {
        REPORT_TYPES.iter().map(|(_, report_type)| *report_type)
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ReportType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
