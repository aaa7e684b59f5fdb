//! Command-line argument definitions.

use clap::Parser;

use super::SummaryFormat;

/// Unpack a PON performance-monitoring bundle and publish normalized reports.
#[derive(Parser, Debug)]
#[command(name = "ponpm")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Bundle to process (e.g. s3://pm-raw/incoming/NE1.tar)
    #[arg(value_name = "SOURCE_URL")]
    pub source: Option<String>,

    /// Destination store and key prefix (e.g. s3://pm-clean/sdc_pon_extracted)
    #[arg(short = 'd', long = "dest", value_name = "DEST_URL")]
    pub dest: Option<String>,

    /// Custom endpoint for S3-compatible stores (MinIO, R2, LocalStack)
    #[arg(long = "endpoint", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Use unsigned requests (public buckets)
    #[arg(long = "anonymous")]
    pub anonymous: bool,

    /// Write a header row at the top of each artifact
    #[arg(long = "header")]
    pub header: bool,

    /// List recognized report entry names and exit
    #[arg(long = "list-reports")]
    pub list_reports: bool,

    /// Format of the run summary printed to stdout
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: SummaryFormat,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Default log filter for the `-v` count, used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_args() {
        let args = Args::try_parse_from([
            "ponpm",
            "s3://raw/incoming/NE1.tar",
            "--dest",
            "s3://clean/out",
        ])
        .unwrap();

        assert_eq!(args.source.as_deref(), Some("s3://raw/incoming/NE1.tar"));
        assert_eq!(args.dest.as_deref(), Some("s3://clean/out"));
        assert!(!args.list_reports);
        assert!(args.endpoint.is_none());
        assert!(!args.anonymous);
        assert!(!args.header);
        assert_eq!(args.format, SummaryFormat::Text);
        assert_eq!(args.log_filter(), "warn");
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "ponpm",
            "s3://raw/NE1.tar",
            "-d",
            "s3://clean",
            "--endpoint",
            "http://localhost:9000",
            "--anonymous",
            "--header",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.endpoint.as_deref(), Some("http://localhost:9000"));
        assert!(args.anonymous);
        assert!(args.header);
        assert_eq!(args.format, SummaryFormat::Json);
        assert_eq!(args.log_filter(), "debug");
    }

    #[test]
    fn test_list_reports_needs_no_urls() {
        let args = Args::try_parse_from(["ponpm", "--list-reports"]).unwrap();
        assert!(args.list_reports);
        assert!(args.source.is_none());
        assert!(args.dest.is_none());
    }
}
