#![warn(missing_docs)]
//! powbench Report - Result Model and Machine-Readable Output
//!
//! Generates:
//! - JSON (the full report, schema-versioned)
//! - CSV (one row per trial, streamable per block)
//!
//! Human-readable terminal output lives in the CLI crate.

mod csv;
mod json;
mod report;

pub use csv::{CSV_HEADER, generate_csv_report, generate_csv_rows};
pub use json::generate_json_report;
pub use report::{
    FailureInfo, MagnitudeBlock, Report, ReportConfig, ReportMeta, ReportSummary, SCHEMA_VERSION,
    SystemInfo, TrialMetrics, TrialResult, TrialStatus,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Human,
    /// JSON with full schema
    Json,
    /// CSV for spreadsheets
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
