//! Report Building
//!
//! Assembles the final [`Report`] from executed blocks: metadata, the blocks
//! themselves, and a summary tally.

use super::execution::ExecutionConfig;
use super::metadata::build_report_meta;
use powbench_report::{MagnitudeBlock, Report, ReportSummary};

/// Build a complete Report from executed blocks
pub fn build_report(
    blocks: Vec<MagnitudeBlock>,
    config: &ExecutionConfig,
    total_duration_ms: f64,
) -> Report {
    let summary = ReportSummary::tally(&blocks, total_duration_ms);

    Report {
        meta: build_report_meta(config),
        blocks,
        summary,
    }
}
