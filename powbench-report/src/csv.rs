//! CSV Output
//!
//! One row per trial. Rows can be emitted block by block, so a long run
//! streams its results instead of holding them until the end.

use crate::report::{MagnitudeBlock, Report, TrialStatus};

/// CSV header row (with trailing newline)
pub const CSV_HEADER: &str =
    "base,exponent,kernel,status,mean_ns,truncated_ns,elapsed_ns,iterations,sample,note\n";

/// Render the rows of one block (no header)
pub fn generate_csv_rows(block: &MagnitudeBlock) -> String {
    let mut out = String::new();

    for result in &block.results {
        let status = match result.status {
            TrialStatus::Measured => "measured",
            TrialStatus::Skipped => "skipped",
            TrialStatus::Failed => "failed",
        };

        let (mean, truncated, elapsed, iterations, sample) = match &result.metrics {
            Some(m) => (
                m.mean_ns.to_string(),
                m.truncated_ns.to_string(),
                m.elapsed_ns.to_string(),
                m.iterations.to_string(),
                m.sample.to_string(),
            ),
            None => Default::default(),
        };

        let note = result
            .failure
            .as_ref()
            .map(|f| f.message.as_str())
            .or(result.skip_reason.as_deref())
            .unwrap_or("");

        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{}\n",
            block.base,
            block.exponent,
            escape(&result.kernel_id),
            status,
            mean,
            truncated,
            elapsed,
            iterations,
            sample,
            escape(note)
        ));
    }

    out
}

/// Render a complete report as CSV
pub fn generate_csv_report(report: &Report) -> String {
    let mut out = String::from(CSV_HEADER);
    for block in &report.blocks {
        out.push_str(&generate_csv_rows(block));
    }
    out
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{FailureInfo, TrialMetrics, TrialResult};

    #[test]
    fn test_rows() {
        let block = MagnitudeBlock {
            base: 2.0,
            exponent: 10,
            results: vec![
                TrialResult {
                    kernel_id: "squaring".to_string(),
                    kernel_name: "squaring".to_string(),
                    complexity: "O(log n)".to_string(),
                    status: TrialStatus::Measured,
                    metrics: Some(TrialMetrics {
                        mean_ns: 1.5,
                        truncated_ns: 1,
                        elapsed_ns: 1500,
                        iterations: 1000,
                        sample: 1024.0,
                    }),
                    skip_reason: None,
                    failure: None,
                },
                TrialResult {
                    kernel_id: "linear".to_string(),
                    kernel_name: "linear".to_string(),
                    complexity: "O(n)".to_string(),
                    status: TrialStatus::Failed,
                    metrics: None,
                    skip_reason: None,
                    failure: Some(FailureInfo {
                        kind: "clock".to_string(),
                        message: "read failed, twice".to_string(),
                    }),
                },
            ],
        };

        let rows = generate_csv_rows(&block);
        let lines: Vec<_> = rows.lines().collect();
        assert_eq!(lines[0], "2,10,squaring,measured,1.5,1,1500,1000,1024,");
        assert_eq!(lines[1], "2,10,linear,failed,,,,,,\"read failed, twice\"");
    }

    #[test]
    fn test_header_columns_match_rows() {
        assert_eq!(CSV_HEADER.trim_end().split(',').count(), 10);
    }
}
