//! Output Formatting
//!
//! Human-readable output, one block per exponent:
//!
//! ```text
//! 1.000000001^1000:
//!    libm     (0012ns,   12.41 ns/call): 1.000001000
//!    linear   (1043ns, 1043.87 ns/call): 1.000001000
//!    squaring (0009ns,    9.02 ns/call): 1.000001000
//! ```
//!
//! The four-digit field is the truncated average kept for parity with older
//! output; the `ns/call` field is the floating average.

use powbench_report::{MagnitudeBlock, ReportSummary, TrialStatus};

/// Format the run header
pub fn format_header(iterations: u64, measured_trials: usize) -> String {
    format!(
        "powbench: {} trial(s), {} call(s) per trial\n",
        measured_trials, iterations
    )
}

/// Format one block for terminal display
pub fn format_block_human(block: &MagnitudeBlock) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{}^{}:\n", block.base, block.exponent));

    let name_width = block
        .results
        .iter()
        .map(|r| r.kernel_name.len())
        .max()
        .unwrap_or(8);

    for result in &block.results {
        let name = format!("{:<width$}", result.kernel_name, width = name_width);

        match (result.status, &result.metrics) {
            (TrialStatus::Measured, Some(m)) => {
                output.push_str(&format!(
                    "   {} ({:04}ns, {:>8.2} ns/call): {}\n",
                    name,
                    m.truncated_ns,
                    m.mean_ns,
                    format_value(m.sample)
                ));
            }
            (TrialStatus::Skipped, _) => {
                let reason = result.skip_reason.as_deref().unwrap_or("skipped");
                output.push_str(&format!("   {} (skipped: {})\n", name, reason));
            }
            _ => {
                let message = result
                    .failure
                    .as_ref()
                    .map(|f| f.message.as_str())
                    .unwrap_or("no measurement");
                output.push_str(&format!("   {} (failed: {})\n", name, message));
            }
        }
    }

    output
}

/// Format the end-of-run summary
pub fn format_summary_human(summary: &ReportSummary) -> String {
    let mut output = String::new();

    output.push_str("\nSummary\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  Total: {}  Measured: {}  Skipped: {}  Failed: {}\n",
        summary.total_trials, summary.measured, summary.skipped, summary.failed
    ));
    output.push_str(&format!("  Duration: {:.2} ms\n", summary.total_duration_ms));

    output
}

/// Format a sample result; scientific notation outside the readable range
fn format_value(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        format!("{}", value)
    } else if value.abs() >= 1e9 || value.abs() < 1e-3 {
        format!("{:.9e}", value)
    } else {
        format!("{:.9}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use powbench_report::{FailureInfo, TrialMetrics, TrialResult};

    fn result(name: &str, status: TrialStatus) -> TrialResult {
        TrialResult {
            kernel_id: name.to_string(),
            kernel_name: name.to_string(),
            complexity: "O(1)".to_string(),
            status,
            metrics: None,
            skip_reason: None,
            failure: None,
        }
    }

    #[test]
    fn test_block_lines() {
        let mut measured = result("libm", TrialStatus::Measured);
        measured.metrics = Some(TrialMetrics {
            mean_ns: 12.5,
            truncated_ns: 12,
            elapsed_ns: 12_500,
            iterations: 1_000,
            sample: 1024.0,
        });

        let mut skipped = result("linear", TrialStatus::Skipped);
        skipped.skip_reason = Some("exponent 5000 above linear limit 2000".to_string());

        let mut failed = result("squaring", TrialStatus::Failed);
        failed.failure = Some(FailureInfo {
            kind: "clock".to_string(),
            message: "monotonic clock read failed".to_string(),
        });

        let block = MagnitudeBlock {
            base: 2.0,
            exponent: 10,
            results: vec![measured, skipped, failed],
        };

        let text = format_block_human(&block);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "2^10:");
        assert_eq!(lines[2], "   libm     (0012ns,    12.50 ns/call): 1024.000000000");
        assert_eq!(
            lines[3],
            "   linear   (skipped: exponent 5000 above linear limit 2000)"
        );
        assert_eq!(lines[4], "   squaring (failed: monotonic clock read failed)");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1.5), "1.500000000");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(f64::INFINITY), "inf");
        assert_eq!(format_value(1e12), "1.000000000e12");
        assert_eq!(format_value(2.5e-5), "2.500000000e-5");
    }

    #[test]
    fn test_summary() {
        let summary = ReportSummary {
            total_trials: 3,
            measured: 1,
            skipped: 1,
            failed: 1,
            total_duration_ms: 4.0,
        };
        let text = format_summary_human(&summary);
        assert!(text.contains("Total: 3  Measured: 1  Skipped: 1  Failed: 1"));
        assert!(text.contains("Duration: 4.00 ms"));
    }
}
