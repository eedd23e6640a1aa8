//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current report schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Complete run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata
    pub meta: ReportMeta,
    /// One block per exponent, in visiting order
    pub blocks: Vec<MagnitudeBlock>,
    /// Status counts and wall time
    pub summary: ReportSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Report schema version
    pub schema_version: u32,
    /// powbench version
    pub version: String,
    /// Report generation time
    pub timestamp: DateTime<Utc>,
    /// Host information
    pub system: SystemInfo,
    /// Effective run configuration
    pub config: ReportConfig,
}

/// Effective run configuration captured in report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Timed calls per trial
    pub iterations: u64,
    /// Linear-cost kernels skipped above this exponent
    pub linear_limit: u32,
    /// CPU the measuring thread was pinned to
    pub pinned_cpu: Option<usize>,
}

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system
    pub os: String,
    /// CPU architecture
    pub arch: String,
    /// CPU model name
    pub cpu: String,
    /// Logical core count
    pub cpu_cores: u32,
}

/// All trials sharing one (base, exponent) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagnitudeBlock {
    /// Base
    pub base: f64,
    /// Exponent
    pub exponent: u32,
    /// One result per planned kernel, in kernel id order
    pub results: Vec<TrialResult>,
}

/// Outcome of one kernel within a block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialResult {
    /// Kernel registry id
    pub kernel_id: String,
    /// Kernel display name
    pub kernel_name: String,
    /// Cost class, e.g. `O(log n)`
    pub complexity: String,
    /// Trial status
    pub status: TrialStatus,
    /// Present only when measured
    pub metrics: Option<TrialMetrics>,
    /// Present only when skipped
    pub skip_reason: Option<String>,
    /// Present only when failed
    pub failure: Option<FailureInfo>,
}

/// Trial status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrialStatus {
    /// Timed successfully
    Measured,
    /// Not run, see `skip_reason`
    Skipped,
    /// Measurement abandoned, see `failure`
    Failed,
}

/// Timing and sample value of a measured trial
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialMetrics {
    /// Average nanoseconds per call
    pub mean_ns: f64,
    /// Average nanoseconds per call, truncated
    pub truncated_ns: u64,
    /// Total nanoseconds in the timed loop
    pub elapsed_ns: u64,
    /// Timed calls
    pub iterations: u64,
    /// Result of one untimed call. Non-finite values (`inf`, `-inf`, `NaN`)
    /// are written as JSON strings, since JSON numbers cannot hold them.
    #[serde(with = "finite_or_string")]
    pub sample: f64,
}

/// Failure information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureInfo {
    /// Error kind, e.g. `clock`
    pub kind: String,
    /// Error message
    pub message: String,
}

/// Report summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    /// All planned trials
    pub total_trials: usize,
    /// Trials timed successfully
    pub measured: usize,
    /// Trials skipped by the planner
    pub skipped: usize,
    /// Trials whose measurement failed
    pub failed: usize,
    /// Wall time of the whole run
    pub total_duration_ms: f64,
}

impl ReportSummary {
    /// Tally trial statuses across blocks
    pub fn tally(blocks: &[MagnitudeBlock], total_duration_ms: f64) -> Self {
        let mut summary = ReportSummary {
            total_duration_ms,
            ..Default::default()
        };
        for result in blocks.iter().flat_map(|b| &b.results) {
            summary.total_trials += 1;
            match result.status {
                TrialStatus::Measured => summary.measured += 1,
                TrialStatus::Skipped => summary.skipped += 1,
                TrialStatus::Failed => summary.failed += 1,
            }
        }
        summary
    }

    /// Whether any trial failed
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// `f64` as a JSON number when finite, otherwise as its display string
mod finite_or_string {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str(&value.to_string())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(v),
            Repr::Text(s) => s.parse().map_err(de::Error::custom),
        }
    }
}
