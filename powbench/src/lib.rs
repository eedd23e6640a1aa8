#![warn(missing_docs)]
//! # powbench
//!
//! Times three ways of raising a floating-point base to a non-negative
//! integer power and prints how the cost grows with the exponent:
//! - **linear**: repeated multiplication, `O(n)`
//! - **squaring**: binary exponentiation, `O(log n)`
//! - **libm**: the platform `powf`, roughly constant time
//!
//! Every trial is timed with a monotonic clock around a `black_box`ed loop
//! and reports the average cost per call together with one result value.
//!
//! ## Quick Start
//!
//! ```ignore
//! use powbench::prelude::*;
//!
//! let m = measure(1.01, 5, pow_squaring, 1_000)?;
//! println!("{:.2} ns/call, result {}", m.mean_ns, m.sample);
//! ```
//!
//! The `powbench` binary runs the full decade sweep; see `powbench --help`.

// Re-export core types
pub use powbench_core::{
    Clock, ClockError, Complexity, Harness, KernelDef, KernelFn, MeasureError, Measurement,
    MonotonicClock, Timer, Trial, find_kernel, measure, pin_to_cpu, pow_linear, pow_reference,
    pow_squaring, registered_kernels,
};

// Re-export report types
pub use powbench_report::{
    MagnitudeBlock, OutputFormat, Report, ReportSummary, TrialMetrics, TrialResult, TrialStatus,
    generate_csv_report, generate_json_report,
};

// Re-export run driver types
pub use powbench_cli::{
    ExecutionConfig, ExecutionPlan, Executor, Growth, PowConfig, Schedule, build_plan,
    build_report,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Measurement, measure, pow_linear, pow_reference, pow_squaring, registered_kernels,
    };
}

/// Run the powbench CLI.
///
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     powbench::run()
/// }
/// ```
pub use powbench_cli::run;
