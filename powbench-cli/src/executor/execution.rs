//! Trial Execution
//!
//! Runs an [`ExecutionPlan`] block by block on the calling thread. Trials
//! never overlap, so one measurement cannot disturb another through cache or
//! scheduler contention.
//!
//! ## Data Flow
//!
//! ```text
//! ExecutionPlan (from planner)
//!        │
//!        ▼
//! ┌──────────────────┐
//! │     Executor     │  Harness::run per planned trial
//! └────────┬─────────┘
//!          │  one MagnitudeBlock at a time
//!          ▼
//!    block sink (print + flush)
//! ```
//!
//! A failed measurement becomes a `failed` result in its block; the run moves
//! on to the next trial.

use crate::planner::{ExecutionPlan, PlannedBlock, PlannedTrial};
use powbench_core::{Clock, Harness, MonotonicClock, Trial, pin_to_cpu};
use powbench_report::{FailureInfo, MagnitudeBlock, TrialMetrics, TrialResult, TrialStatus};

/// Configuration for trial execution
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Timed calls per trial
    pub iterations: u64,
    /// Skip linear-cost kernels above this exponent
    pub linear_limit: u32,
    /// Pin the measuring thread to this CPU before the first trial
    pub pin_cpu: Option<usize>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            iterations: 1_000_000,
            linear_limit: 2_000,
            pin_cpu: None,
        }
    }
}

/// Execute planned trials and produce result blocks
pub struct Executor<C: Clock = MonotonicClock> {
    config: ExecutionConfig,
    harness: Harness<C>,
}

impl Executor {
    /// Executor timing with the system monotonic clock
    pub fn new(config: ExecutionConfig) -> Self {
        Self::with_clock(config, MonotonicClock)
    }
}

impl<C: Clock> Executor<C> {
    /// Executor timing with the given clock
    pub fn with_clock(config: ExecutionConfig, clock: C) -> Self {
        Self {
            config,
            harness: Harness::with_clock(clock),
        }
    }

    /// Execute every block of the plan in order.
    ///
    /// Each finished block is passed to `sink` before the next block starts.
    /// An error from the sink stops the run; measurement failures do not.
    pub fn execute<F>(
        &self,
        plan: &ExecutionPlan,
        mut sink: F,
    ) -> anyhow::Result<Vec<MagnitudeBlock>>
    where
        F: FnMut(&MagnitudeBlock) -> anyhow::Result<()>,
    {
        if let Some(cpu) = self.config.pin_cpu {
            match pin_to_cpu(cpu) {
                Ok(()) => tracing::debug!(cpu, "pinned measuring thread"),
                Err(e) => tracing::warn!(cpu, error = %e, "failed to pin measuring thread"),
            }
        }

        let mut blocks = Vec::with_capacity(plan.blocks.len());
        for planned in &plan.blocks {
            let block = self.execute_block(planned);
            sink(&block)?;
            blocks.push(block);
        }
        Ok(blocks)
    }

    /// Execute all trials of one block
    fn execute_block(&self, planned: &PlannedBlock) -> MagnitudeBlock {
        tracing::debug!(
            base = planned.base,
            exponent = planned.exponent,
            "starting block"
        );

        let results = planned
            .trials
            .iter()
            .map(|t| self.execute_single(planned, t))
            .collect();

        MagnitudeBlock {
            base: planned.base,
            exponent: planned.exponent,
            results,
        }
    }

    /// Execute a single trial
    fn execute_single(&self, block: &PlannedBlock, planned: &PlannedTrial) -> TrialResult {
        let kernel = planned.kernel;
        let mut result = TrialResult {
            kernel_id: kernel.id.to_string(),
            kernel_name: kernel.name.to_string(),
            complexity: kernel.complexity.as_str().to_string(),
            status: TrialStatus::Skipped,
            metrics: None,
            skip_reason: None,
            failure: None,
        };

        if let Some(reason) = &planned.skip_reason {
            tracing::debug!(kernel = kernel.id, exponent = block.exponent, %reason, "skipped");
            result.skip_reason = Some(reason.clone());
            return result;
        }

        let measured = Trial::new(kernel, block.base, block.exponent, self.config.iterations)
            .and_then(|trial| self.harness.run(&trial));

        match measured {
            Ok(m) => {
                result.status = TrialStatus::Measured;
                result.metrics = Some(TrialMetrics {
                    mean_ns: m.mean_ns,
                    truncated_ns: m.truncated_ns(),
                    elapsed_ns: m.elapsed_ns,
                    iterations: m.iterations,
                    sample: m.sample,
                });
            }
            Err(e) => {
                tracing::error!(
                    kernel = kernel.id,
                    exponent = block.exponent,
                    error = %e,
                    "measurement abandoned"
                );
                result.status = TrialStatus::Failed;
                result.failure = Some(FailureInfo {
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                });
            }
        }

        result
    }
}
