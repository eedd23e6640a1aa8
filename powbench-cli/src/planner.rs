//! Run Planner
//!
//! Builds the execution plan: which exponents to visit and, for each one,
//! which kernels to measure or skip.
//!
//! - Exponents come from an explicit list or from decade/alternating growth
//! - Kernels are filtered by a regex on their id and listed in id order
//! - Linear-cost kernels are planned as skipped above the linear limit

use crate::config::Growth;
use powbench_core::{Complexity, KernelDef, MeasureError};

/// Exponent schedule
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    /// Base shared by every trial
    pub base: f64,
    /// Exponents in visiting order
    pub exponents: Vec<u32>,
}

/// Generate exponents from `start` up to and including `max`
pub fn generate_exponents(start: u32, max: u32, growth: Growth) -> Result<Vec<u32>, MeasureError> {
    if start == 0 {
        return Err(MeasureError::invalid(
            "start exponent must be positive for a generated schedule",
        ));
    }
    if start > max {
        return Err(MeasureError::invalid(format!(
            "start exponent {} exceeds max exponent {}",
            start, max
        )));
    }

    let max = u64::from(max);
    let mut exponents = Vec::new();
    let mut decade = u64::from(start);

    while decade <= max {
        exponents.push(decade as u32);
        if growth == Growth::Alternating {
            let between = decade * 3;
            if between <= max {
                exponents.push(between as u32);
            }
        }
        decade *= 10;
    }

    Ok(exponents)
}

impl Schedule {
    /// Build a schedule, preferring an explicit exponent list over growth
    pub fn new(
        base: f64,
        explicit: Option<&[u32]>,
        start: u32,
        max: u32,
        growth: Growth,
    ) -> Result<Self, MeasureError> {
        let exponents = match explicit {
            Some(list) => list.to_vec(),
            None => generate_exponents(start, max, growth)?,
        };

        if exponents.is_empty() {
            return Err(MeasureError::invalid("exponent schedule is empty"));
        }
        if !base.is_finite() {
            return Err(MeasureError::invalid(format!("base {} is not finite", base)));
        }

        Ok(Self { base, exponents })
    }
}

/// One kernel within a planned block
#[derive(Debug, Clone)]
pub struct PlannedTrial {
    /// Kernel to run
    pub kernel: &'static KernelDef,
    /// Set when the kernel will not be measured
    pub skip_reason: Option<String>,
}

/// All kernels planned for one exponent
#[derive(Debug, Clone)]
pub struct PlannedBlock {
    /// Base
    pub base: f64,
    /// Exponent
    pub exponent: u32,
    /// Kernels in id order
    pub trials: Vec<PlannedTrial>,
}

/// Execution plan
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    /// Blocks in visiting order
    pub blocks: Vec<PlannedBlock>,
}

impl ExecutionPlan {
    /// Number of trials that will actually be measured
    pub fn measured_trials(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|b| &b.trials)
            .filter(|t| t.skip_reason.is_none())
            .count()
    }
}

/// Build the execution plan
pub fn build_plan(
    kernels: impl IntoIterator<Item = &'static KernelDef>,
    filter: Option<&regex::Regex>,
    schedule: &Schedule,
    linear_limit: u32,
) -> ExecutionPlan {
    let mut selected: Vec<_> = kernels
        .into_iter()
        .filter(|k| filter.is_none_or(|re| re.is_match(k.id)))
        .collect();

    // Sort by id for deterministic order
    selected.sort_by_key(|k| k.id);

    let blocks = schedule
        .exponents
        .iter()
        .map(|&exponent| PlannedBlock {
            base: schedule.base,
            exponent,
            trials: selected
                .iter()
                .map(|&kernel| PlannedTrial {
                    kernel,
                    skip_reason: skip_reason(kernel, exponent, linear_limit),
                })
                .collect(),
        })
        .collect();

    ExecutionPlan { blocks }
}

fn skip_reason(kernel: &KernelDef, exponent: u32, linear_limit: u32) -> Option<String> {
    (kernel.complexity == Complexity::Linear && exponent > linear_limit)
        .then(|| format!("exponent {} above linear limit {}", exponent, linear_limit))
}
