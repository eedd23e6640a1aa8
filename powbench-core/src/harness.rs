//! Timing Harness
//!
//! Runs a kernel a fixed number of times between two monotonic clock reads and
//! reports the average cost per call. The loop exists to amortize the fixed
//! cost of the clock reads and the call itself; a single extra call after the
//! timed loop supplies the sample result shown next to the latency.

use crate::KernelDef;
use crate::clock::{Clock, MonotonicClock, Timer};
use crate::error::MeasureError;
use std::hint::black_box;

/// Result of one measured trial
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Average nanoseconds per call (floating division)
    pub mean_ns: f64,
    /// Total nanoseconds spent in the timed loop
    pub elapsed_ns: u64,
    /// Number of timed calls
    pub iterations: u64,
    /// Result of one untimed call with the same inputs
    pub sample: f64,
}

impl Measurement {
    /// Average nanoseconds per call, truncated toward zero; 0 for zero iterations
    pub fn truncated_ns(&self) -> u64 {
        self.elapsed_ns.checked_div(self.iterations).unwrap_or(0)
    }
}

/// One validated (kernel, base, exponent, iterations) configuration
#[derive(Debug, Clone, Copy)]
pub struct Trial<'k> {
    kernel: &'k KernelDef,
    base: f64,
    exponent: u32,
    iterations: u64,
}

impl<'k> Trial<'k> {
    /// Build a trial, rejecting a zero iteration count
    pub fn new(
        kernel: &'k KernelDef,
        base: f64,
        exponent: u32,
        iterations: u64,
    ) -> Result<Self, MeasureError> {
        validate_iterations(iterations)?;
        Ok(Self {
            kernel,
            base,
            exponent,
            iterations,
        })
    }

    /// Kernel under test
    pub fn kernel(&self) -> &'k KernelDef {
        self.kernel
    }

    /// Base value
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Exponent
    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Timed calls
    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}

fn validate_iterations(iterations: u64) -> Result<(), MeasureError> {
    if iterations == 0 {
        return Err(MeasureError::invalid(
            "iteration count must be greater than zero",
        ));
    }
    Ok(())
}

/// The timing harness, generic over its clock source
#[derive(Debug, Clone, Default)]
pub struct Harness<C: Clock = MonotonicClock> {
    clock: C,
}

impl Harness {
    /// Harness reading the system monotonic clock
    pub fn new() -> Self {
        Self {
            clock: MonotonicClock,
        }
    }
}

impl<C: Clock> Harness<C> {
    /// Harness reading the given clock
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Measure a prepared trial
    pub fn run(&self, trial: &Trial<'_>) -> Result<Measurement, MeasureError> {
        self.measure(
            trial.base,
            trial.exponent,
            trial.kernel.func,
            trial.iterations,
        )
    }

    /// Call `kernel(base, exponent)` `iterations` times under the clock.
    ///
    /// A zero iteration count fails before the clock is read or the kernel is
    /// called. A clock failure at either end of the loop aborts the
    /// measurement.
    pub fn measure<K>(
        &self,
        base: f64,
        exponent: u32,
        kernel: K,
        iterations: u64,
    ) -> Result<Measurement, MeasureError>
    where
        K: Fn(f64, u32) -> f64,
    {
        validate_iterations(iterations)?;

        let timer = Timer::start(&self.clock)?;

        for _ in 0..iterations {
            black_box(kernel(black_box(base), black_box(exponent)));
        }

        let elapsed_ns = timer.stop()?;

        let sample = kernel(base, exponent);
        let mean_ns = elapsed_ns as f64 / iterations as f64;

        tracing::trace!(base, exponent, iterations, elapsed_ns, mean_ns, "measured");

        Ok(Measurement {
            mean_ns,
            elapsed_ns,
            iterations,
            sample,
        })
    }
}

/// Measure `kernel(base, exponent)` with the system monotonic clock.
pub fn measure<K>(
    base: f64,
    exponent: u32,
    kernel: K,
    iterations: u64,
) -> Result<Measurement, MeasureError>
where
    K: Fn(f64, u32) -> f64,
{
    Harness::new().measure(base, exponent, kernel, iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClockError;
    use crate::kernels::{pow_linear, pow_reference, pow_squaring};
    use crate::{Complexity, registered_kernels};
    use std::cell::Cell;

    /// Returns scripted timestamps and counts reads
    struct ScriptedClock {
        ticks: Vec<Result<u64, ()>>,
        reads: Cell<usize>,
    }

    impl ScriptedClock {
        fn new(ticks: Vec<Result<u64, ()>>) -> Self {
            Self {
                ticks,
                reads: Cell::new(0),
            }
        }
    }

    impl Clock for ScriptedClock {
        fn now_ns(&self) -> Result<u64, ClockError> {
            let i = self.reads.get();
            self.reads.set(i + 1);
            match self.ticks.get(i) {
                Some(Ok(ns)) => Ok(*ns),
                _ => Err(ClockError::Read(std::io::Error::other("scripted failure"))),
            }
        }
    }

    #[test]
    fn test_measure_validity() {
        let m = measure(1.01, 5, pow_squaring, 1000).unwrap();
        assert!(m.mean_ns >= 0.0);
        assert_eq!(m.iterations, 1000);
        let expected = pow_reference(1.01, 5);
        assert!((m.sample - expected).abs() <= 1e-9 * expected);
    }

    #[test]
    fn test_zero_iterations_rejected_without_clock_read() {
        let clock = ScriptedClock::new(vec![Ok(0), Ok(10)]);
        let calls = Cell::new(0u64);
        let harness = Harness::with_clock(&clock);

        let err = harness
            .measure(
                2.0,
                3,
                |b, e| {
                    calls.set(calls.get() + 1);
                    pow_linear(b, e)
                },
                0,
            )
            .unwrap_err();

        assert!(matches!(err, MeasureError::InvalidConfiguration(_)));
        assert_eq!(clock.reads.get(), 0);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_kernel_called_iterations_plus_one() {
        let calls = Cell::new(0u64);
        let m = measure(
            2.0,
            3,
            |b, e| {
                calls.set(calls.get() + 1);
                pow_linear(b, e)
            },
            10,
        )
        .unwrap();

        assert_eq!(calls.get(), 11);
        assert_eq!(m.sample, 8.0);
    }

    #[test]
    fn test_floating_average() {
        let harness = Harness::with_clock(ScriptedClock::new(vec![Ok(2_000), Ok(3_500)]));
        let m = harness.measure(2.0, 4, pow_squaring, 1000).unwrap();

        assert_eq!(m.elapsed_ns, 1_500);
        assert_eq!(m.mean_ns, 1.5);
        assert_eq!(m.truncated_ns(), 1);
        assert_eq!(m.sample, 16.0);
    }

    #[test]
    fn test_start_clock_failure() {
        let calls = Cell::new(0u64);
        let harness = Harness::with_clock(ScriptedClock::new(vec![Err(())]));
        let err = harness
            .measure(
                2.0,
                3,
                |b, e| {
                    calls.set(calls.get() + 1);
                    pow_linear(b, e)
                },
                100,
            )
            .unwrap_err();

        assert!(matches!(err, MeasureError::Clock(_)));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_end_clock_failure() {
        let harness = Harness::with_clock(ScriptedClock::new(vec![Ok(0), Err(())]));
        let err = harness.measure(2.0, 3, pow_linear, 100).unwrap_err();

        assert!(matches!(err, MeasureError::Clock(_)));
        assert_eq!(err.kind(), "clock");
    }

    #[test]
    fn test_trial_rejects_zero_iterations() {
        let kernel = registered_kernels()[0];
        assert!(Trial::new(kernel, 2.0, 3, 0).is_err());
    }

    #[test]
    fn test_run_trial() {
        let kernel = registered_kernels()
            .into_iter()
            .find(|k| k.complexity == Complexity::Logarithmic)
            .unwrap();
        let trial = Trial::new(kernel, 2.0, 8, 50).unwrap();
        let m = Harness::new().run(&trial).unwrap();

        assert_eq!(m.sample, 256.0);
        assert_eq!(m.iterations, 50);
    }

    #[test]
    fn test_truncated_zero_iterations() {
        let m = Measurement {
            mean_ns: 0.0,
            elapsed_ns: 500,
            iterations: 0,
            sample: 1.0,
        };
        assert_eq!(m.truncated_ns(), 0);
    }
}
