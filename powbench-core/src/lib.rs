#![warn(missing_docs)]
//! powbench Core - Kernels and Timing Harness
//!
//! This crate provides everything needed to time a power kernel:
//! - Three `pow(base, exponent)` kernels registered through `inventory`
//! - A monotonic [`Clock`] with a fallible read and a [`Timer`] over it
//! - The [`Harness`] that amortizes clock overhead over many calls
//! - Typed errors for clock failures and invalid trial configuration

mod clock;
mod error;
mod harness;
pub mod kernels;

pub use clock::{Clock, MonotonicClock, Timer, pin_to_cpu};
pub use error::{ClockError, MeasureError};
pub use harness::{Harness, Measurement, Trial, measure};
pub use kernels::{
    KernelFn, find_kernel, pow_linear, pow_reference, pow_squaring, registered_kernels,
};

/// Asymptotic cost of one kernel call in the exponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Complexity {
    /// Independent of the exponent
    Constant,
    /// Grows with log2 of the exponent
    Logarithmic,
    /// Grows with the exponent
    Linear,
}

impl Complexity {
    /// Big-O label used in listings and reports
    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Constant => "O(1)",
            Complexity::Logarithmic => "O(log n)",
            Complexity::Linear => "O(n)",
        }
    }
}

/// Kernel definition registered via `inventory::submit!`
#[derive(Debug, Clone)]
pub struct KernelDef {
    /// Unique identifier, used for filtering
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Cost class, used to skip expensive kernels at large exponents
    pub complexity: Complexity,
    /// The kernel itself
    pub func: KernelFn,
}

impl KernelDef {
    /// Compute `base^exponent` with this kernel
    #[inline]
    pub fn call(&self, base: f64, exponent: u32) -> f64 {
        (self.func)(base, exponent)
    }
}

inventory::collect!(KernelDef);

/// Anchor to prevent LTO from stripping inventory entries
#[used]
#[doc(hidden)]
pub static REGISTRY_ANCHOR: fn() = || {
    for _ in inventory::iter::<KernelDef> {}
};
