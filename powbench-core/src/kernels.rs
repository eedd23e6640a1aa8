//! Power Kernels
//!
//! Three strategies for `base^exponent` over `f64` with a non-negative integer
//! exponent. The exponent is a `u32`, so negative exponents cannot reach a
//! kernel; every kernel returns exactly `1.0` for a zero exponent.
//!
//! Both hand-written kernels are loops and use constant stack space for any
//! exponent. Kernels register themselves with `inventory`; see
//! [`registered_kernels`].

use crate::{Complexity, KernelDef};

/// Signature shared by all kernels
pub type KernelFn = fn(f64, u32) -> f64;

/// Multiply `base` into an accumulator `exponent` times. O(n).
#[inline]
pub fn pow_linear(base: f64, exponent: u32) -> f64 {
    let mut acc = 1.0;
    for _ in 0..exponent {
        acc *= base;
    }
    acc
}

/// Exponentiation by squaring. O(log n).
///
/// Parity is tested before each floor halving of the exponent.
#[inline]
pub fn pow_squaring(base: f64, exponent: u32) -> f64 {
    let mut acc = 1.0;
    let mut square = base;
    let mut n = exponent;
    while n > 0 {
        if n % 2 == 1 {
            acc *= square;
        }
        n /= 2;
        if n > 0 {
            square *= square;
        }
    }
    acc
}

/// Platform `pow`.
#[inline]
pub fn pow_reference(base: f64, exponent: u32) -> f64 {
    base.powf(f64::from(exponent))
}

inventory::submit! {
    KernelDef {
        id: "linear",
        name: "linear",
        complexity: Complexity::Linear,
        func: pow_linear,
    }
}

inventory::submit! {
    KernelDef {
        id: "reference",
        name: "libm",
        complexity: Complexity::Constant,
        func: pow_reference,
    }
}

inventory::submit! {
    KernelDef {
        id: "squaring",
        name: "squaring",
        complexity: Complexity::Logarithmic,
        func: pow_squaring,
    }
}

/// All registered kernels, sorted by id
//
// Lives beside the submissions so that linking the registry also links them.
pub fn registered_kernels() -> Vec<&'static KernelDef> {
    let mut kernels: Vec<_> = inventory::iter::<KernelDef>.into_iter().collect();
    kernels.sort_by_key(|k| k.id);
    kernels
}

/// Look up a registered kernel by id
pub fn find_kernel(id: &str) -> Option<&'static KernelDef> {
    inventory::iter::<KernelDef>.into_iter().find(|k| k.id == id)
}
