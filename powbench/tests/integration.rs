//! Integration tests for powbench
//!
//! These tests exercise the public API end to end: kernels, the timing
//! harness, planning, execution and report generation.

use powbench::{
    Complexity, ExecutionConfig, Executor, Growth, MeasureError, Schedule, TrialStatus,
    build_plan, build_report, find_kernel, generate_csv_report, generate_json_report, measure,
    pow_linear, pow_reference, pow_squaring, registered_kernels,
};

fn rel_close(a: f64, b: f64, tol: f64) -> bool {
    a == b || ((a - b) / b).abs() <= tol
}

/// All three kernels agree for small exponents
#[test]
fn test_kernels_agree() {
    for base in [0.5, 1.01, 2.0, 3.0, -1.5] {
        for exponent in 0..=40 {
            let reference = pow_reference(base, exponent);
            assert!(rel_close(pow_linear(base, exponent), reference, 1e-9));
            assert!(rel_close(pow_squaring(base, exponent), reference, 1e-9));
        }
    }
}

/// Exponent zero yields exactly one
#[test]
fn test_exponent_zero() {
    for base in [0.0, 2.0, 1.000_000_001, -7.0] {
        assert_eq!(pow_linear(base, 0), 1.0);
        assert_eq!(pow_squaring(base, 0), 1.0);
        assert_eq!(pow_reference(base, 0), 1.0);
    }
}

/// Odd and even exponents around a power of two
#[test]
fn test_known_values() {
    assert_eq!(pow_squaring(2.0, 10), 1024.0);
    assert_eq!(pow_linear(2.0, 10), 1024.0);
    assert_eq!(pow_squaring(2.0, 7), 128.0);
    assert_eq!(pow_squaring(2.0, 8), 256.0);
    assert_eq!(pow_squaring(3.0, 5), 243.0);
}

/// Measuring returns a non-negative average and a correct sample
#[test]
fn test_measure_small_trial() {
    let m = measure(1.01, 5, pow_squaring, 1_000).unwrap();

    assert!(m.mean_ns >= 0.0);
    assert_eq!(m.iterations, 1_000);
    assert!(rel_close(m.sample, 1.01f64.powi(5), 1e-12));
    assert!(m.truncated_ns() as f64 <= m.mean_ns);
}

/// Closures are accepted as kernels
#[test]
fn test_measure_closure() {
    let m = measure(2.0, 3, |b, e| b * f64::from(e), 10).unwrap();
    assert_eq!(m.sample, 6.0);
}

/// A zero iteration count is a configuration error
#[test]
fn test_zero_iterations() {
    let err = measure(2.0, 3, pow_linear, 0).unwrap_err();
    assert!(matches!(err, MeasureError::InvalidConfiguration(_)));
    assert_eq!(err.kind(), "invalid_configuration");
}

/// The three kernels are registered with their cost classes
#[test]
fn test_registry() {
    let ids: Vec<_> = registered_kernels().iter().map(|k| k.id).collect();
    assert_eq!(ids, ["linear", "reference", "squaring"]);

    assert_eq!(find_kernel("linear").unwrap().complexity, Complexity::Linear);
    assert_eq!(find_kernel("squaring").unwrap().complexity, Complexity::Logarithmic);
    assert_eq!(find_kernel("reference").unwrap().name, "libm");
    assert!(find_kernel("cubic").is_none());
}

/// Plan, execute and report a short sweep
#[test]
fn test_end_to_end_sweep() {
    let schedule = Schedule::new(1.000_000_001, None, 1, 1_000, Growth::Decade).unwrap();
    assert_eq!(schedule.exponents, vec![1, 10, 100, 1_000]);

    let config = ExecutionConfig {
        iterations: 50,
        linear_limit: 100,
        pin_cpu: None,
    };
    let plan = build_plan(registered_kernels(), None, &schedule, config.linear_limit);
    assert_eq!(plan.measured_trials(), 11);

    let mut streamed = 0;
    let blocks = Executor::new(config.clone())
        .execute(&plan, |_| {
            streamed += 1;
            Ok(())
        })
        .unwrap();
    assert_eq!(streamed, 4);

    let report = build_report(blocks, &config, 1.0);
    assert_eq!(report.summary.total_trials, 12);
    assert_eq!(report.summary.measured, 11);
    assert_eq!(report.summary.skipped, 1);
    assert!(!report.summary.has_failures());

    let last = report.blocks.last().unwrap();
    assert_eq!(last.exponent, 1_000);
    let linear = last.results.iter().find(|r| r.kernel_id == "linear").unwrap();
    assert_eq!(linear.status, TrialStatus::Skipped);

    let json = generate_json_report(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["blocks"].as_array().unwrap().len(), 4);
    assert_eq!(value["summary"]["skipped"], 1);

    let csv = generate_csv_report(&report);
    assert_eq!(csv.lines().count(), 1 + 12);
}
