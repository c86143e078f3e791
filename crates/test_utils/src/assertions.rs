//! Custom Test Assertions
//!
//! Cost-per-unit values may legitimately be NaN or ±Infinity, which plain
//! `assert_eq!` and tolerance checks mishandle.

use domain_billing::{PeerStatistics, ProviderCount};

/// Asserts that two costs are equal within a relative tolerance
///
/// NaN equals NaN here, and infinities must match exactly.
///
/// # Panics
///
/// Panics if the values differ by more than `tolerance` relative to `expected`.
pub fn assert_cost_approx_eq(actual: f64, expected: f64, tolerance: f64) {
    if expected.is_nan() {
        assert!(actual.is_nan(), "Expected NaN cost, got {actual}");
        return;
    }
    if expected.is_infinite() {
        assert_eq!(actual, expected, "Expected {expected} cost, got {actual}");
        return;
    }

    let diff = (actual - expected).abs();
    let bound = tolerance * expected.abs().max(1.0);
    assert!(
        diff <= bound,
        "Costs differ by more than tolerance: actual={actual}, expected={expected}, diff={diff}, tolerance={tolerance}"
    );
}

/// Asserts that two peer statistics agree up to floating-point rounding
pub fn assert_peer_statistics_approx_eq(actual: &PeerStatistics, expected: &PeerStatistics) {
    assert_eq!(actual.count, expected.count, "Peer counts differ");
    assert_cost_approx_eq(actual.average_cost_per_unit, expected.average_cost_per_unit, 1e-9);
    assert_cost_approx_eq(actual.min_cost_per_unit, expected.min_cost_per_unit, 1e-9);
    assert_cost_approx_eq(actual.max_cost_per_unit, expected.max_cost_per_unit, 1e-9);
}

/// Asserts that provider counts match, ignoring order
pub fn assert_provider_counts_eq(actual: &[ProviderCount], expected: &[(&str, u64)]) {
    let mut actual: Vec<(String, u64)> = actual
        .iter()
        .map(|c| (c.name.clone(), c.value))
        .collect();
    let mut expected: Vec<(String, u64)> = expected
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect();
    actual.sort();
    expected.sort();

    assert_eq!(actual, expected, "Provider counts differ");
}
