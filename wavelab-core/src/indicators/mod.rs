//! Indicators computed alongside wave detection for display.
//!
//! Indicators never feed the detector; they are shown next to its output.

pub mod rsi;

pub use rsi::{rsi, RsiConfig, RsiSmoothing};

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}
