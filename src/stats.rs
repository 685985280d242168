//! Ratio and significance utilities.
//!
//! First-order error propagation for mass ratios and the sigma/relative-error
//! figures the reports print.

use serde::Serialize;

use crate::types::Measurement;

/// A dimensionless ratio with its propagated one-sigma uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ratio {
    pub value: f64,
    pub uncertainty: f64,
}

impl Ratio {
    /// Divides two measurements, propagating their uncertainties to first
    /// order: `σ_r = r * sqrt((σ_a/a)² + (σ_b/b)²)`.
    pub fn of(numerator: Measurement, denominator: Measurement) -> Self {
        let value = numerator.value / denominator.value;
        let uncertainty = value
            * numerator
                .relative_uncertainty()
                .hypot(denominator.relative_uncertainty());
        Self { value, uncertainty }
    }

    /// Number of standard deviations between this ratio and `predicted`.
    pub fn significance(&self, predicted: f64) -> f64 {
        significance(self.value, predicted, self.uncertainty)
    }
}

/// `|observed - predicted| / uncertainty`.
///
/// A zero uncertainty yields infinity for any nonzero deviation and zero for
/// an exact match.
#[inline]
#[must_use]
pub fn significance(observed: f64, predicted: f64, uncertainty: f64) -> f64 {
    let deviation = (observed - predicted).abs();
    if uncertainty > 0.0 {
        deviation / uncertainty
    } else if deviation > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

/// Calculates relative difference between two values.
#[inline]
#[must_use]
pub fn relative_difference(actual: f64, expected: f64) -> f64 {
    if expected.abs() < f64::EPSILON {
        actual.abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Relative difference expressed in percent.
#[inline]
#[must_use]
pub fn percent_difference(actual: f64, expected: f64) -> f64 {
    relative_difference(actual, expected) * 100.0
}

/// Checks if a significance stays within a sigma threshold.
#[inline]
#[must_use]
pub fn within_sigma(sigma: f64, max_sigma: f64) -> bool {
    sigma.is_finite() && sigma <= max_sigma
}
