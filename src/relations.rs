//! Mass ratio relations checked against a [`MassTable`].
//!
//! Four relations are evaluated:
//!
//! - scale-invariant: `2(m_d/m_u)³ = m_s/m_d`
//! - cube root: `m_d/m_u = ∛10`
//! - simple ratio: `m_s/m_d = 20`
//! - combined: `m_s/m_u = 2 × 10^(4/3)`
//!
//! The last three carry a propagated uncertainty and a significance in sigma.

use serde::Serialize;

use crate::stats::{percent_difference, within_sigma, Ratio};
use crate::types::{MassTable, Quark};

/// Predicted value of the simple ratio `m_s/m_d`.
pub const RATIO_20: f64 = 20.0;

/// `∛10`, the predicted `m_d/m_u`.
#[inline]
pub fn cube_root_of_ten() -> f64 {
    10.0_f64.cbrt()
}

/// `2 × 10^(4/3)`, the predicted `m_s/m_u`.
#[inline]
pub fn combined_prediction() -> f64 {
    2.0 * 10.0_f64.powf(4.0 / 3.0)
}

/// Relations that carry a significance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    CubeRoot,
    Ratio20,
    Combined,
}

impl Relation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::CubeRoot => "m_d/m_u = ∛10",
            Self::Ratio20 => "m_s/m_d = 20",
            Self::Combined => "m_s/m_u = 2×10^(4/3)",
        }
    }
}

/// Outcome of the scale-invariant relation `2(m_d/m_u)³ = m_s/m_d`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleInvariantResult {
    pub md_over_mu: f64,
    pub ms_over_md: f64,
    /// `2(m_d/m_u)³`
    pub left_side: f64,
    /// `m_s/m_d`
    pub right_side: f64,
    pub deviation: f64,
    /// Deviation as a percentage of the right side.
    pub relative_error_pct: f64,
}

/// A measured ratio compared with its prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioResult {
    pub relation: Relation,
    pub ratio: Ratio,
    pub predicted: f64,
    pub deviation: f64,
    /// Deviation as a percentage of the prediction.
    pub relative_error_pct: f64,
    /// Deviation in units of the propagated uncertainty.
    pub sigma: f64,
}

impl RatioResult {
    fn compare(relation: Relation, ratio: Ratio, predicted: f64) -> Self {
        let result = Self {
            relation,
            ratio,
            predicted,
            deviation: (ratio.value - predicted).abs(),
            relative_error_pct: percent_difference(ratio.value, predicted),
            sigma: ratio.significance(predicted),
        };
        log::debug!(
            "{}: ratio={:.6} ± {:.6}, predicted={:.6}, sigma={:.4}",
            relation.label(),
            ratio.value,
            ratio.uncertainty,
            predicted,
            result.sigma
        );
        result
    }
}

/// Checks `2(m_d/m_u)³ = m_s/m_d`.
pub fn scale_invariant_relation(masses: &MassTable) -> ScaleInvariantResult {
    let md_over_mu = masses.get(Quark::Down).value / masses.get(Quark::Up).value;
    let ms_over_md = masses.get(Quark::Strange).value / masses.get(Quark::Down).value;

    let left_side = 2.0 * md_over_mu.powi(3);
    let right_side = ms_over_md;
    let deviation = (left_side - right_side).abs();
    let relative_error_pct = deviation / right_side * 100.0;

    log::debug!(
        "scale-invariant: 2(m_d/m_u)³={left_side:.6}, m_s/m_d={right_side:.6}, deviation={deviation:.6}"
    );

    ScaleInvariantResult {
        md_over_mu,
        ms_over_md,
        left_side,
        right_side,
        deviation,
        relative_error_pct,
    }
}

/// Checks `m_d/m_u = ∛10`.
pub fn cube_root_relation(masses: &MassTable) -> RatioResult {
    let ratio = Ratio::of(masses.get(Quark::Down), masses.get(Quark::Up));
    RatioResult::compare(Relation::CubeRoot, ratio, cube_root_of_ten())
}

/// Checks `m_s/m_d = 20`.
pub fn simple_ratio_relation(masses: &MassTable) -> RatioResult {
    let ratio = Ratio::of(masses.get(Quark::Strange), masses.get(Quark::Down));
    RatioResult::compare(Relation::Ratio20, ratio, RATIO_20)
}

/// Checks `m_s/m_u = 2 × 10^(4/3)`.
pub fn combined_relation(masses: &MassTable) -> RatioResult {
    let ratio = Ratio::of(masses.get(Quark::Strange), masses.get(Quark::Up));
    RatioResult::compare(Relation::Combined, ratio, combined_prediction())
}

/// All four relations evaluated against one mass table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationSummary {
    pub masses: MassTable,
    pub scale_invariant: ScaleInvariantResult,
    pub cube_root: RatioResult,
    pub ratio_20: RatioResult,
    pub combined: RatioResult,
}

impl ValidationSummary {
    pub fn evaluate(masses: &MassTable) -> Self {
        Self {
            masses: masses.clone(),
            scale_invariant: scale_invariant_relation(masses),
            cube_root: cube_root_relation(masses),
            ratio_20: simple_ratio_relation(masses),
            combined: combined_relation(masses),
        }
    }

    /// The sigma-carrying results, in summary order.
    pub const fn sigma_results(&self) -> [&RatioResult; 3] {
        [&self.ratio_20, &self.cube_root, &self.combined]
    }

    /// Largest significance among the sigma-carrying relations.
    pub fn max_sigma(&self) -> f64 {
        self.sigma_results()
            .iter()
            .map(|r| r.sigma)
            .fold(0.0, f64::max)
    }

    /// Judges each relation against a sigma threshold.
    pub fn verdicts(&self, max_sigma: f64) -> Vec<Verdict> {
        self.sigma_results()
            .iter()
            .map(|r| {
                if within_sigma(r.sigma, max_sigma) {
                    Verdict::Pass {
                        relation: r.relation,
                        sigma: r.sigma,
                    }
                } else {
                    Verdict::Fail {
                        relation: r.relation,
                        sigma: r.sigma,
                    }
                }
            })
            .collect()
    }
}

/// Result of holding a relation to a sigma threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Verdict {
    /// Within threshold.
    Pass { relation: Relation, sigma: f64 },
    /// Beyond threshold.
    Fail { relation: Relation, sigma: f64 },
}

impl Verdict {
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass { .. })
    }

    pub const fn relation(&self) -> Relation {
        match self {
            Self::Pass { relation, .. } | Self::Fail { relation, .. } => *relation,
        }
    }
}
