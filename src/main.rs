//! quark-ratios: CLI entry point.
//!
//! Validates light quark mass ratio relations against a mass table.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use serde::Serialize;

use quark_ratios::relations::{ValidationSummary, Verdict};
use quark_ratios::report::run_ratio_validation;
use quark_ratios::types::{load_mass_table_file, MassTable};

#[derive(Parser)]
#[command(name = "quark-ratios")]
#[command(about = "Validate light quark mass ratio relations against FLAG averages")]
#[command(version)]
struct Cli {
    /// Mass table YAML file (defaults to the built-in FLAG 2024 values).
    #[arg(short, long)]
    masses: Option<PathBuf>,

    /// Print results as JSON instead of the text report.
    #[arg(long)]
    json: bool,

    /// Exit with status 1 if any relation deviates by more than this many sigma.
    #[arg(long, value_name = "SIGMA", value_parser = parse_sigma)]
    max_sigma: Option<f64>,
}

fn parse_sigma(s: &str) -> Result<f64, String> {
    let sigma: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if sigma.is_finite() && sigma >= 0.0 {
        Ok(sigma)
    } else {
        Err(format!("sigma threshold must be a non-negative number, got {s}"))
    }
}

/// JSON document printed with `--json`.
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    summary: &'a ValidationSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    verdicts: Option<&'a [Verdict]>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let masses = match &cli.masses {
        Some(path) => load_mass_table_file(path)
            .with_context(|| format!("Failed to load mass table: {}", path.display()))?,
        None => MassTable::flag_2024(),
    };
    log::info!("Validating against {} at {}", masses.source, masses.scale);

    let mut stdout = io::stdout().lock();

    let summary = if cli.json {
        ValidationSummary::evaluate(&masses)
    } else {
        run_ratio_validation(&mut stdout, &masses).context("Failed to write report")?
    };
    let verdicts = cli.max_sigma.map(|max| summary.verdicts(max));

    if cli.json {
        let report = JsonReport {
            summary: &summary,
            verdicts: verdicts.as_deref(),
        };
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
    }

    let failed = match (cli.max_sigma, &verdicts) {
        (Some(max_sigma), Some(verdicts)) => {
            if !cli.json {
                write_verdicts(&mut stdout, verdicts, max_sigma)
                    .context("Failed to write verdict")?;
            }
            verdicts.iter().any(|v| !v.is_pass())
        }
        _ => false,
    };

    stdout.flush()?;
    drop(stdout);

    if failed {
        std::process::exit(1);
    }

    Ok(())
}

fn write_verdicts<W: Write>(
    out: &mut W,
    verdicts: &[Verdict],
    max_sigma: f64,
) -> io::Result<()> {
    writeln!(out, "{}", format!("Verdict at {max_sigma:.2}σ").bold())?;

    for verdict in verdicts {
        match verdict {
            Verdict::Pass { relation, sigma } => {
                writeln!(out, "  {} {} ({sigma:.2}σ)", "✓".green(), relation.label())?;
            }
            Verdict::Fail { relation, sigma } => {
                writeln!(
                    out,
                    "  {} {} ({sigma:.2}σ)",
                    "✗".red(),
                    relation.label().red()
                )?;
            }
        }
    }

    let passed = verdicts.iter().filter(|v| v.is_pass()).count();
    let failed = verdicts.len() - passed;

    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(70))?;
    if failed == 0 {
        writeln!(
            out,
            "  {} {} relations within {max_sigma:.2}σ",
            "PASS".green(),
            passed.to_string().green()
        )?;
    } else {
        writeln!(
            out,
            "  {} {} within, {} beyond {max_sigma:.2}σ",
            "FAIL".red(),
            passed,
            failed.to_string().red()
        )?;
    }
    writeln!(out, "{}", "=".repeat(70))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn verdict_block_lists_each_relation() {
        colored::control::set_override(false);
        let summary = ValidationSummary::evaluate(&MassTable::flag_2024());
        let verdicts = summary.verdicts(0.2);

        let mut buf = Vec::new();
        write_verdicts(&mut buf, &verdicts, 0.2).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Verdict at 0.20σ");
        assert_eq!(lines[1], "  ✗ m_s/m_d = 20 (0.32σ)");
        assert_eq!(lines[2], "  ✗ m_d/m_u = ∛10 (0.28σ)");
        assert_eq!(lines[3], "  ✓ m_s/m_u = 2×10^(4/3) (0.14σ)");
        assert_eq!(lines[6], "  FAIL 1 within, 2 beyond 0.20σ");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn verdict_write_error_is_returned() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::ErrorKind::BrokenPipe.into())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let verdicts = ValidationSummary::evaluate(&MassTable::flag_2024()).verdicts(1.0);
        let err = write_verdicts(&mut Closed, &verdicts, 1.0).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn negative_and_nan_thresholds_are_rejected() {
        assert!(parse_sigma("-1").is_err());
        assert!(parse_sigma("NaN").is_err());
        assert!(parse_sigma("inf").is_err());
        assert_eq!(parse_sigma("1.5"), Ok(1.5));
    }
}
