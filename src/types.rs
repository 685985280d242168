//! Common types for quark-ratios.
//!
//! Defines the light quark mass table, its YAML file format, and the rows of
//! the RG-evolved scale table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Light quark flavours covered by the mass table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quark {
    Up,
    Down,
    Strange,
}

impl Quark {
    /// Short symbol used in mass table files (`u`, `d`, `s`).
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Up => "u",
            Self::Down => "d",
            Self::Strange => "s",
        }
    }
}

impl fmt::Display for Quark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Quark {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "u" | "up" => Ok(Self::Up),
            "d" | "down" => Ok(Self::Down),
            "s" | "strange" => Ok(Self::Strange),
            other => Err(Error::UnknownQuark(other.to_string())),
        }
    }
}

/// A mass with its one-sigma uncertainty, both in MeV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Central value (MeV).
    pub value: f64,
    /// One-sigma uncertainty (MeV).
    pub uncertainty: f64,
}

impl Measurement {
    pub const fn new(value: f64, uncertainty: f64) -> Self {
        Self { value, uncertainty }
    }

    /// Uncertainty as a fraction of the central value.
    #[inline]
    pub fn relative_uncertainty(&self) -> f64 {
        self.uncertainty / self.value
    }

    fn validate(self, quark: Quark) -> Result<Self> {
        if !self.value.is_finite() || self.value <= 0.0 {
            return Err(Error::InvalidMass {
                quark,
                value: self.value,
            });
        }
        if !self.uncertainty.is_finite() || self.uncertainty <= 0.0 {
            return Err(Error::InvalidUncertainty {
                quark,
                value: self.uncertainty,
            });
        }
        Ok(self)
    }
}

/// Source label of the built-in table.
pub const FLAG_2024_SOURCE: &str = "FLAG 2024";

/// Renormalization scale at which the built-in table is quoted (MS-bar).
pub const REFERENCE_SCALE: &str = "μ = 2 GeV";

/// FLAG 2024 light quark masses at μ = 2 GeV (MS-bar), in MeV.
pub const FLAG_2024_MASSES: [(Quark, Measurement); 3] = [
    (Quark::Up, Measurement::new(2.16, 0.07)),
    (Quark::Down, Measurement::new(4.70, 0.07)),
    (Quark::Strange, Measurement::new(93.5, 0.7)),
];

/// Light quark masses at a single energy scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MassTable {
    /// Where the values come from (e.g. "FLAG 2024").
    pub source: String,
    /// Scale the masses are quoted at (e.g. "μ = 2 GeV").
    pub scale: String,
    pub up: Measurement,
    pub down: Measurement,
    pub strange: Measurement,
}

impl MassTable {
    /// The built-in FLAG 2024 table.
    pub fn flag_2024() -> Self {
        let [(_, up), (_, down), (_, strange)] = FLAG_2024_MASSES;
        Self {
            source: FLAG_2024_SOURCE.to_string(),
            scale: REFERENCE_SCALE.to_string(),
            up,
            down,
            strange,
        }
    }

    pub const fn get(&self, quark: Quark) -> Measurement {
        match quark {
            Quark::Up => self.up,
            Quark::Down => self.down,
            Quark::Strange => self.strange,
        }
    }
}

impl Default for MassTable {
    fn default() -> Self {
        Self::flag_2024()
    }
}

/// Mass table file structure.
#[derive(Debug, Deserialize)]
pub struct MassTableFile {
    /// Source label printed in the report.
    #[serde(default = "default_source")]
    pub source: String,

    /// Energy scale label printed in the report.
    #[serde(default = "default_scale")]
    pub scale: String,

    /// Masses keyed by quark symbol.
    #[serde(default)]
    pub quarks: BTreeMap<String, Measurement>,
}

fn default_source() -> String {
    "custom".to_string()
}

fn default_scale() -> String {
    REFERENCE_SCALE.to_string()
}

/// Loads a mass table from YAML content.
pub fn load_mass_table(content: &str) -> Result<MassTable> {
    let file: MassTableFile = serde_yaml_ng::from_str(content)?;

    let mut slots: [Option<Measurement>; 3] = [None; 3];
    for (symbol, measurement) in file.quarks {
        let quark: Quark = symbol.parse()?;
        let slot = &mut slots[quark as usize];
        if slot.is_some() {
            return Err(Error::DuplicateQuark(quark));
        }
        *slot = Some(measurement.validate(quark)?);
    }

    let take = |quark: Quark| slots[quark as usize].ok_or(Error::MissingQuark(quark));
    let table = MassTable {
        up: take(Quark::Up)?,
        down: take(Quark::Down)?,
        strange: take(Quark::Strange)?,
        source: file.source,
        scale: file.scale,
    };

    log::debug!(
        "Loaded mass table '{}' at {}: u={:?} d={:?} s={:?}",
        table.source,
        table.scale,
        table.up,
        table.down,
        table.strange
    );

    Ok(table)
}

/// Loads a mass table from a YAML file on disk.
pub fn load_mass_table_file(path: &Path) -> Result<MassTable> {
    let content = std::fs::read_to_string(path)?;
    load_mass_table(&content)
}

/// One energy scale of the RG-evolved ratio table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleRow {
    /// Energy scale (GeV).
    pub energy_gev: f64,
    /// `m_d/m_u` at this scale.
    pub md_over_mu: f64,
    /// `m_s/m_d` at this scale.
    pub ms_over_md: f64,
    /// Predicted combination `2(m_d/m_u)³`.
    pub two_ratio_cubed: f64,
    /// Maximum fractional deviation of the relation at this scale.
    pub max_deviation: f64,
}

impl ScaleRow {
    pub const fn new(
        energy_gev: f64,
        md_over_mu: f64,
        ms_over_md: f64,
        two_ratio_cubed: f64,
        max_deviation: f64,
    ) -> Self {
        Self {
            energy_gev,
            md_over_mu,
            ms_over_md,
            two_ratio_cubed,
            max_deviation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mass_table() {
        let yaml = r#"
source: "PDG 2024"
scale: "μ = 2 GeV"
quarks:
  u: { value: 2.16, uncertainty: 0.07 }
  d: { value: 4.67, uncertainty: 0.07 }
  s: { value: 93.4, uncertainty: 0.8 }
"#;
        let table = load_mass_table(yaml).unwrap();
        assert_eq!(table.source, "PDG 2024");
        assert_eq!(table.down, Measurement::new(4.67, 0.07));
        assert_eq!(table.get(Quark::Strange), Measurement::new(93.4, 0.8));
    }

    #[test]
    fn labels_default_when_omitted() {
        let yaml = r"
quarks:
  up: { value: 2.0, uncertainty: 0.1 }
  down: { value: 4.0, uncertainty: 0.1 }
  strange: { value: 80.0, uncertainty: 1.0 }
";
        let table = load_mass_table(yaml).unwrap();
        assert_eq!(table.source, "custom");
        assert_eq!(table.scale, REFERENCE_SCALE);
    }

    #[test]
    fn missing_quark_is_rejected() {
        let yaml = r"
quarks:
  u: { value: 2.16, uncertainty: 0.07 }
  d: { value: 4.70, uncertainty: 0.07 }
";
        let err = load_mass_table(yaml).unwrap_err();
        assert!(matches!(err, Error::MissingQuark(Quark::Strange)));
    }

    #[test]
    fn unknown_quark_is_rejected() {
        let yaml = r"
quarks:
  c: { value: 1270.0, uncertainty: 20.0 }
";
        let err = load_mass_table(yaml).unwrap_err();
        assert!(matches!(err, Error::UnknownQuark(ref s) if s == "c"));
    }

    #[test]
    fn non_positive_mass_is_rejected() {
        let yaml = r"
quarks:
  u: { value: 0.0, uncertainty: 0.07 }
  d: { value: 4.70, uncertainty: 0.07 }
  s: { value: 93.5, uncertainty: 0.7 }
";
        let err = load_mass_table(yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidMass { quark: Quark::Up, .. }));
    }

    #[test]
    fn negative_uncertainty_is_rejected() {
        let yaml = r"
quarks:
  u: { value: 2.16, uncertainty: 0.07 }
  d: { value: 4.70, uncertainty: -0.07 }
  s: { value: 93.5, uncertainty: 0.7 }
";
        let err = load_mass_table(yaml).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidUncertainty {
                quark: Quark::Down,
                ..
            }
        ));
    }

    #[test]
    fn zero_uncertainty_is_rejected() {
        let yaml = r"
quarks:
  u: { value: 2.16, uncertainty: 0.0 }
  d: { value: 4.70, uncertainty: 0.07 }
  s: { value: 93.5, uncertainty: 0.7 }
";
        let err = load_mass_table(yaml).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidUncertainty {
                quark: Quark::Up,
                ..
            }
        ));
    }

    #[test]
    fn symbol_and_alias_for_same_quark_are_rejected() {
        let yaml = r"
quarks:
  u: { value: 2.16, uncertainty: 0.07 }
  up: { value: 9.99, uncertainty: 0.07 }
  d: { value: 4.70, uncertainty: 0.07 }
  s: { value: 93.5, uncertainty: 0.7 }
";
        let err = load_mass_table(yaml).unwrap_err();
        assert!(matches!(err, Error::DuplicateQuark(Quark::Up)));
    }

    #[test]
    fn flag_2024_defaults() {
        let table = MassTable::default();
        assert_eq!(table.source, FLAG_2024_SOURCE);
        assert!((table.up.value - 2.16).abs() < f64::EPSILON);
        assert!((table.down.value - 4.70).abs() < f64::EPSILON);
        assert!((table.strange.value - 93.5).abs() < f64::EPSILON);
        assert!((table.strange.uncertainty - 0.7).abs() < f64::EPSILON);
    }
}
