//! Error type for mass table loading and validation.

use crate::types::Quark;

/// Errors raised while building a [`MassTable`](crate::types::MassTable).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("Missing mass for quark '{0}'")]
    MissingQuark(Quark),

    #[error("Quark '{0}' is listed more than once")]
    DuplicateQuark(Quark),

    #[error("Unknown quark symbol '{0}' (expected u, d or s)")]
    UnknownQuark(String),

    #[error("Mass of quark '{quark}' must be positive and finite, got {value}")]
    InvalidMass { quark: Quark, value: f64 },

    #[error("Uncertainty of quark '{quark}' must be positive and finite, got {value}")]
    InvalidUncertainty { quark: Quark, value: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
