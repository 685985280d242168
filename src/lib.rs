//! quark-ratios: light quark mass ratio validation.
//!
//! Checks empirical relations among the light quark masses (`m_s/m_d = 20`,
//! `m_d/m_u = ∛10` and the scale-invariant `2(m_d/m_u)³ = m_s/m_d`) against
//! FLAG 2024 averages, and reports the RG-evolved ratio table.

pub mod error;
pub mod relations;
pub mod report;
pub mod scales;
pub mod stats;
pub mod types;

pub use error::{Error, Result};
