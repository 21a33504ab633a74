//! Equation-of-state engine errors.

use pr_core::CoreError;
use thiserror::Error;

/// Result type for engine operations.
pub type EosResult<T> = Result<T, EosError>;

/// Errors raised by the Peng-Robinson engine.
///
/// Non-convergence and single-phase roots are not errors; they are terminal
/// outcomes of a pressure search and travel with its iteration records.
#[derive(Error, Debug)]
pub enum EosError {
    /// Invalid numeric input to a formula.
    #[error("Domain error: {what} (value = {value})")]
    Domain { what: &'static str, value: f64 },

    /// The substance lookup returned no record.
    #[error("Substance not found: '{name}'")]
    SubstanceNotFound { name: String },

    /// Rejected solver options or sweep definition.
    #[error("Invalid options: {what}")]
    InvalidOptions { what: &'static str },

    #[error("Numeric error: {0}")]
    Numeric(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl EosError {
    pub(crate) fn domain(what: &'static str, value: f64) -> Self {
        Self::Domain { what, value }
    }
}
