//! Substance data errors.

use thiserror::Error;

/// Result type for substance table operations.
pub type SubstanceResult<T> = Result<T, SubstanceError>;

#[derive(Error, Debug)]
pub enum SubstanceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A row whose critical constants cannot feed the equation of state.
    #[error("Invalid record '{name}': {reason}")]
    InvalidRecord { name: String, reason: String },

    /// Two rows (or a row and an alias) share a name.
    #[error("Duplicate substance name '{name}'")]
    DuplicateName { name: String },

    #[error("Unsupported table format '{extension}' (expected yaml, yml or json)")]
    UnsupportedFormat { extension: String },
}
