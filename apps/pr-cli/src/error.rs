//! Error type for the command-line front-end.

use pr_core::UnitError;
use pr_eos::EosError;
use pr_substances::SubstanceError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Engine error: {0}")]
    Eos(#[from] EosError),

    #[error("Substance data error: {0}")]
    Substance(#[from] SubstanceError),

    #[error("Invalid input: {0}")]
    Unit(#[from] UnitError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
