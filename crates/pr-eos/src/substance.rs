//! Pure-substance critical constants and the lookup contract.

use crate::error::{EosError, EosResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Critical constants of a pure substance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubstanceParameters {
    /// Critical temperature [K]
    pub tc: f64,
    /// Critical pressure [Pa]
    pub pc: f64,
    /// Acentric factor
    pub omega: f64,
}

impl SubstanceParameters {
    pub fn new(tc: f64, pc: f64, omega: f64) -> Self {
        Self { tc, pc, omega }
    }

    /// Check that the critical constants can feed the parameter model.
    ///
    /// `omega` is only required to be finite; its range is not checked.
    pub fn validate(&self) -> EosResult<()> {
        if !self.tc.is_finite() || self.tc <= 0.0 {
            return Err(EosError::domain(
                "critical temperature must be positive",
                self.tc,
            ));
        }
        if !self.pc.is_finite() || self.pc <= 0.0 {
            return Err(EosError::domain("critical pressure must be positive", self.pc));
        }
        if !self.omega.is_finite() {
            return Err(EosError::domain("acentric factor must be finite", self.omega));
        }
        Ok(())
    }
}

impl fmt::Display for SubstanceParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tc={} K, Pc={} Pa, omega={}",
            self.tc, self.pc, self.omega
        )
    }
}

/// Resolves a substance name to its critical constants.
///
/// Implementations match names case-insensitively and return `pc` in Pa.
/// Implementations must be thread-safe (Send + Sync) so independent searches
/// can share one lookup.
pub trait SubstanceLookup: Send + Sync {
    fn lookup(&self, name: &str) -> Option<SubstanceParameters>;
}

/// Resolve `name` or fail with [`EosError::SubstanceNotFound`].
pub fn resolve<L: SubstanceLookup + ?Sized>(
    lookup: &L,
    name: &str,
) -> EosResult<SubstanceParameters> {
    let params = lookup
        .lookup(name)
        .ok_or_else(|| EosError::SubstanceNotFound {
            name: name.to_string(),
        })?;
    params.validate()?;
    tracing::debug!(substance = name, %params, "resolved substance");
    Ok(params)
}
