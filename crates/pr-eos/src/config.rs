//! Engine configuration: model constants and pressure-search options.
//!
//! Everything here is immutable once built. The defaults are the canonical
//! Peng-Robinson model; a YAML file may override any subset of fields.
//!
//! ```yaml
//! constants:
//!   gas_constant: 8.3144621
//!   kappa_omega_squared: 0.26992
//! solver:
//!   initial_pressure: 1.0e6
//!   tolerance: 1.0e-6
//!   max_iterations: 1000
//! ```

use crate::error::{EosError, EosResult};
use pr_core::units::constants::R_J_PER_MOL_K;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Quadratic coefficient of the acentric-factor polynomial in `kappa`.
pub const KAPPA_OMEGA_SQUARED: f64 = 0.26992;

/// Model constants of the equation of state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EosConstants {
    /// Universal gas constant [J/(mol·K)]
    pub gas_constant: f64,
    /// Coefficient of `omega²` in `kappa(omega)`
    pub kappa_omega_squared: f64,
}

impl Default for EosConstants {
    fn default() -> Self {
        Self {
            gas_constant: R_J_PER_MOL_K,
            kappa_omega_squared: KAPPA_OMEGA_SQUARED,
        }
    }
}

impl EosConstants {
    pub fn validate(&self) -> EosResult<()> {
        if !self.gas_constant.is_finite() || self.gas_constant <= 0.0 {
            return Err(EosError::InvalidOptions {
                what: "gas constant must be positive and finite",
            });
        }
        if !self.kappa_omega_squared.is_finite() {
            return Err(EosError::InvalidOptions {
                what: "kappa coefficient must be finite",
            });
        }
        Ok(())
    }
}

/// Pressure-search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    /// Starting pressure [Pa]
    pub initial_pressure: f64,
    /// Convergence threshold on `|phi_v - phi_l|`
    pub tolerance: f64,
    /// Iteration budget
    pub max_iterations: u32,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            initial_pressure: 1.0e6,
            tolerance: 1e-6,
            max_iterations: 1000,
        }
    }
}

impl SolverOptions {
    pub fn with_initial_pressure(mut self, initial_pressure: f64) -> Self {
        self.initial_pressure = initial_pressure;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn validate(&self) -> EosResult<()> {
        if !self.initial_pressure.is_finite() || self.initial_pressure <= 0.0 {
            return Err(EosError::InvalidOptions {
                what: "initial pressure must be positive and finite",
            });
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(EosError::InvalidOptions {
                what: "tolerance must be positive and finite",
            });
        }
        if self.max_iterations == 0 {
            return Err(EosError::InvalidOptions {
                what: "max_iterations must be at least 1",
            });
        }
        Ok(())
    }
}

/// Complete engine configuration as stored on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub constants: EosConstants,
    pub solver: SolverOptions,
}

impl EngineConfig {
    pub fn from_yaml_str(text: &str) -> EosResult<Self> {
        let config: EngineConfig = serde_yaml::from_str(text)?;
        config.constants.validate()?;
        config.solver.validate()?;
        Ok(config)
    }

    pub fn load_yaml(path: &Path) -> EosResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> EosResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_canonical() {
        let config = EngineConfig::default();
        assert_eq!(config.constants.gas_constant, 8.3144621);
        assert_eq!(config.constants.kappa_omega_squared, 0.26992);
        assert_eq!(config.solver.tolerance, 1e-6);
        assert_eq!(config.solver.max_iterations, 1000);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = EngineConfig::from_yaml_str(
            "constants:\n  kappa_omega_squared: 0.26993\nsolver:\n  max_iterations: 50\n",
        )
        .unwrap();
        assert_eq!(config.constants.kappa_omega_squared, 0.26993);
        assert_eq!(config.constants.gas_constant, 8.3144621);
        assert_eq!(config.solver.max_iterations, 50);
        assert_eq!(config.solver.initial_pressure, 1.0e6);
    }

    #[test]
    fn empty_document_is_default() {
        let config = EngineConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn yaml_roundtrip() {
        let config = EngineConfig {
            constants: EosConstants::default(),
            solver: SolverOptions::default().with_tolerance(1e-9),
        };
        let text = config.to_yaml_string().unwrap();
        assert_eq!(EngineConfig::from_yaml_str(&text).unwrap(), config);
    }

    #[test]
    fn invalid_solver_options_rejected() {
        assert!(SolverOptions::default().with_tolerance(0.0).validate().is_err());
        assert!(SolverOptions::default().with_max_iterations(0).validate().is_err());
        assert!(
            SolverOptions::default()
                .with_initial_pressure(-1.0)
                .validate()
                .is_err()
        );
        assert!(EngineConfig::from_yaml_str("solver:\n  tolerance: -1.0\n").is_err());
    }

    #[test]
    fn invalid_gas_constant_rejected() {
        let constants = EosConstants {
            gas_constant: 0.0,
            ..EosConstants::default()
        };
        assert!(constants.validate().is_err());
    }
}
