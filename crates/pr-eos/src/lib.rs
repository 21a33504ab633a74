//! pr-eos: Peng-Robinson equation of state for pure substances.
//!
//! Provides:
//! - Parameter model (`a(T)`, `da/dT`, `b`, `A`, `B`) with configurable constants
//! - Compressibility-factor cubic solver with vapor/liquid root selection
//! - Fugacity coefficient and enthalpy/entropy departure functions
//! - Vapor-liquid equilibrium pressure search with a full iteration record
//! - State-point reports, isotherm sweeps and parallel saturation curves
//!
//! Substance data enters only through the [`SubstanceLookup`] trait.
//!
//! # Example
//!
//! ```
//! use pr_eos::{SolverOptions, SubstanceLookup, SubstanceParameters, find_equilibrium_pressure};
//!
//! struct Methane;
//!
//! impl SubstanceLookup for Methane {
//!     fn lookup(&self, name: &str) -> Option<SubstanceParameters> {
//!         name.eq_ignore_ascii_case("methane")
//!             .then_some(SubstanceParameters::new(190.6, 4.6e6, 0.011))
//!     }
//! }
//!
//! let search =
//!     find_equilibrium_pressure(&Methane, 150.0, "methane", &SolverOptions::default()).unwrap();
//! assert!(search.is_converged());
//! println!("Psat = {:.0} Pa", search.equilibrium_pressure().unwrap());
//! ```

pub mod config;
pub mod cubic;
pub mod departure;
pub mod equilibrium;
pub mod error;
pub mod fugacity;
pub mod isotherm;
pub mod parameters;
pub mod properties;
pub mod saturation;
pub mod substance;
pub mod sweeps;

// Re-exports for ergonomics
pub use config::{EngineConfig, EosConstants, KAPPA_OMEGA_SQUARED, SolverOptions};
pub use cubic::{CompressibilityRoots, compressibility_roots};
pub use departure::{Departures, enthalpy_departure, entropy_departure};
pub use equilibrium::{
    FailureReason, IterationRecord, PhaseRegion, PressureSearch, SearchOutcome,
    VaporPressureSolver, find_equilibrium_pressure,
};
pub use error::{EosError, EosResult};
pub use fugacity::{PhaseFugacity, fugacity_coefficient};
pub use isotherm::{IsothermPoint, isotherm, isotherm_sweep};
pub use parameters::{EosState, ParameterModel};
pub use properties::{PhaseProperties, StatePoint, state_point};
pub use substance::{SubstanceLookup, SubstanceParameters, resolve};
pub use sweeps::{SweepDefinition, SweepType};
