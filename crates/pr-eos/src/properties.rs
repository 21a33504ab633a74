//! Single state-point report.
//!
//! Evaluates the model at one `(T, P)`: every compressibility root, and for
//! the vapor-like (largest) and liquid-like (smallest) roots the fugacity
//! coefficient and both departure functions. A phase root at or below `B`
//! has no physical meaning and is reported as absent.

use crate::cubic::{CompressibilityRoots, compressibility_roots};
use crate::departure::Departures;
use crate::error::EosResult;
use crate::fugacity::fugacity_coefficient;
use crate::parameters::{EosState, ParameterModel};
use crate::substance::SubstanceParameters;
use pr_core::ensure_positive;
use pr_core::units::{MolarEnergy, MolarEntropy, j_per_mol, j_per_mol_k};

/// Properties of one phase root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseProperties {
    pub z: f64,
    pub phi: f64,
    pub departures: Departures,
}

impl PhaseProperties {
    fn evaluate(gas_constant: f64, state: &EosState, z: f64) -> EosResult<Option<Self>> {
        if z <= state.big_b {
            return Ok(None);
        }
        Ok(Some(Self {
            z,
            phi: fugacity_coefficient(z, state.big_a, state.big_b)?,
            departures: Departures::evaluate(gas_constant, state, z)?,
        }))
    }

    pub fn enthalpy_departure(&self) -> MolarEnergy {
        j_per_mol(self.departures.enthalpy)
    }

    pub fn entropy_departure(&self) -> MolarEntropy {
        j_per_mol_k(self.departures.entropy)
    }
}

/// Full report for one substance at one `(T, P)`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatePoint {
    pub state: EosState,
    pub roots: CompressibilityRoots,
    pub vapor: Option<PhaseProperties>,
    /// Only present when the cubic has three distinct roots.
    pub liquid: Option<PhaseProperties>,
}

impl StatePoint {
    pub fn is_two_phase(&self) -> bool {
        self.roots.is_two_phase()
    }
}

pub fn state_point(
    model: &ParameterModel,
    params: &SubstanceParameters,
    t: f64,
    p: f64,
) -> EosResult<StatePoint> {
    params.validate()?;
    ensure_positive(p, "pressure")?;
    let state = model.state(params, t, p)?;
    let roots = compressibility_roots(state.big_a, state.big_b);
    let r = model.gas_constant();

    let vapor = match roots.largest() {
        Some(z) => PhaseProperties::evaluate(r, &state, z)?,
        None => None,
    };
    let liquid = match roots.vapor_liquid() {
        Some((_, zl)) => PhaseProperties::evaluate(r, &state, zl)?,
        None => None,
    };
    tracing::debug!(t, p, roots = roots.len(), "evaluated state point");

    Ok(StatePoint {
        state,
        roots,
        vapor,
        liquid,
    })
}
