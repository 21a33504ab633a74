//! Compressibility and fugacity along an isotherm.

use crate::cubic::compressibility_roots;
use crate::equilibrium::PhaseRegion;
use crate::error::{EosError, EosResult};
use crate::fugacity::fugacity_coefficient;
use crate::parameters::ParameterModel;
use crate::substance::SubstanceParameters;
use crate::sweeps::SweepDefinition;
use pr_core::ensure_positive;

/// One pressure on an isotherm.
///
/// With a single root, `zv == zl` and `phi_zv == phi_zl`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsothermPoint {
    /// [Pa]
    pub p: f64,
    pub big_a: f64,
    pub big_b: f64,
    pub zv: f64,
    pub zl: f64,
    pub phi_zv: f64,
    pub phi_zl: f64,
    pub phase: PhaseRegion,
}

/// Evaluate `params` at temperature `t` [K] for each pressure in order.
pub fn isotherm(
    model: &ParameterModel,
    params: &SubstanceParameters,
    t: f64,
    pressures: &[f64],
) -> EosResult<Vec<IsothermPoint>> {
    params.validate()?;
    pressures
        .iter()
        .map(|&p| isotherm_point(model, params, t, p))
        .collect()
}

/// [`isotherm`] over the points of a sweep.
pub fn isotherm_sweep(
    model: &ParameterModel,
    params: &SubstanceParameters,
    t: f64,
    sweep: &SweepDefinition,
) -> EosResult<Vec<IsothermPoint>> {
    sweep.validate()?;
    isotherm(model, params, t, &sweep.generate_points())
}

fn isotherm_point(
    model: &ParameterModel,
    params: &SubstanceParameters,
    t: f64,
    p: f64,
) -> EosResult<IsothermPoint> {
    ensure_positive(p, "isotherm pressure")?;
    let state = model.state(params, t, p)?;
    let roots = compressibility_roots(state.big_a, state.big_b);

    let (zv, zl, phase) = match roots.vapor_liquid() {
        Some((zv, zl)) => (zv, zl, PhaseRegion::TwoPhase),
        None => {
            let z = roots
                .largest()
                .ok_or_else(|| EosError::domain("cubic produced no finite root", p))?;
            (z, z, PhaseRegion::SinglePhase)
        }
    };

    Ok(IsothermPoint {
        p,
        big_a: state.big_a,
        big_b: state.big_b,
        zv,
        zl,
        phi_zv: fugacity_coefficient(zv, state.big_a, state.big_b)?,
        phi_zl: fugacity_coefficient(zl, state.big_a, state.big_b)?,
        phase,
    })
}
