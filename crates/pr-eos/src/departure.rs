//! Enthalpy and entropy departure from ideal-gas behavior.
//!
//! Unlike the fugacity coefficient these are not floored: they are only
//! meaningful on a validated root with `Z > B`, and anything else is reported
//! as a domain error.

use crate::error::{EosError, EosResult};
use crate::parameters::EosState;
use std::f64::consts::SQRT_2;

/// Both departures of one phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Departures {
    /// H − H_ig [J/mol]
    pub enthalpy: f64,
    /// S − S_ig [J/(mol·K)]
    pub entropy: f64,
}

impl Departures {
    pub fn evaluate(gas_constant: f64, state: &EosState, z: f64) -> EosResult<Self> {
        Ok(Self {
            enthalpy: enthalpy_departure(
                gas_constant,
                state.t,
                z,
                state.big_b,
                state.a,
                state.da_dt,
                state.b,
            )?,
            entropy: entropy_departure(gas_constant, z, state.big_b, state.da_dt, state.b)?,
        })
    }
}

/// `H − H_ig = R·T·(Z−1) + (T·da/dT − a)/(2√2·b) · ln[(Z+(1+√2)B)/(Z+(1−√2)B)]`
pub fn enthalpy_departure(
    gas_constant: f64,
    t: f64,
    z: f64,
    big_b: f64,
    a: f64,
    da_dt: f64,
    b: f64,
) -> EosResult<f64> {
    check_root(z, big_b)?;
    check_covolume(b)?;
    Ok(gas_constant * t * (z - 1.0) + (t * da_dt - a) / (2.0 * SQRT_2 * b) * log_ratio(z, big_b)?)
}

/// `S − S_ig = R·ln(Z−B) + da/dT/(2√2·b) · ln[(Z+(1+√2)B)/(Z+(1−√2)B)]`
pub fn entropy_departure(
    gas_constant: f64,
    z: f64,
    big_b: f64,
    da_dt: f64,
    b: f64,
) -> EosResult<f64> {
    check_root(z, big_b)?;
    check_covolume(b)?;
    Ok(gas_constant * (z - big_b).ln() + da_dt / (2.0 * SQRT_2 * b) * log_ratio(z, big_b)?)
}

fn log_ratio(z: f64, big_b: f64) -> EosResult<f64> {
    let ratio = (z + (1.0 + SQRT_2) * big_b) / (z + (1.0 - SQRT_2) * big_b);
    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio.ln())
    } else {
        Err(EosError::domain("departure log argument must be positive", ratio))
    }
}

fn check_root(z: f64, big_b: f64) -> EosResult<()> {
    if z.is_finite() && big_b.is_finite() && z > big_b {
        Ok(())
    } else {
        Err(EosError::domain("departure functions require Z > B", z))
    }
}

fn check_covolume(b: f64) -> EosResult<()> {
    if b.is_finite() && b > 0.0 {
        Ok(())
    } else {
        Err(EosError::domain("co-volume must be positive", b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ParameterModel;
    use crate::substance::SubstanceParameters;
    use approx::assert_relative_eq;
    use pr_core::units::constants::R_J_PER_MOL_K;

    fn methane_state() -> EosState {
        ParameterModel::default()
            .state(&SubstanceParameters::new(190.6, 4.6e6, 0.011), 150.0, 1.0e6)
            .unwrap()
    }

    #[test]
    fn vapor_departures_are_negative_and_small() {
        let state = methane_state();
        let dep = Departures::evaluate(R_J_PER_MOL_K, &state, 0.825_011_256_140_813).unwrap();
        assert!(dep.enthalpy < 0.0 && dep.enthalpy > -2000.0, "{}", dep.enthalpy);
        assert!(dep.entropy < 0.0 && dep.entropy > -10.0, "{}", dep.entropy);
    }

    #[test]
    fn liquid_departs_further_than_vapor() {
        let state = methane_state();
        let vapor = Departures::evaluate(R_J_PER_MOL_K, &state, 0.825_011_256_140_813).unwrap();
        let liquid = Departures::evaluate(R_J_PER_MOL_K, &state, 0.033_115_512_364_297).unwrap();
        assert!(liquid.enthalpy < vapor.enthalpy);
        assert!(liquid.entropy < vapor.entropy);
    }

    #[test]
    fn ideal_gas_has_no_departure() {
        // Vanishing A and B: Z = 1 and the log ratio → 0.
        let h = enthalpy_departure(R_J_PER_MOL_K, 300.0, 1.0, 0.0, 0.0, 0.0, 1e-5).unwrap();
        let s = entropy_departure(R_J_PER_MOL_K, 1.0, 0.0, 0.0, 1e-5).unwrap();
        assert_relative_eq!(h, 0.0);
        assert_relative_eq!(s, 0.0);
    }

    #[test]
    fn root_below_covolume_is_rejected() {
        let state = methane_state();
        assert!(matches!(
            Departures::evaluate(R_J_PER_MOL_K, &state, state.big_b / 2.0),
            Err(EosError::Domain { .. })
        ));
        assert!(entropy_departure(R_J_PER_MOL_K, 0.9, 0.01, -1e-4, 0.0).is_err());
    }
}
