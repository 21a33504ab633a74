//! Pure-component fugacity coefficient.
//!
//! ```text
//! ln φ = (Z − 1) − ln(Z − B) − A/(2√2·B) · ln[(Z + (1+√2)B) / (Z + (1−√2)B)]
//! ```
//!
//! Log arguments that are not positive are floored at [`LOG_ARGUMENT_FLOOR`]
//! so that a pressure search near a phase boundary keeps running with a finite
//! value instead of aborting.

use crate::error::{EosError, EosResult};
use std::f64::consts::SQRT_2;

/// Smallest argument handed to `ln` in the fugacity expression.
pub const LOG_ARGUMENT_FLOOR: f64 = 1e-10;

/// `|ln φ|` is capped here so `exp` stays finite and non-zero.
const LN_PHI_BOUND: f64 = 700.0;

/// Fugacity coefficient of one phase at one state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseFugacity {
    pub z: f64,
    pub phi: f64,
}

impl PhaseFugacity {
    pub fn evaluate(z: f64, big_a: f64, big_b: f64) -> EosResult<Self> {
        Ok(Self {
            z,
            phi: fugacity_coefficient(z, big_a, big_b)?,
        })
    }
}

/// Fugacity coefficient `phi(Z, A, B)`; always positive and finite.
pub fn fugacity_coefficient(z: f64, big_a: f64, big_b: f64) -> EosResult<f64> {
    if !z.is_finite() {
        return Err(EosError::domain("compressibility factor must be finite", z));
    }
    if !big_a.is_finite() {
        return Err(EosError::domain("A must be finite", big_a));
    }
    if !big_b.is_finite() || big_b == 0.0 {
        return Err(EosError::domain("B must be finite and non-zero", big_b));
    }

    let residual_term = z - 1.0;
    let covolume_term = -(z - big_b).max(LOG_ARGUMENT_FLOOR).ln();
    let num = (z + (1.0 + SQRT_2) * big_b).max(LOG_ARGUMENT_FLOOR);
    let den = (z + (1.0 - SQRT_2) * big_b).max(LOG_ARGUMENT_FLOOR);
    let attraction_term = -(big_a / (2.0 * SQRT_2 * big_b)) * (num / den).ln();

    let ln_phi = residual_term + covolume_term + attraction_term;
    if ln_phi.is_nan() {
        return Err(EosError::domain("ln(phi) is not a number", ln_phi));
    }
    Ok(ln_phi.clamp(-LN_PHI_BOUND, LN_PHI_BOUND).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const A: f64 = 0.183_134_303_343_548;
    const B: f64 = 0.022_490_893_767_719_7;

    #[test]
    fn saturated_methane_phases_agree() {
        let phi_v = fugacity_coefficient(0.815_348_059_456_846, A, B).unwrap();
        let phi_l = fugacity_coefficient(0.034_639_688_124_222, A, B).unwrap();
        assert_relative_eq!(phi_v, 0.842_632_629_517_128, max_relative = 1e-8);
        assert_relative_eq!(phi_l, 0.842_633_335_329_369, max_relative = 1e-6);
        assert!((phi_v - phi_l).abs() < 1e-6);
    }

    #[test]
    fn ideal_gas_limit() {
        // Z = 1, A = 0 and vanishing B give phi → 1.
        let phi = fugacity_coefficient(1.0, 0.0, 1e-12).unwrap();
        assert_relative_eq!(phi, 1.0, max_relative = 1e-9);
    }

    #[test]
    fn floors_non_positive_log_arguments() {
        // Z below B would be ln(negative) without the floor.
        let phi = fugacity_coefficient(0.01, 0.2, 0.05).unwrap();
        assert!(phi.is_finite() && phi > 0.0);
    }

    #[test]
    fn zero_b_is_a_domain_error() {
        assert!(matches!(
            fugacity_coefficient(0.9, 0.1, 0.0),
            Err(EosError::Domain { .. })
        ));
        assert!(fugacity_coefficient(f64::NAN, 0.1, 0.01).is_err());
    }

    #[test]
    fn phase_fugacity_keeps_root() {
        let phase = PhaseFugacity::evaluate(0.8, 0.18, 0.02).unwrap();
        assert_eq!(phase.z, 0.8);
        assert!(phase.phi > 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn phi_is_positive_and_finite(
            z in -10.0_f64..10.0,
            big_a in -10.0_f64..10.0,
            big_b in prop_oneof![-1.0_f64..-1e-9, 1e-9_f64..1.0],
        ) {
            let phi = fugacity_coefficient(z, big_a, big_b).unwrap();
            prop_assert!(phi > 0.0);
            prop_assert!(phi.is_finite());
        }
    }
}
