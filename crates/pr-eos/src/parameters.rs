//! Peng-Robinson parameter model.
//!
//! Maps critical constants and a `(T, P)` point to the attraction parameter
//! `a(T)`, its temperature derivative, the co-volume `b` and the dimensionless
//! groups `A = aP/(RT)²` and `B = bP/(RT)`.

use crate::config::EosConstants;
use crate::error::{EosError, EosResult};
use crate::substance::SubstanceParameters;

/// Attraction-parameter coefficient `Ωa`.
pub const OMEGA_A: f64 = 0.45724;
/// Co-volume coefficient `Ωb`.
pub const OMEGA_B: f64 = 0.07780;

/// Equation-of-state parameters at one `(T, P)` point.
///
/// Built fresh for every pressure iterate; never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EosState {
    /// Temperature [K]
    pub t: f64,
    /// Pressure [Pa]
    pub p: f64,
    /// Attraction parameter a(T) [Pa·m⁶/mol²]
    pub a: f64,
    /// da/dT [Pa·m⁶/(mol²·K)]
    pub da_dt: f64,
    /// Co-volume b [m³/mol]
    pub b: f64,
    /// Dimensionless A
    pub big_a: f64,
    /// Dimensionless B
    pub big_b: f64,
}

/// Stateless parameter model over a fixed set of model constants.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParameterModel {
    constants: EosConstants,
}

impl ParameterModel {
    pub fn new(constants: EosConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &EosConstants {
        &self.constants
    }

    pub fn gas_constant(&self) -> f64 {
        self.constants.gas_constant
    }

    /// `kappa(omega) = 0.37464 + 1.54226·omega − c·omega²`
    pub fn kappa(&self, omega: f64) -> f64 {
        0.37464 + 1.54226 * omega - self.constants.kappa_omega_squared * omega * omega
    }

    /// `alpha = (1 + kappa·(1 − sqrt(T/Tc)))²`
    pub fn alpha(&self, t: f64, tc: f64, omega: f64) -> EosResult<f64> {
        check_critical_temperature(tc)?;
        if !t.is_finite() || t < 0.0 {
            return Err(EosError::domain("temperature must be non-negative", t));
        }
        let m = 1.0 + self.kappa(omega) * (1.0 - (t / tc).sqrt());
        Ok(m * m)
    }

    /// Attraction parameter `a(T) = Ωa·(R·Tc)²·alpha/Pc`.
    pub fn a(&self, t: f64, tc: f64, pc: f64, omega: f64) -> EosResult<f64> {
        check_critical_pressure(pc)?;
        Ok(self.a_critical(tc, pc) * self.alpha(t, tc, omega)?)
    }

    /// Analytic temperature derivative of `a(T)`.
    pub fn da_dt(&self, t: f64, tc: f64, pc: f64, omega: f64) -> EosResult<f64> {
        check_critical_temperature(tc)?;
        check_critical_pressure(pc)?;
        check_temperature(t)?;
        let kappa = self.kappa(omega);
        let m = 1.0 + kappa * (1.0 - (t / tc).sqrt());
        Ok(-self.a_critical(tc, pc) * kappa * m / (t * tc).sqrt())
    }

    /// Co-volume `b = Ωb·R·Tc/Pc`.
    pub fn b(&self, tc: f64, pc: f64) -> EosResult<f64> {
        check_critical_temperature(tc)?;
        check_critical_pressure(pc)?;
        Ok(OMEGA_B * self.gas_constant() * tc / pc)
    }

    /// `A = a·P/(R·T)²`
    pub fn dimensionless_a(&self, a: f64, p: f64, t: f64) -> EosResult<f64> {
        check_temperature(t)?;
        let rt = self.gas_constant() * t;
        Ok(a * p / (rt * rt))
    }

    /// `B = b·P/(R·T)`
    pub fn dimensionless_b(&self, b: f64, p: f64, t: f64) -> EosResult<f64> {
        check_temperature(t)?;
        Ok(b * p / (self.gas_constant() * t))
    }

    /// Evaluate every parameter at `(t, p)` for one substance.
    pub fn state(&self, params: &SubstanceParameters, t: f64, p: f64) -> EosResult<EosState> {
        let SubstanceParameters { tc, pc, omega } = *params;
        let a = self.a(t, tc, pc, omega)?;
        let da_dt = self.da_dt(t, tc, pc, omega)?;
        let b = self.b(tc, pc)?;
        Ok(EosState {
            t,
            p,
            a,
            da_dt,
            b,
            big_a: self.dimensionless_a(a, p, t)?,
            big_b: self.dimensionless_b(b, p, t)?,
        })
    }

    fn a_critical(&self, tc: f64, pc: f64) -> f64 {
        let rtc = self.gas_constant() * tc;
        OMEGA_A * rtc * rtc / pc
    }
}

fn check_temperature(t: f64) -> EosResult<()> {
    if t.is_finite() && t > 0.0 {
        Ok(())
    } else {
        Err(EosError::domain("temperature must be positive", t))
    }
}

fn check_critical_temperature(tc: f64) -> EosResult<()> {
    if tc.is_finite() && tc > 0.0 {
        Ok(())
    } else {
        Err(EosError::domain("critical temperature must be positive", tc))
    }
}

fn check_critical_pressure(pc: f64) -> EosResult<()> {
    if pc.is_finite() && pc > 0.0 {
        Ok(())
    } else {
        Err(EosError::domain("critical pressure must be positive", pc))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn a_and_b_are_positive(
            t in 1.0_f64..2000.0,
            tc in 5.0_f64..1000.0,
            pc in 1.0e5_f64..5.0e7,
            omega in -0.5_f64..1.5,
        ) {
            let model = ParameterModel::default();
            let a = model.a(t, tc, pc, omega).unwrap();
            let b = model.b(tc, pc).unwrap();
            prop_assert!(b > 0.0);
            // alpha is a square; it only vanishes on the measure-zero set
            // where 1 + kappa(1 - sqrt(T/Tc)) == 0.
            prop_assert!(a >= 0.0);
            let m = 1.0 + model.kappa(omega) * (1.0 - (t / tc).sqrt());
            if m.abs() > 1e-9 {
                prop_assert!(a > 0.0);
            }
        }
    }
}
