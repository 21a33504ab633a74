//! Vapor-liquid equilibrium pressure search.
//!
//! Successive substitution on the fugacity ratio: at each iterate the vapor
//! and liquid roots are evaluated and the pressure is updated as
//! `P ← P·phi_l/phi_v` until `|phi_v − phi_l| < tolerance`. No damping or
//! bounds are applied to the update.
//!
//! Every iterate is recorded. A search ends in one of three outcomes:
//! converged, exhausted (the iteration budget ran out) or failed. Failure
//! covers a single-phase cubic and a non-physical pressure update. Only bad
//! inputs and an unknown substance are errors.

use crate::config::{EngineConfig, SolverOptions};
use crate::cubic::compressibility_roots;
use crate::error::{EosError, EosResult};
use crate::fugacity::fugacity_coefficient;
use crate::parameters::ParameterModel;
use crate::substance::{SubstanceLookup, SubstanceParameters, resolve};
use pr_core::units::{Pressure, pa};
use std::fmt;

/// Root structure of the cubic at one iterate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseRegion {
    /// Three distinct roots; vapor and liquid both available.
    TwoPhase,
    /// Fewer than three distinct roots.
    SinglePhase,
}

impl fmt::Display for PhaseRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwoPhase => write!(f, "two-phase"),
            Self::SinglePhase => write!(f, "single-phase"),
        }
    }
}

/// One step of a pressure search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationRecord {
    /// 1-based iteration number
    pub iteration: u32,
    /// Pressure evaluated at this step [Pa]
    pub p: f64,
    pub big_a: f64,
    pub big_b: f64,
    /// Largest root
    pub zv: f64,
    /// Smallest root
    pub zl: f64,
    pub phi_zv: f64,
    pub phi_zl: f64,
    pub converged: bool,
    pub phase: PhaseRegion,
}

impl IterationRecord {
    /// `|phi_v − phi_l|`
    pub fn fugacity_gap(&self) -> f64 {
        (self.phi_zv - self.phi_zl).abs()
    }
}

/// Why a search stopped without converging or exhausting its budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailureReason {
    /// The cubic had `roots` distinct real roots (fewer than three).
    SinglePhase { iteration: u32, roots: usize },
    /// The pressure update left the physical domain.
    NonPhysicalPressure { iteration: u32, pressure: f64 },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SinglePhase { iteration, roots } => write!(
                f,
                "single phase at iteration {iteration} ({roots} distinct root(s))"
            ),
            Self::NonPhysicalPressure {
                iteration,
                pressure,
            } => write!(
                f,
                "non-physical pressure {pressure} Pa proposed for iteration {iteration}"
            ),
        }
    }
}

/// Terminal state of a pressure search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchOutcome {
    Converged { pressure: f64 },
    Exhausted,
    Failed(FailureReason),
}

/// Full result of one pressure search: the outcome plus its audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct PressureSearch {
    pub substance: String,
    /// Temperature [K]
    pub temperature: f64,
    pub outcome: SearchOutcome,
    pub records: Vec<IterationRecord>,
}

impl PressureSearch {
    pub fn is_converged(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Converged { .. })
    }

    /// Equilibrium pressure [Pa] when converged.
    pub fn equilibrium_pressure(&self) -> Option<f64> {
        match self.outcome {
            SearchOutcome::Converged { pressure } => Some(pressure),
            _ => None,
        }
    }

    pub fn equilibrium_pressure_si(&self) -> Option<Pressure> {
        self.equilibrium_pressure().map(pa)
    }

    /// The last recorded iterate, i.e. the closest approach for an exhausted search.
    pub fn last_record(&self) -> Option<&IterationRecord> {
        self.records.last()
    }

    pub fn iterations(&self) -> usize {
        self.records.len()
    }
}

/// Pressure-search service over a fixed model and options.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VaporPressureSolver {
    model: ParameterModel,
    options: SolverOptions,
}

impl VaporPressureSolver {
    pub fn new(model: ParameterModel, options: SolverOptions) -> EosResult<Self> {
        model.constants().validate()?;
        options.validate()?;
        Ok(Self { model, options })
    }

    pub fn from_config(config: &EngineConfig) -> EosResult<Self> {
        Self::new(ParameterModel::new(config.constants), config.solver)
    }

    pub fn model(&self) -> &ParameterModel {
        &self.model
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Same solver with different options.
    pub fn with_options(&self, options: SolverOptions) -> EosResult<Self> {
        Self::new(self.model, options)
    }

    /// Resolve `substance` through `lookup`, then search at `t` [K].
    ///
    /// An unknown substance fails before any iteration is attempted.
    pub fn find<L: SubstanceLookup + ?Sized>(
        &self,
        lookup: &L,
        t: f64,
        substance: &str,
    ) -> EosResult<PressureSearch> {
        let params = resolve(lookup, substance)?;
        self.solve(substance, &params, t)
    }

    /// Search with already-resolved critical constants.
    pub fn solve(
        &self,
        substance: &str,
        params: &SubstanceParameters,
        t: f64,
    ) -> EosResult<PressureSearch> {
        params.validate()?;
        if !t.is_finite() || t <= 0.0 {
            return Err(EosError::domain("temperature must be positive", t));
        }

        let opts = &self.options;
        let mut records = Vec::new();
        let mut p = opts.initial_pressure;

        for iteration in 1..=opts.max_iterations {
            let state = self.model.state(params, t, p)?;
            let roots = compressibility_roots(state.big_a, state.big_b);
            let (Some(largest), Some(smallest)) = (roots.largest(), roots.smallest()) else {
                return Err(EosError::domain("cubic produced no finite root", p));
            };

            let phase = if roots.is_two_phase() {
                PhaseRegion::TwoPhase
            } else {
                PhaseRegion::SinglePhase
            };
            let phi_zv = fugacity_coefficient(largest, state.big_a, state.big_b)?;
            let phi_zl = fugacity_coefficient(smallest, state.big_a, state.big_b)?;
            let converged =
                phase == PhaseRegion::TwoPhase && (phi_zv - phi_zl).abs() < opts.tolerance;

            records.push(IterationRecord {
                iteration,
                p,
                big_a: state.big_a,
                big_b: state.big_b,
                zv: largest,
                zl: smallest,
                phi_zv,
                phi_zl,
                converged,
                phase,
            });
            tracing::debug!(
                substance,
                iteration,
                p,
                zv = largest,
                zl = smallest,
                phi_zv,
                phi_zl,
                %phase,
                "pressure iteration"
            );

            if phase == PhaseRegion::SinglePhase {
                let reason = FailureReason::SinglePhase {
                    iteration,
                    roots: roots.len(),
                };
                tracing::warn!(substance, t, %reason, "pressure search stopped");
                return Ok(self.finish(substance, t, SearchOutcome::Failed(reason), records));
            }

            if converged {
                tracing::info!(substance, t, pressure = p, iteration, "pressure search converged");
                return Ok(self.finish(
                    substance,
                    t,
                    SearchOutcome::Converged { pressure: p },
                    records,
                ));
            }

            let next = p * (phi_zl / phi_zv);
            if iteration < opts.max_iterations && (!next.is_finite() || next <= 0.0) {
                let reason = FailureReason::NonPhysicalPressure {
                    iteration: iteration + 1,
                    pressure: next,
                };
                tracing::warn!(substance, t, %reason, "pressure search stopped");
                return Ok(self.finish(substance, t, SearchOutcome::Failed(reason), records));
            }
            p = next;
        }

        tracing::warn!(
            substance,
            t,
            max_iterations = opts.max_iterations,
            "pressure search exhausted its iteration budget"
        );
        Ok(self.finish(substance, t, SearchOutcome::Exhausted, records))
    }

    fn finish(
        &self,
        substance: &str,
        t: f64,
        outcome: SearchOutcome,
        records: Vec<IterationRecord>,
    ) -> PressureSearch {
        PressureSearch {
            substance: substance.to_string(),
            temperature: t,
            outcome,
            records,
        }
    }
}

/// Equilibrium pressure of `substance` at `t` [K] with the canonical model.
pub fn find_equilibrium_pressure<L: SubstanceLookup + ?Sized>(
    lookup: &L,
    t: f64,
    substance: &str,
    options: &SolverOptions,
) -> EosResult<PressureSearch> {
    VaporPressureSolver::new(ParameterModel::default(), *options)?.find(lookup, t, substance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const METHANE: SubstanceParameters = SubstanceParameters {
        tc: 190.6,
        pc: 4.6e6,
        omega: 0.011,
    };

    fn solver() -> VaporPressureSolver {
        VaporPressureSolver::default()
    }

    #[test]
    fn methane_converges() {
        let search = solver().solve("methane", &METHANE, 150.0).unwrap();
        assert!(search.is_converged());
        let p = search.equilibrium_pressure().unwrap();
        assert_relative_eq!(p, 1.046_533_9e6, max_relative = 1e-5);

        let last = search.last_record().unwrap();
        assert!(last.converged);
        assert_eq!(last.phase, PhaseRegion::TwoPhase);
        assert!(last.zv > last.zl);
        assert!(last.fugacity_gap() < 1e-6);
        assert_eq!(last.p, p);
        assert!(search.records[..search.iterations() - 1]
            .iter()
            .all(|r| !r.converged));
    }

    #[test]
    fn iterations_are_numbered_from_one() {
        let search = solver().solve("methane", &METHANE, 150.0).unwrap();
        for (i, record) in search.records.iter().enumerate() {
            assert_eq!(record.iteration as usize, i + 1);
        }
        assert_eq!(search.records[0].p, 1.0e6);
    }

    #[test]
    fn small_budget_exhausts() {
        let solver = solver()
            .with_options(SolverOptions::default().with_max_iterations(3))
            .unwrap();
        let search = solver.solve("methane", &METHANE, 150.0).unwrap();
        assert_eq!(search.outcome, SearchOutcome::Exhausted);
        assert_eq!(search.iterations(), 3);
        assert!(search.equilibrium_pressure().is_none());
    }

    #[test]
    fn supercritical_temperature_is_single_phase() {
        let search = solver().solve("methane", &METHANE, 250.0).unwrap();
        assert_eq!(
            search.outcome,
            SearchOutcome::Failed(FailureReason::SinglePhase {
                iteration: 1,
                roots: 1
            })
        );
        let record = search.last_record().unwrap();
        assert_eq!(record.phase, PhaseRegion::SinglePhase);
        assert!(!record.converged);
        assert_eq!(record.zv, record.zl);
    }

    #[test]
    fn bad_temperature_is_an_error() {
        assert!(matches!(
            solver().solve("methane", &METHANE, 0.0),
            Err(EosError::Domain { .. })
        ));
    }

    #[test]
    fn invalid_options_rejected() {
        assert!(matches!(
            solver().with_options(SolverOptions::default().with_tolerance(-1.0)),
            Err(EosError::InvalidOptions { .. })
        ));
    }

    #[test]
    fn equilibrium_pressure_in_uom() {
        use uom::si::pressure::kilopascal;
        let search = solver().solve("methane", &METHANE, 150.0).unwrap();
        let p = search.equilibrium_pressure_si().unwrap();
        assert_relative_eq!(p.get::<kilopascal>(), 1_046.533_9, max_relative = 1e-5);
    }
}
