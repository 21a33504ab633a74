//! Saturation curve: independent pressure searches over many temperatures.
//!
//! Each temperature is its own search with no shared mutable state, so the
//! searches run on the rayon pool. Results come back in input order.

use crate::equilibrium::{PressureSearch, VaporPressureSolver};
use crate::error::EosResult;
use crate::substance::{SubstanceLookup, resolve};
use crate::sweeps::SweepDefinition;
use rayon::prelude::*;

impl VaporPressureSolver {
    /// One [`PressureSearch`] per temperature [K], in the order given.
    ///
    /// The substance is resolved once, before any search starts.
    pub fn saturation_curve<L: SubstanceLookup + ?Sized>(
        &self,
        lookup: &L,
        substance: &str,
        temperatures: &[f64],
    ) -> EosResult<Vec<PressureSearch>> {
        let params = resolve(lookup, substance)?;
        let searches = temperatures
            .par_iter()
            .map(|&t| self.solve(substance, &params, t))
            .collect::<EosResult<Vec<_>>>()?;

        let converged = searches.iter().filter(|s| s.is_converged()).count();
        tracing::info!(
            substance,
            points = searches.len(),
            converged,
            "saturation curve complete"
        );
        Ok(searches)
    }

    pub fn saturation_sweep<L: SubstanceLookup + ?Sized>(
        &self,
        lookup: &L,
        substance: &str,
        sweep: &SweepDefinition,
    ) -> EosResult<Vec<PressureSearch>> {
        sweep.validate()?;
        self.saturation_curve(lookup, substance, &sweep.generate_points())
    }
}

#[cfg(test)]
mod tests {
    use crate::equilibrium::{FailureReason, SearchOutcome, VaporPressureSolver};
    use crate::error::EosError;
    use crate::substance::{SubstanceLookup, SubstanceParameters};

    struct Methane;

    impl SubstanceLookup for Methane {
        fn lookup(&self, name: &str) -> Option<SubstanceParameters> {
            name.eq_ignore_ascii_case("methane")
                .then_some(SubstanceParameters::new(190.6, 4.6e6, 0.011))
        }
    }

    #[test]
    fn results_keep_input_order() {
        let temps = [120.0, 150.0, 130.0, 250.0, 140.0];
        let curve = VaporPressureSolver::default()
            .saturation_curve(&Methane, "methane", &temps)
            .unwrap();
        assert_eq!(curve.len(), temps.len());
        for (search, &t) in curve.iter().zip(&temps) {
            assert_eq!(search.temperature, t);
        }
        assert!(matches!(
            curve[3].outcome,
            SearchOutcome::Failed(FailureReason::SinglePhase { .. })
        ));
    }

    #[test]
    fn parallel_matches_sequential() {
        let solver = VaporPressureSolver::default();
        let temps = [120.0, 130.0, 140.0, 150.0];
        let curve = solver.saturation_curve(&Methane, "methane", &temps).unwrap();
        for (search, &t) in curve.iter().zip(&temps) {
            let single = solver.find(&Methane, t, "methane").unwrap();
            assert_eq!(search, &single);
        }
    }

    #[test]
    fn unknown_substance_fails_up_front() {
        let err = VaporPressureSolver::default()
            .saturation_curve(&Methane, "unobtainium", &[150.0])
            .unwrap_err();
        assert!(matches!(err, EosError::SubstanceNotFound { .. }));
    }
}
