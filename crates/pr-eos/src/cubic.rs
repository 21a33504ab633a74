//! Compressibility-factor cubic.
//!
//! Solves `Z³ − (1−B)Z² + (A−3B²−2B)Z − (AB−B²−B³) = 0` in closed form
//! (Cardano for one real root, the trigonometric form for three), polishes
//! each root with a guarded Newton step and returns the distinct real roots
//! sorted in descending order.

use std::f64::consts::PI;

/// Roots closer than this are reported once.
pub const ROOT_DEDUP_TOLERANCE: f64 = 1e-10;

/// Relative size of the discriminant below which the three-root form is used.
///
/// Keeps double roots from being lost to round-off in the discriminant.
const DISCRIMINANT_REL_TOL: f64 = 1e-12;

const NEWTON_POLISH_STEPS: usize = 3;

/// Monic coefficients `[c2, c1, c0]` of the cubic in `Z`.
pub fn coefficients(big_a: f64, big_b: f64) -> [f64; 3] {
    let b2 = big_b * big_b;
    [
        -(1.0 - big_b),
        big_a - 3.0 * b2 - 2.0 * big_b,
        -(big_a * big_b - b2 - b2 * big_b),
    ]
}

/// Value of the cubic at `z`.
pub fn residual(z: f64, big_a: f64, big_b: f64) -> f64 {
    let [c2, c1, c0] = coefficients(big_a, big_b);
    ((z + c2) * z + c1) * z + c0
}

/// Distinct real roots of the compressibility cubic, largest first.
///
/// Holds one to three roots. With three, the first is the vapor-like root
/// and the last the liquid-like root; the middle one is never used.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressibilityRoots {
    roots: Vec<f64>,
}

impl CompressibilityRoots {
    pub fn as_slice(&self) -> &[f64] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Both phases are available only with three distinct roots.
    pub fn is_two_phase(&self) -> bool {
        self.roots.len() == 3
    }

    /// Largest root.
    pub fn largest(&self) -> Option<f64> {
        self.roots.first().copied()
    }

    /// Smallest root.
    pub fn smallest(&self) -> Option<f64> {
        self.roots.last().copied()
    }

    /// `(Zv, Zl)` when three distinct roots exist.
    pub fn vapor_liquid(&self) -> Option<(f64, f64)> {
        self.is_two_phase().then(|| (self.roots[0], self.roots[2]))
    }
}

/// Solve the compressibility cubic for `(A, B)`.
pub fn compressibility_roots(big_a: f64, big_b: f64) -> CompressibilityRoots {
    let [c2, c1, c0] = coefficients(big_a, big_b);

    // Depressed cubic t³ + p·t + q = 0 with Z = t − c2/3.
    let shift = -c2 / 3.0;
    let p = c1 - c2 * c2 / 3.0;
    let q = 2.0 * c2 * c2 * c2 / 27.0 - c2 * c1 / 3.0 + c0;

    let half_q = q / 2.0;
    let third_p = p / 3.0;
    let discriminant = half_q * half_q + third_p * third_p * third_p;
    let scale = half_q * half_q + third_p.abs().powi(3);

    let depressed: Vec<f64> = if discriminant > DISCRIMINANT_REL_TOL * scale {
        let sqrt_disc = discriminant.sqrt();
        vec![(-half_q + sqrt_disc).cbrt() + (-half_q - sqrt_disc).cbrt()]
    } else if third_p >= 0.0 {
        // Triple root (p = q = 0 up to round-off).
        vec![(-q).cbrt()]
    } else {
        let m = 2.0 * (-third_p).sqrt();
        let cos_arg = (3.0 * q / (p * m)).clamp(-1.0, 1.0);
        let theta = cos_arg.acos() / 3.0;
        (0..3)
            .map(|k| m * (theta - 2.0 * PI * k as f64 / 3.0).cos())
            .collect()
    };

    let mut roots: Vec<f64> = depressed
        .into_iter()
        .map(|t| polish(t + shift, c2, c1, c0))
        .filter(|z| z.is_finite())
        .collect();

    roots.sort_by(|a, b| b.total_cmp(a));
    roots.dedup_by(|lower, upper| (*upper - *lower).abs() <= ROOT_DEDUP_TOLERANCE);

    CompressibilityRoots { roots }
}

/// Newton refinement that only accepts steps reducing the residual.
fn polish(mut z: f64, c2: f64, c1: f64, c0: f64) -> f64 {
    let f = |z: f64| ((z + c2) * z + c1) * z + c0;
    for _ in 0..NEWTON_POLISH_STEPS {
        let fz = f(z);
        let dfz = (3.0 * z + 2.0 * c2) * z + c1;
        if fz == 0.0 || dfz == 0.0 || !dfz.is_finite() {
            break;
        }
        let candidate = z - fz / dfz;
        if f(candidate).abs() < fz.abs() {
            z = candidate;
        } else {
            break;
        }
    }
    z
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn three_roots_for_subcritical_methane() {
        let roots = compressibility_roots(0.174_991_272_400_265, 0.021_490_840_579_710);
        assert_eq!(roots.len(), 3);
        let (zv, zl) = roots.vapor_liquid().unwrap();
        assert_abs_diff_eq!(zv, 0.825_011_256_140_813, epsilon = 1e-9);
        assert_abs_diff_eq!(zl, 0.033_115_512_364_297, epsilon = 1e-9);
        assert_abs_diff_eq!(
            roots.as_slice()[1],
            0.120_382_390_915_180,
            epsilon = 1e-9
        );
    }

    #[test]
    fn single_root_for_supercritical_state() {
        let roots = compressibility_roots(0.5, 0.1);
        assert_eq!(roots.len(), 1);
        assert!(!roots.is_two_phase());
        assert!(roots.vapor_liquid().is_none());
        assert_abs_diff_eq!(
            roots.largest().unwrap(),
            0.528_942_848_510_667,
            epsilon = 1e-9
        );
        assert_eq!(roots.largest(), roots.smallest());
    }

    #[test]
    fn zero_a_and_b_collapse_to_two_roots() {
        // Z³ − Z² = 0 has roots {1, 0, 0}.
        let roots = compressibility_roots(0.0, 0.0);
        assert_eq!(roots.len(), 2);
        assert_abs_diff_eq!(roots.largest().unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(roots.smallest().unwrap(), 0.0, epsilon = 1e-12);
        assert!(!roots.is_two_phase());
    }

    #[test]
    fn near_critical_point_roots_cluster() {
        // At Tr = Pr = 1 the three roots nearly coincide.
        let (a, b) = (0.45724, 0.0778);
        let roots = compressibility_roots(a, b);
        assert!(!roots.is_empty());
        for &z in roots.as_slice() {
            assert_abs_diff_eq!(z, 0.32, epsilon = 0.05);
            assert_abs_diff_eq!(residual(z, a, b), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn residual_vanishes_at_roots() {
        for (a, b) in [(0.175, 0.0215), (0.5, 0.1), (0.01, 0.001), (2.0, 0.2)] {
            for &z in compressibility_roots(a, b).as_slice() {
                assert_abs_diff_eq!(residual(z, a, b), 0.0, epsilon = 1e-9);
            }
        }
    }
}
