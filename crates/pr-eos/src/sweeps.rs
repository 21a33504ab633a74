//! Sweep point generation for isotherms and saturation curves.

use crate::error::{EosError, EosResult};
use pr_core::{Tolerances, nearly_equal};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spacing of sweep points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepType {
    Linear,
    Logarithmic,
}

/// A validated one-dimensional sweep in SI units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepDefinition {
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    pub fn new(start: f64, end: f64, num_points: usize, sweep_type: SweepType) -> EosResult<Self> {
        let sweep = Self {
            start,
            end,
            num_points,
            sweep_type,
        };
        sweep.validate()?;
        Ok(sweep)
    }

    pub fn linear(start: f64, end: f64, num_points: usize) -> EosResult<Self> {
        Self::new(start, end, num_points, SweepType::Linear)
    }

    pub fn logarithmic(start: f64, end: f64, num_points: usize) -> EosResult<Self> {
        Self::new(start, end, num_points, SweepType::Logarithmic)
    }

    pub fn validate(&self) -> EosResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(EosError::InvalidOptions {
                what: "sweep bounds must be finite",
            });
        }
        if self.num_points < 2 {
            return Err(EosError::InvalidOptions {
                what: "sweep must have at least 2 points",
            });
        }
        if nearly_equal(self.start, self.end, Tolerances::default()) {
            return Err(EosError::InvalidOptions {
                what: "sweep start and end must differ",
            });
        }
        if self.sweep_type == SweepType::Logarithmic && (self.start <= 0.0 || self.end <= 0.0) {
            return Err(EosError::InvalidOptions {
                what: "logarithmic sweep needs positive bounds",
            });
        }
        Ok(())
    }

    /// All points, with the endpoints reproduced exactly.
    pub fn generate_points(&self) -> Vec<f64> {
        let n = self.num_points;
        if n < 2 {
            return vec![self.start];
        }
        let last = (n - 1) as f64;
        let mut points: Vec<f64> = match self.sweep_type {
            SweepType::Linear => {
                let delta = (self.end - self.start) / last;
                (0..n).map(|i| self.start + i as f64 * delta).collect()
            }
            SweepType::Logarithmic => {
                let (lo, hi) = (self.start.ln(), self.end.ln());
                let delta = (hi - lo) / last;
                (0..n).map(|i| (lo + i as f64 * delta).exp()).collect()
            }
        };
        points[0] = self.start;
        points[n - 1] = self.end;
        points
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Logarithmic => write!(f, "logarithmic"),
        }
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {} ({} points, {})",
            self.start, self.end, self.num_points, self.sweep_type
        )
    }
}
