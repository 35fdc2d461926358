//! Circulation solve on top of nalgebra's LU decomposition

use super::influence::InfluenceMatrices;
use crate::error::{Result, VlmError};
use nalgebra::{DMatrix, DVector, Dyn, LU};
use serde::{Deserialize, Serialize};

/// Smallest accepted ratio between the smallest and largest pivot magnitude
const MIN_PIVOT_RATIO: f64 = 1e-13;

/// Per-panel output of one solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Circulation Γ of every body panel
    pub circulation: DVector<f64>,
    /// Induced downwash `b · Γ` at every collocation point
    pub downwash: DVector<f64>,
}

/// Factorised system matrix plus the downwash matrix
///
/// The factorisation is computed once and reused for every right-hand side,
/// which is what the time-marching loop needs.
pub struct CirculationSolver {
    lu: LU<f64, Dyn, Dyn>,
    downwash: DMatrix<f64>,
    size: usize,
}

impl CirculationSolver {
    /// Factorise `a`
    ///
    /// # Errors
    /// Returns `SingularSystem` if the matrix is not square, has a zero pivot
    /// or its pivots span more than `1 / MIN_PIVOT_RATIO`
    pub fn new(matrices: InfluenceMatrices) -> Result<Self> {
        let size = matrices.size();
        if !matrices.a.is_square() || matrices.b.shape() != matrices.a.shape() || size == 0 {
            return Err(VlmError::SingularSystem { size });
        }

        let lu = matrices.a.lu();
        if !lu.is_invertible() {
            return Err(VlmError::SingularSystem { size });
        }

        let pivots = lu.u().diagonal().map(f64::abs);
        let (min, max) = (pivots.min(), pivots.max());
        if !(min.is_finite() && max.is_finite()) || min < MIN_PIVOT_RATIO * max {
            return Err(VlmError::SingularSystem { size });
        }

        Ok(Self {
            lu,
            downwash: matrices.b,
            size,
        })
    }

    /// Dimension of the system
    pub fn size(&self) -> usize {
        self.size
    }

    /// Solve `a · Γ = rhs` and compute `w = b · Γ`
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for a right-hand side of the wrong
    /// length and `SingularSystem` if the solve fails or yields non-finite
    /// circulation
    pub fn solve(&self, rhs: &DVector<f64>) -> Result<SolveResult> {
        if rhs.len() != self.size {
            return Err(VlmError::invalid_parameter(
                "rhs",
                &format!("expected length {}, got {}", self.size, rhs.len()),
            ));
        }

        let circulation = self
            .lu
            .solve(rhs)
            .ok_or(VlmError::SingularSystem { size: self.size })?;
        if !circulation.iter().all(|g| g.is_finite()) {
            return Err(VlmError::SingularSystem { size: self.size });
        }

        let downwash = &self.downwash * &circulation;
        Ok(SolveResult {
            circulation,
            downwash,
        })
    }
}
