//! Butcher tableau coefficient data.

use crate::error::{SimError, SimResult};
use nalgebra::{DMatrix, DVector};

/// Butcher tableau (A, b) defining a Runge-Kutta method.
///
/// `a` is the s-by-s stage coupling matrix, `b` the length-s weight vector.
/// Immutable once constructed; one tableau can be shared read-only across
/// any number of integration runs.
#[derive(Clone, Debug)]
pub struct ButcherTableau {
    a: DMatrix<f64>,
    b: DVector<f64>,
}

impl ButcherTableau {
    /// Validate and build a tableau.
    ///
    /// Fails with [`SimError::InvalidTableau`] when `a` is not square, `b`
    /// does not match the stage count, the stage count is zero, or any
    /// coefficient is non-finite.
    pub fn new(a: DMatrix<f64>, b: DVector<f64>) -> SimResult<Self> {
        if a.nrows() != a.ncols() {
            return Err(SimError::InvalidTableau {
                what: format!("A must be square (got {}x{})", a.nrows(), a.ncols()),
            });
        }
        if a.nrows() == 0 {
            return Err(SimError::InvalidTableau {
                what: "tableau must have at least one stage".to_string(),
            });
        }
        if b.len() != a.nrows() {
            return Err(SimError::InvalidTableau {
                what: format!(
                    "b length {} does not match stage count {}",
                    b.len(),
                    a.nrows()
                ),
            });
        }
        if a.iter().any(|v| !v.is_finite()) || b.iter().any(|v| !v.is_finite()) {
            return Err(SimError::InvalidTableau {
                what: "coefficients must be finite".to_string(),
            });
        }

        Ok(Self { a, b })
    }

    /// Number of stages s.
    pub fn stages(&self) -> usize {
        self.b.len()
    }

    /// Stage coupling coefficient A[i, j].
    pub fn a(&self, i: usize, j: usize) -> f64 {
        self.a[(i, j)]
    }

    /// Stage weight b[i].
    pub fn b(&self, i: usize) -> f64 {
        self.b[i]
    }

    /// Whether A is strictly lower-triangular, i.e. stage i depends only on
    /// stages 0..i. Required by the explicit stepper.
    pub fn is_strictly_lower_triangular(&self) -> bool {
        let s = self.stages();
        for i in 0..s {
            for j in i..s {
                if self.a[(i, j)] != 0.0 {
                    return false;
                }
            }
        }
        true
    }
}
