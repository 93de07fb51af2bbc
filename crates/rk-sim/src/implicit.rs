//! Implicit Runge-Kutta stepper.
//!
//! Each step solves the coupled stage system
//! `k_i = f(y + h * sum_j A[i,j] * k_j)` as one root-finding problem over
//! the stacked stage vector (dimension s*n), using the damped Newton
//! iteration from rk-solver.

use crate::error::{SimError, SimResult};
use crate::tableau::ButcherTableau;
use crate::trajectory::Trajectory;
use crate::{check_run_args, check_state};
use nalgebra::{DMatrix, DVector};
use rk_solver::{NewtonConfig, damped_newton};
use tracing::debug;

/// Fixed-step implicit Runge-Kutta integrator for dy/dt = f(y).
///
/// Accepts any square tableau; the caller must supply the Jacobian of f to
/// drive the per-step Newton solves.
pub struct ImplicitRungeKutta {
    tableau: ButcherTableau,
    newton: NewtonConfig,
}

impl ImplicitRungeKutta {
    /// Build an implicit stepper with the default Newton configuration.
    pub fn new(tableau: ButcherTableau) -> Self {
        Self {
            tableau,
            newton: NewtonConfig::default(),
        }
    }

    /// Replace the embedded Newton configuration.
    pub fn with_newton_config(mut self, newton: NewtonConfig) -> Self {
        self.newton = newton;
        self
    }

    pub fn tableau(&self) -> &ButcherTableau {
        &self.tableau
    }

    /// Integrate dy/dt = f(y) from `y0` over `[0, time]` in `steps` equal
    /// steps, with `jacobian` the n-by-n matrix of df/dy.
    ///
    /// A Newton failure at step k aborts the run with
    /// [`SimError::StepFailed`] carrying the trajectory computed so far.
    pub fn solve<F, J>(
        &self,
        f: F,
        jacobian: J,
        time: f64,
        y0: &DVector<f64>,
        steps: usize,
    ) -> SimResult<Trajectory>
    where
        F: Fn(&DVector<f64>) -> DVector<f64>,
        J: Fn(&DVector<f64>) -> DMatrix<f64>,
    {
        let h = check_run_args(time, y0, steps)?;
        let s = self.tableau.stages();
        let n = y0.len();

        let mut trajectory = Trajectory::with_capacity(steps + 1);
        let mut y = y0.clone();
        trajectory.push(0.0, y.clone());

        for step in 0..steps {
            // Explicit-Euler guess: every stage starts at f(y).
            let fy = f(&y);
            let mut guess = DVector::zeros(s * n);
            for i in 0..s {
                guess.rows_mut(i * n, n).copy_from(&fy);
            }

            // G(K)_i = K_i - f(y + h * sum_j A[i,j] * K_j)
            let g = |k: &DVector<f64>| -> DVector<f64> {
                let mut out = DVector::zeros(s * n);
                for i in 0..s {
                    let fi = f(&self.stage_argument(&y, h, i, k, n));
                    let mut row = out.rows_mut(i * n, n);
                    row.copy_from(&k.rows(i * n, n));
                    row -= fi;
                }
                out
            };

            // dG_i/dK_j = delta_ij * I - h * A[i,j] * Jf(arg_i)
            let jg = |k: &DVector<f64>| -> DMatrix<f64> {
                let mut m = DMatrix::identity(s * n, s * n);
                for i in 0..s {
                    let jf = jacobian(&self.stage_argument(&y, h, i, k, n));
                    for j in 0..s {
                        let a = self.tableau.a(i, j);
                        if a != 0.0 {
                            let mut block = m.view_mut((i * n, j * n), (n, n));
                            block -= (h * a) * &jf;
                        }
                    }
                }
                m
            };

            let stages = damped_newton(guess, g, jg, &self.newton).map_err(|source| {
                SimError::StepFailed {
                    step,
                    partial: trajectory.clone(),
                    source,
                }
            })?;

            // y_next = y + h * sum_i b[i] * k_i
            for i in 0..s {
                let w = self.tableau.b(i);
                if w != 0.0 {
                    y += (h * w) * stages.x.rows(i * n, n);
                }
            }
            check_state(&y, step + 1)?;
            trajectory.push((step + 1) as f64 * h, y.clone());
        }

        debug!(steps, stages = s, "implicit integration complete");
        Ok(trajectory)
    }

    /// arg_i = y + h * sum_j A[i,j] * K_j for the stacked stage vector `k`.
    fn stage_argument(
        &self,
        y: &DVector<f64>,
        h: f64,
        i: usize,
        k: &DVector<f64>,
        n: usize,
    ) -> DVector<f64> {
        let mut arg = y.clone();
        for j in 0..self.tableau.stages() {
            let a = self.tableau.a(i, j);
            if a != 0.0 {
                arg += (h * a) * k.rows(j * n, n);
            }
        }
        arg
    }
}
