//! Damped Newton iteration with step-halving globalization.

use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector};
use rk_core::Tolerances;
use tracing::trace;

/// Damped Newton solver configuration.
pub struct NewtonConfig {
    /// Maximum outer iterations (hard termination safeguard)
    pub max_iterations: usize,
    /// Convergence tolerances on the correction norm
    pub tol: Tolerances,
    /// Smallest admissible damping factor
    pub min_damping: f64,
    /// Maximum damping halvings per outer iteration
    pub max_halvings: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tol: Tolerances::new(1e-8, 1e-7),
            min_damping: 1e-3,
            max_halvings: 20,
        }
    }
}

/// Converged Newton iteration result.
#[derive(Debug)]
pub struct NewtonResult {
    /// Solution vector
    pub x: DVector<f64>,
    /// Norm of the last accepted correction
    pub correction_norm: f64,
    /// Number of outer iterations
    pub iterations: usize,
}

/// Find `x` with `g(x) = 0` by a damped (simplified) Newton iteration.
///
/// Each outer iteration factorizes the Jacobian once and reuses the
/// factorization for the full correction and every damped trial correction.
/// The damping factor is halved until the trial correction satisfies the
/// monotone-decrease criterion `|d_trial| <= (1 - lambda/2) * |d|`, carried
/// over between iterations, and regrown by doubling after each accepted step.
///
/// Converges once the accepted correction norm drops below either tolerance
/// (`tol.rel * |x|` or `tol.abs`). Fails with [`SolverError::NonConvergence`]
/// when the damping budget or the outer iteration cap is exhausted, and with
/// [`SolverError::Numeric`] when the Jacobian factorization is singular.
pub fn damped_newton<G, J>(
    x0: DVector<f64>,
    g: G,
    jacobian: J,
    config: &NewtonConfig,
) -> SolverResult<NewtonResult>
where
    G: Fn(&DVector<f64>) -> DVector<f64>,
    J: Fn(&DVector<f64>) -> DMatrix<f64>,
{
    let mut x = x0;
    let mut lambda: f64 = 1.0;

    for iter in 0..config.max_iterations {
        // Factorize once per outer iteration; reused for the trial solves.
        let lu = jacobian(&x).lu();

        // Full Newton correction: J * d = g(x)
        let delta = lu
            .solve(&g(&x))
            .ok_or_else(|| SolverError::Numeric {
                what: format!("singular Jacobian at iteration {iter}"),
            })?;
        let delta_norm = delta.norm();
        if !delta_norm.is_finite() {
            return Err(SolverError::NonConvergence {
                what: format!("correction diverged at iteration {iter}"),
            });
        }

        // Halve lambda until the trial correction shrinks monotonically.
        let mut x_new;
        let mut trial_norm;
        let mut halvings = 0;
        loop {
            x_new = &x - lambda * &delta;
            let trial = lu
                .solve(&g(&x_new))
                .ok_or_else(|| SolverError::Numeric {
                    what: format!("singular Jacobian trial solve at iteration {iter}"),
                })?;
            trial_norm = trial.norm();

            if trial_norm.is_finite() && trial_norm <= (1.0 - 0.5 * lambda) * delta_norm {
                break;
            }

            lambda *= 0.5;
            halvings += 1;
            if lambda < config.min_damping || halvings > config.max_halvings {
                return Err(SolverError::NonConvergence {
                    what: format!(
                        "damping exhausted at iteration {iter} (lambda = {lambda:.3e})"
                    ),
                });
            }
        }

        // Commit the damped step and regrow the damping factor.
        x = x_new;
        lambda = (2.0 * lambda).min(1.0);

        trace!(iter, trial_norm, lambda, "accepted newton step");

        if trial_norm <= config.tol.rel * x.norm() || trial_norm <= config.tol.abs {
            return Ok(NewtonResult {
                x,
                correction_norm: trial_norm,
                iterations: iter + 1,
            });
        }
    }

    Err(SolverError::NonConvergence {
        what: format!("maximum iterations {} reached", config.max_iterations),
    })
}
