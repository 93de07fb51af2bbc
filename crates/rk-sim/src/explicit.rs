//! Explicit Runge-Kutta stepper.

use crate::error::{SimError, SimResult};
use crate::tableau::ButcherTableau;
use crate::trajectory::Trajectory;
use crate::{check_run_args, check_state};
use nalgebra::DVector;
use tracing::debug;

/// Fixed-step explicit Runge-Kutta integrator for dy/dt = f(y).
///
/// Requires a strictly lower-triangular tableau: stage i then depends only
/// on the increments of stages 0..i, so stages resolve sequentially without
/// any nonlinear solve.
#[derive(Clone, Debug)]
pub struct ExplicitRungeKutta {
    tableau: ButcherTableau,
}

impl ExplicitRungeKutta {
    /// Build an explicit stepper from a tableau.
    ///
    /// Fails with [`SimError::InvalidTableau`] when A is not strictly
    /// lower-triangular.
    pub fn new(tableau: ButcherTableau) -> SimResult<Self> {
        if !tableau.is_strictly_lower_triangular() {
            return Err(SimError::InvalidTableau {
                what: "explicit method requires strictly lower-triangular A".to_string(),
            });
        }
        Ok(Self { tableau })
    }

    pub fn tableau(&self) -> &ButcherTableau {
        &self.tableau
    }

    /// Integrate dy/dt = f(y) from `y0` over `[0, time]` in `steps` equal
    /// steps. Returns the full trajectory of `steps + 1` states, the first
    /// being a copy of `y0`.
    pub fn solve<F>(
        &self,
        f: F,
        time: f64,
        y0: &DVector<f64>,
        steps: usize,
    ) -> SimResult<Trajectory>
    where
        F: Fn(&DVector<f64>) -> DVector<f64>,
    {
        let h = check_run_args(time, y0, steps)?;
        let s = self.tableau.stages();

        let mut trajectory = Trajectory::with_capacity(steps + 1);
        let mut y = y0.clone();
        trajectory.push(0.0, y.clone());

        // Stage increments k_i = f(arg_i); one buffer reused across steps.
        let mut increments: Vec<DVector<f64>> = Vec::with_capacity(s);

        for step in 0..steps {
            increments.clear();

            for i in 0..s {
                // arg_i = y + h * sum_{j<i} A[i,j] * k_j
                let mut arg = y.clone();
                for (j, k) in increments.iter().enumerate() {
                    let a = self.tableau.a(i, j);
                    if a != 0.0 {
                        arg += (h * a) * k;
                    }
                }
                increments.push(f(&arg));
            }

            // y_next = y + h * sum_i b[i] * k_i
            for (i, k) in increments.iter().enumerate() {
                let w = self.tableau.b(i);
                if w != 0.0 {
                    y += (h * w) * k;
                }
            }
            check_state(&y, step + 1)?;

            // Time point from the index, not accumulation, so the final
            // entry lands on `time` within machine epsilon.
            trajectory.push((step + 1) as f64 * h, y.clone());
        }

        debug!(steps, stages = s, "explicit integration complete");
        Ok(trajectory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods;
    use nalgebra::DMatrix;
    use proptest::prelude::*;

    #[test]
    fn rejects_non_lower_triangular() {
        let tableau = ButcherTableau::new(
            DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 0.0, 0.0]),
            DVector::from_vec(vec![0.5, 0.5]),
        )
        .unwrap();
        let err = ExplicitRungeKutta::new(tableau).unwrap_err();
        assert!(matches!(err, SimError::InvalidTableau { .. }));
    }

    #[test]
    fn rejects_zero_steps() {
        let stepper = methods::classical_rk4().unwrap();
        let y0 = DVector::from_vec(vec![1.0]);
        let err = stepper.solve(|y| -y, 1.0, &y0, 0).unwrap_err();
        assert!(matches!(err, SimError::InvalidArg { .. }));
    }

    #[test]
    fn rejects_non_positive_time() {
        let stepper = methods::classical_rk4().unwrap();
        let y0 = DVector::from_vec(vec![1.0]);
        assert!(stepper.solve(|y| -y, 0.0, &y0, 10).is_err());
        assert!(stepper.solve(|y| -y, -1.0, &y0, 10).is_err());
        assert!(stepper.solve(|y| -y, f64::NAN, &y0, 10).is_err());
    }

    #[test]
    fn rejects_empty_state() {
        let stepper = methods::explicit_euler().unwrap();
        let y0 = DVector::zeros(0);
        assert!(stepper.solve(|y| y.clone(), 1.0, &y0, 10).is_err());
    }

    #[test]
    fn trajectory_starts_with_initial_state() {
        let stepper = methods::classical_rk4().unwrap();
        let y0 = DVector::from_vec(vec![2.0, -3.0]);
        let traj = stepper.solve(|y| -y, 1.0, &y0, 25).unwrap();

        assert_eq!(traj.len(), 26);
        assert_eq!(traj.y[0], y0);
        assert_eq!(traj.t[0], 0.0);
        assert!((traj.t.last().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_rhs_is_exact() {
        // dy/dt = c => y(T) = y0 + c*T, exact for every RK method
        let stepper = methods::explicit_trapezoidal().unwrap();
        let y0 = DVector::from_vec(vec![1.0]);
        let traj = stepper
            .solve(|_y| DVector::from_vec(vec![3.0]), 2.0, &y0, 10)
            .unwrap();

        assert!((traj.final_state().unwrap()[0] - 7.0).abs() < 1e-12);
    }

    #[test]
    fn non_finite_state_aborts() {
        let stepper = methods::explicit_euler().unwrap();
        let y0 = DVector::from_vec(vec![1.0]);
        let err = stepper
            .solve(|_y| DVector::from_vec(vec![f64::NAN]), 1.0, &y0, 4)
            .unwrap_err();
        assert!(matches!(err, SimError::NonFinite { step: 1 }));
    }

    proptest! {
        #[test]
        fn trajectory_length_and_identity(
            steps in 1usize..40,
            y0 in proptest::collection::vec(-10.0f64..10.0, 1..4),
        ) {
            let stepper = methods::explicit_euler().unwrap();
            let y0 = DVector::from_vec(y0);
            let traj = stepper.solve(|y| -y, 1.0, &y0, steps).unwrap();

            prop_assert_eq!(traj.len(), steps + 1);
            prop_assert_eq!(&traj.y[0], &y0);
        }
    }
}
