//! Named Runge-Kutta method presets.
//!
//! Pure coefficient data: each factory builds the method's Butcher tableau
//! and returns a ready-to-use stepper bound to it.

use crate::error::SimResult;
use crate::explicit::ExplicitRungeKutta;
use crate::implicit::ImplicitRungeKutta;
use crate::tableau::ButcherTableau;
use nalgebra::{DMatrix, DVector};

/// Explicit Euler (order 1).
pub fn explicit_euler() -> SimResult<ExplicitRungeKutta> {
    let tableau = ButcherTableau::new(DMatrix::zeros(1, 1), DVector::from_element(1, 1.0))?;
    ExplicitRungeKutta::new(tableau)
}

/// Explicit trapezoidal rule, also known as Heun's method (order 2).
pub fn explicit_trapezoidal() -> SimResult<ExplicitRungeKutta> {
    let a = DMatrix::from_row_slice(2, 2, &[0.0, 0.0, 1.0, 0.0]);
    let b = DVector::from_vec(vec![0.5, 0.5]);
    ExplicitRungeKutta::new(ButcherTableau::new(a, b)?)
}

/// Explicit midpoint rule (order 2).
pub fn explicit_midpoint() -> SimResult<ExplicitRungeKutta> {
    let a = DMatrix::from_row_slice(2, 2, &[0.0, 0.0, 0.5, 0.0]);
    let b = DVector::from_vec(vec![0.0, 1.0]);
    ExplicitRungeKutta::new(ButcherTableau::new(a, b)?)
}

/// Classical 4th-order Runge-Kutta.
pub fn classical_rk4() -> SimResult<ExplicitRungeKutta> {
    #[rustfmt::skip]
    let a = DMatrix::from_row_slice(4, 4, &[
        0.0, 0.0, 0.0, 0.0,
        0.5, 0.0, 0.0, 0.0,
        0.0, 0.5, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
    ]);
    let b = DVector::from_vec(vec![1.0 / 6.0, 2.0 / 6.0, 2.0 / 6.0, 1.0 / 6.0]);
    ExplicitRungeKutta::new(ButcherTableau::new(a, b)?)
}

/// Kutta's 3/8 rule (order 4).
pub fn kutta_three_eighths() -> SimResult<ExplicitRungeKutta> {
    #[rustfmt::skip]
    let a = DMatrix::from_row_slice(4, 4, &[
        0.0,        0.0, 0.0, 0.0,
        1.0 / 3.0,  0.0, 0.0, 0.0,
        -1.0 / 3.0, 1.0, 0.0, 0.0,
        1.0,       -1.0, 1.0, 0.0,
    ]);
    let b = DVector::from_vec(vec![1.0 / 8.0, 3.0 / 8.0, 3.0 / 8.0, 1.0 / 8.0]);
    ExplicitRungeKutta::new(ButcherTableau::new(a, b)?)
}

/// Implicit (backward) Euler: L-stable, order 1.
pub fn implicit_euler() -> SimResult<ImplicitRungeKutta> {
    let tableau = ButcherTableau::new(
        DMatrix::from_element(1, 1, 1.0),
        DVector::from_element(1, 1.0),
    )?;
    Ok(ImplicitRungeKutta::new(tableau))
}

/// Implicit midpoint rule: A-stable, symplectic, order 2.
pub fn implicit_midpoint() -> SimResult<ImplicitRungeKutta> {
    let tableau = ButcherTableau::new(
        DMatrix::from_element(1, 1, 0.5),
        DVector::from_element(1, 1.0),
    )?;
    Ok(ImplicitRungeKutta::new(tableau))
}

/// Radau IIA, 2 stages, order 3. L-stable.
pub fn radau_iia_order3() -> SimResult<ImplicitRungeKutta> {
    #[rustfmt::skip]
    let a = DMatrix::from_row_slice(2, 2, &[
        5.0 / 12.0, -1.0 / 12.0,
        3.0 / 4.0,   1.0 / 4.0,
    ]);
    let b = DVector::from_vec(vec![3.0 / 4.0, 1.0 / 4.0]);
    Ok(ImplicitRungeKutta::new(ButcherTableau::new(a, b)?))
}

/// Radau IIA, 3 stages, order 5. L-stable.
pub fn radau_iia_order5() -> SimResult<ImplicitRungeKutta> {
    let sq6 = 6.0_f64.sqrt();
    #[rustfmt::skip]
    let a = DMatrix::from_row_slice(3, 3, &[
        (88.0 - 7.0 * sq6) / 360.0,    (296.0 - 169.0 * sq6) / 1800.0, (-2.0 + 3.0 * sq6) / 225.0,
        (296.0 + 169.0 * sq6) / 1800.0, (88.0 + 7.0 * sq6) / 360.0,    (-2.0 - 3.0 * sq6) / 225.0,
        (16.0 - sq6) / 36.0,            (16.0 + sq6) / 36.0,            1.0 / 9.0,
    ]);
    let b = DVector::from_vec(vec![(16.0 - sq6) / 36.0, (16.0 + sq6) / 36.0, 1.0 / 9.0]);
    Ok(ImplicitRungeKutta::new(ButcherTableau::new(a, b)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rk_core::{Tolerances, nearly_equal};

    fn weights_sum(tableau: &ButcherTableau) -> f64 {
        (0..tableau.stages()).map(|i| tableau.b(i)).sum()
    }

    #[test]
    fn explicit_presets_are_consistent() {
        let tol = Tolerances::default();
        for stepper in [
            explicit_euler().unwrap(),
            explicit_trapezoidal().unwrap(),
            explicit_midpoint().unwrap(),
            classical_rk4().unwrap(),
            kutta_three_eighths().unwrap(),
        ] {
            // Consistency: stage weights sum to one
            assert!(nearly_equal(weights_sum(stepper.tableau()), 1.0, tol));
            assert!(stepper.tableau().is_strictly_lower_triangular());
        }
    }

    #[test]
    fn implicit_presets_are_consistent() {
        let tol = Tolerances::default();
        for stepper in [
            implicit_euler().unwrap(),
            implicit_midpoint().unwrap(),
            radau_iia_order3().unwrap(),
            radau_iia_order5().unwrap(),
        ] {
            assert!(nearly_equal(weights_sum(stepper.tableau()), 1.0, tol));
        }
    }

    #[test]
    fn classical_rk4_coefficients() {
        let stepper = classical_rk4().unwrap();
        let t = stepper.tableau();
        assert_eq!(t.stages(), 4);
        assert_eq!(t.a(1, 0), 0.5);
        assert_eq!(t.a(2, 1), 0.5);
        assert_eq!(t.a(3, 2), 1.0);
        assert_eq!(t.b(0), 1.0 / 6.0);
        assert_eq!(t.b(1), 1.0 / 3.0);
    }

    #[test]
    fn implicit_midpoint_uses_corrected_tableau() {
        // Single-stage midpoint: A = [1/2], b = [1] (not the backward Euler
        // coefficients).
        let stepper = implicit_midpoint().unwrap();
        assert_eq!(stepper.tableau().stages(), 1);
        assert_eq!(stepper.tableau().a(0, 0), 0.5);
        assert_eq!(stepper.tableau().b(0), 1.0);
    }

    #[test]
    fn radau_presets_are_stiffly_accurate() {
        // Radau IIA: the weight vector equals the last row of A.
        let tol = Tolerances::default();
        for stepper in [radau_iia_order3().unwrap(), radau_iia_order5().unwrap()] {
            let t = stepper.tableau();
            let s = t.stages();
            for j in 0..s {
                assert!(nearly_equal(t.a(s - 1, j), t.b(j), tol));
            }
        }
    }
}
