//! Finite difference Jacobian assembly.
//!
//! The steppers require a caller-supplied Jacobian; this helper lets callers
//! without an analytic one assemble it numerically.

use nalgebra::{DMatrix, DVector};

/// Approximate the Jacobian of `g` at `x` by forward finite differences.
///
/// Column j holds `(g(x + e_j * dx) - g(x)) / dx` with `dx` scaled by the
/// magnitude of `x[j]`.
pub fn forward_difference_jacobian<G>(x: &DVector<f64>, g: G, epsilon: f64) -> DMatrix<f64>
where
    G: Fn(&DVector<f64>) -> DVector<f64>,
{
    let n = x.len();
    let g_x = g(x);
    let m = g_x.len();

    let mut jac = DMatrix::zeros(m, n);

    for j in 0..n {
        let mut x_perturbed = x.clone();
        let dx = epsilon * x[j].abs().max(1.0);
        x_perturbed[j] += dx;

        let dg = (g(&x_perturbed) - &g_x) / dx;
        jac.set_column(j, &dg);
    }

    jac
}
