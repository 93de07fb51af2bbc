//! Fixed-step Runge-Kutta integration engine driven by Butcher tableaux.
//!
//! Any explicit or implicit RK scheme can be plugged in by supplying its
//! tableau coefficients (A, b). Explicit schemes advance stages sequentially
//! from the strictly lower-triangular coupling; implicit schemes resolve the
//! coupled stage equations with a damped Newton iteration per step
//! (rk-solver). A library of named presets covers the common schemes from
//! explicit Euler up to Radau IIA order 5.

pub mod error;
pub mod explicit;
pub mod implicit;
pub mod methods;
pub mod tableau;
pub mod trajectory;

pub use error::{SimError, SimResult};
pub use explicit::ExplicitRungeKutta;
pub use implicit::ImplicitRungeKutta;
pub use tableau::ButcherTableau;
pub use trajectory::Trajectory;

use nalgebra::DVector;
use rk_core::ensure_finite;

/// Validate the shared integration arguments and return the step size h.
pub(crate) fn check_run_args(time: f64, y0: &DVector<f64>, steps: usize) -> SimResult<f64> {
    if steps == 0 {
        return Err(SimError::InvalidArg {
            what: "steps must be positive",
        });
    }
    ensure_finite(time, "time horizon")?;
    if time <= 0.0 {
        return Err(SimError::InvalidArg {
            what: "time horizon must be positive",
        });
    }
    if y0.is_empty() {
        return Err(SimError::InvalidArg {
            what: "initial state must not be empty",
        });
    }
    check_state(y0, 0)?;
    Ok(time / steps as f64)
}

/// NaN/Inf guard for the state produced at `step`.
pub(crate) fn check_state(y: &DVector<f64>, step: usize) -> SimResult<()> {
    if y.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SimError::NonFinite { step })
    }
}
