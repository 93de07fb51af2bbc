//! Damped Newton solver for nonlinear systems.
//!
//! This crate provides the root-finding layer of the stepping engine: a
//! simplified Newton iteration with step-halving globalization, used by the
//! implicit Runge-Kutta stepper to resolve coupled stage equations. The
//! Jacobian is supplied by the caller; a finite-difference helper is
//! available for assembling one.

pub mod error;
pub mod jacobian;
pub mod newton;

pub use error::{SolverError, SolverResult};
pub use jacobian::forward_difference_jacobian;
pub use newton::{NewtonConfig, NewtonResult, damped_newton};
