//! Error types for integration runs.

use crate::trajectory::Trajectory;
use rk_core::RkError;
use rk_solver::SolverError;
use thiserror::Error;

/// Errors encountered while constructing a stepper or integrating.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid tableau: {what}")]
    InvalidTableau { what: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-finite state at step {step}")]
    NonFinite { step: usize },

    /// An implicit stage solve failed. Carries the trajectory computed up to
    /// the failing step so callers can distinguish a mid-run abort from a
    /// completed integration.
    #[error("Implicit step {step} failed: {source}")]
    StepFailed {
        step: usize,
        partial: Trajectory,
        source: SolverError,
    },

    #[error(transparent)]
    Core(#[from] RkError),
}

pub type SimResult<T> = Result<T, SimError>;
