//! Error types for the nonlinear solver.

use thiserror::Error;

/// Errors that can occur while solving a nonlinear system.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Newton iteration did not converge: {what}")]
    NonConvergence { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;
