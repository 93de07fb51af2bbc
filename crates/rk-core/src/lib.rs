//! rk-core: stable foundation for the Runge-Kutta stepping engine.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{RkError, RkResult};
pub use numeric::*;
