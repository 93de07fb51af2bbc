//! Trajectory recording for integration runs.

use nalgebra::DVector;

/// Record of an integration run: time points and state snapshots.
///
/// A completed run over N steps holds N + 1 entries; entry 0 is the
/// caller-supplied initial state (cloned, never aliased).
#[derive(Clone, Debug, Default)]
pub struct Trajectory {
    /// Time points
    pub t: Vec<f64>,
    /// State snapshots
    pub y: Vec<DVector<f64>>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            t: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, t: f64, y: DVector<f64>) {
        self.t.push(t);
        self.y.push(y);
    }

    /// Number of recorded states.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Last recorded state, if any.
    pub fn final_state(&self) -> Option<&DVector<f64>> {
        self.y.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_access() {
        let mut traj = Trajectory::with_capacity(2);
        assert!(traj.is_empty());

        traj.push(0.0, DVector::from_vec(vec![1.0, 2.0]));
        traj.push(0.5, DVector::from_vec(vec![3.0, 4.0]));

        assert_eq!(traj.len(), 2);
        assert_eq!(traj.t, vec![0.0, 0.5]);
        assert_eq!(traj.final_state().unwrap()[1], 4.0);
    }
}
