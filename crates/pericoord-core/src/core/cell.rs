use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CellError {
    #[error("Cell half-length along axis {axis} must be positive, got {value}")]
    NonPositiveHalfLength { axis: usize, value: f64 },
}

/// An orthorhombic (axis-aligned rectangular) periodic simulation cell,
/// described by one half-length per axis.
///
/// Wrapped coordinates live in `[0, 2·half)` on each axis. The kernel assumes
/// every half-length is at least as large as any physically meaningful
/// cutoff/2; otherwise minimum-image displacements are ambiguous. That
/// invariant belongs to the caller and is not checked per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationCell {
    half_lengths: Vector3<f64>,
}

impl SimulationCell {
    /// Creates a cell from per-axis half-lengths.
    ///
    /// Fails if any half-length is not strictly positive.
    pub fn new(half_lengths: Vector3<f64>) -> Result<Self, CellError> {
        for (axis, &value) in half_lengths.iter().enumerate() {
            if value <= 0.0 {
                return Err(CellError::NonPositiveHalfLength { axis, value });
            }
        }
        Ok(Self { half_lengths })
    }

    /// Creates a cell from per-axis full edge lengths.
    pub fn from_full_lengths(full_lengths: Vector3<f64>) -> Result<Self, CellError> {
        Self::new(full_lengths / 2.0)
    }

    #[inline]
    pub fn half_lengths(&self) -> &Vector3<f64> {
        &self.half_lengths
    }

    #[inline]
    pub fn full_lengths(&self) -> Vector3<f64> {
        self.half_lengths * 2.0
    }

    /// Folds a coordinate back into the primary cell `[0, 2·half)`, one axis
    /// at a time.
    ///
    /// This is a single-step correction, not a general modulo: it assumes the
    /// input is at most one box length outside the primary cell and will not
    /// fully wrap a coordinate that has drifted further.
    pub fn wrap_position(&self, position: &mut Point3<f64>) {
        for i in 0..3 {
            let full = 2.0 * self.half_lengths[i];
            if position[i] < 0.0 {
                position[i] += full;
            } else if position[i] >= full {
                position[i] -= full;
            }
        }
    }

    /// Shortest periodic displacement `to − from` under the minimum-image
    /// convention.
    ///
    /// Each component is folded by one full box length when it exceeds the
    /// half-length in magnitude. Valid when the true per-axis separation never
    /// exceeds one full box length (the standard convention, satisfied when
    /// cutoffs are no larger than half the box).
    pub fn minimum_image(&self, from: &Point3<f64>, to: &Point3<f64>) -> Vector3<f64> {
        let mut displacement = to - from;
        for i in 0..3 {
            if displacement[i] > self.half_lengths[i] {
                displacement[i] -= 2.0 * self.half_lengths[i];
            } else if displacement[i] < -self.half_lengths[i] {
                displacement[i] += 2.0 * self.half_lengths[i];
            }
        }
        displacement
    }
}
