use crate::core::cell::SimulationCell;
use nalgebra::{Point3, Vector3};

/// Outcome of a cutoff-gated pair computation.
///
/// The squared separation is always measured, so the `Beyond` arm still
/// carries it; the derivative exists only within the cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairMeasure {
    /// The pair exceeds the cutoff.
    Beyond {
        /// Squared minimum-image separation of the pair.
        squared: f64,
    },
    /// The pair is within the cutoff.
    Within {
        /// Squared distance or distance, depending on the variant called.
        value: f64,
        /// Derivative of the value with respect to the position of the
        /// **second** particle of the pair. The first particle's derivative
        /// is the negation of this vector.
        derivative: Vector3<f64>,
    },
}

impl PairMeasure {
    #[inline]
    pub fn is_within(&self) -> bool {
        matches!(self, Self::Within { .. })
    }
}

/// Squared minimum-image distance between `ids[0]` and `ids[1]`, gated by a
/// squared-distance cutoff.
///
/// Within the cutoff the derivative is `2·Δ`, where `Δ` is the minimum-image
/// displacement from the first to the second particle.
pub fn squared_distance_with_derivative(
    ids: [usize; 2],
    positions: &[Point3<f64>],
    cell: &SimulationCell,
    cutoff_sq: f64,
) -> PairMeasure {
    let displacement = cell.minimum_image(&positions[ids[0]], &positions[ids[1]]);
    let squared = displacement.norm_squared();
    if squared > cutoff_sq {
        PairMeasure::Beyond { squared }
    } else {
        PairMeasure::Within {
            value: squared,
            derivative: 2.0 * displacement,
        }
    }
}

/// Minimum-image distance between `ids[0]` and `ids[1]`, gated by a squared
/// cutoff.
///
/// Shares its in/out-of-range decision with
/// [`squared_distance_with_derivative`] exactly; within the cutoff the value
/// is the square root of the squared variant's value and the derivative is
/// rescaled by `1/(2r)` (the chain rule for the square root). A zero distance
/// divides by zero; coincident particles are out of scope for recovery.
pub fn distance_with_derivative(
    ids: [usize; 2],
    positions: &[Point3<f64>],
    cell: &SimulationCell,
    cutoff_sq: f64,
) -> PairMeasure {
    match squared_distance_with_derivative(ids, positions, cell, cutoff_sq) {
        PairMeasure::Within { value, derivative } => {
            let dist = value.sqrt();
            PairMeasure::Within {
                value: dist,
                derivative: derivative / (2.0 * dist),
            }
        }
        beyond => beyond,
    }
}

/// Squared minimum-image distance, value only.
pub fn squared_distance(ids: [usize; 2], positions: &[Point3<f64>], cell: &SimulationCell) -> f64 {
    cell.minimum_image(&positions[ids[0]], &positions[ids[1]])
        .norm_squared()
}

/// Minimum-image distance, value only.
pub fn distance(ids: [usize; 2], positions: &[Point3<f64>], cell: &SimulationCell) -> f64 {
    squared_distance(ids, positions, cell).sqrt()
}
