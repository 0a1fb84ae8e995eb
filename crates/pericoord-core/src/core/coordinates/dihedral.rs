use crate::core::cell::SimulationCell;
use crate::core::numeric::clamp_cosine;
use nalgebra::{Point3, Vector3};

/// A signed torsion angle with derivative vectors for the first three of its
/// four particles.
///
/// The torsion is taken about the bond between the third and fourth ids; the
/// chain implied by the displacement layout is
/// `ids[0]–ids[3]–ids[2]–ids[1]`, with the first and second ids as the outer
/// sites.
///
/// `derivatives[i]` is the gradient of the signed torsion (in radians) with
/// respect to the position of `ids[i]`, for `i` in `0..3`. The fourth
/// particle's vector is not materialized; it equals
/// `-(derivatives[0] + derivatives[1] + derivatives[2])`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DihedralMeasure {
    /// Signed torsion in degrees, in `(-180, 180]`.
    pub degrees: f64,
    pub derivatives: [Vector3<f64>; 3],
}

struct Frame {
    d03: Vector3<f64>,
    d23: Vector3<f64>,
    d12: Vector3<f64>,
    pb: Vector3<f64>,
    pc: Vector3<f64>,
}

impl Frame {
    fn build(ids: [usize; 4], positions: &[Point3<f64>], cell: &SimulationCell) -> Self {
        let d03 = cell.minimum_image(&positions[ids[3]], &positions[ids[0]]);
        let d23 = cell.minimum_image(&positions[ids[3]], &positions[ids[2]]);
        let d12 = cell.minimum_image(&positions[ids[2]], &positions[ids[1]]);

        // Plane normals about the central bond.
        let pb = d03.cross(&d23);
        let pc = d12.cross(&d23);
        Self {
            d03,
            d23,
            d12,
            pb,
            pc,
        }
    }

    /// Signed torsion in degrees. `acos` alone only covers `[0, 180]`; the
    /// projection of the first normal onto the non-central outer displacement
    /// disambiguates the sign, giving `(-180, 180]`.
    fn signed_degrees(&self) -> f64 {
        let cos_theta =
            clamp_cosine(self.pb.dot(&self.pc) / (self.pb.norm() * self.pc.norm()));
        let theta = cos_theta.acos().to_degrees();
        if self.pb.dot(&self.d12) > 0.0 {
            -theta
        } else {
            theta
        }
    }
}

/// Signed torsion about the `ids[3]–ids[2]` bond with derivatives for the
/// first three particles. Always succeeds; no cutoff gate is defined for
/// dihedrals.
pub fn dihedral_with_derivatives(
    ids: [usize; 4],
    positions: &[Point3<f64>],
    cell: &SimulationCell,
) -> DihedralMeasure {
    let frame = Frame::build(ids, positions, cell);
    let degrees = frame.signed_degrees();

    let pb2 = frame.pb.norm_squared();
    let pc2 = frame.pc.norm_squared();
    let central_sq = frame.d23.norm_squared();
    let central = central_sq.sqrt();

    // Normals scaled by the projected central-bond length for the two outer
    // particles; the first middle particle is a linear combination of those
    // weighted by the bond-projection coefficients.
    let outer0 = frame.pb * (central / pb2);
    let outer1 = -frame.pc * (central / pc2);
    let fcoef = frame.d03.dot(&frame.d23) / central_sq;
    let hcoef = 1.0 + frame.d12.dot(&frame.d23) / central_sq;

    DihedralMeasure {
        degrees,
        derivatives: [outer0, outer1, -outer0 * fcoef - outer1 * hcoef],
    }
}

/// Signed torsion about the `ids[3]–ids[2]` bond, value only.
pub fn dihedral(ids: [usize; 4], positions: &[Point3<f64>], cell: &SimulationCell) -> f64 {
    Frame::build(ids, positions, cell).signed_degrees()
}
