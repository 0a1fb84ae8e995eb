use crate::core::cell::SimulationCell;
use crate::core::numeric::{clamp_cosine, clamp_sine};
use nalgebra::{Point3, Vector3};

use super::distance::{self, PairMeasure};

/// A bond angle with derivative vectors for its two end particles.
///
/// The angle sits at the vertex particle (third id of the input set) between
/// the legs to the first and second ids.
///
/// `end_derivatives[i]` is the **negative** gradient of the angle (in
/// radians) with respect to the position of end particle `ids[i]`. The vertex
/// particle's vector is not materialized; in the same convention it equals
/// `-(end_derivatives[0] + end_derivatives[1])`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleMeasure {
    /// Angle in degrees, in `[0, 180]`.
    pub degrees: f64,
    pub end_derivatives: [Vector3<f64>; 2],
}

/// An [`AngleMeasure`] together with the leg quantities it was built from,
/// so a caller composing larger observables can reuse them without
/// recomputation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleIntermediates {
    /// Angle in degrees, in `[0, 180]`.
    pub degrees: f64,
    /// Same convention as [`AngleMeasure::end_derivatives`].
    pub end_derivatives: [Vector3<f64>; 2],
    /// Squared-distance derivative vectors (`2·Δ`) of the vertex→first and
    /// vertex→second legs.
    pub leg_derivatives: [Vector3<f64>; 2],
    /// Lengths of the vertex→first and vertex→second legs.
    pub leg_lengths: [f64; 2],
}

struct Legs {
    derivatives: [Vector3<f64>; 2],
    lengths: [f64; 2],
}

/// Measures both vertex→end legs through the cutoff-gated squared-distance
/// path; either leg out of range drops the whole angle.
fn measure_legs(
    ids: [usize; 3],
    positions: &[Point3<f64>],
    cell: &SimulationCell,
    cutoff_sq: f64,
) -> Option<Legs> {
    let leg0 =
        distance::squared_distance_with_derivative([ids[2], ids[0]], positions, cell, cutoff_sq);
    let leg1 =
        distance::squared_distance_with_derivative([ids[2], ids[1]], positions, cell, cutoff_sq);
    match (leg0, leg1) {
        (
            PairMeasure::Within {
                value: sq0,
                derivative: d0,
            },
            PairMeasure::Within {
                value: sq1,
                derivative: d1,
            },
        ) => Some(Legs {
            derivatives: [d0, d1],
            lengths: [sq0.sqrt(), sq1.sqrt()],
        }),
        _ => None,
    }
}

fn compose(legs: &Legs) -> (f64, [Vector3<f64>; 2]) {
    let [d0, d1] = legs.derivatives;
    let [r0, r1] = legs.lengths;

    // The legs carry 2·Δ each, hence the factor of 4 in the cosine.
    let cos_theta = clamp_cosine(d0.dot(&d1) / (4.0 * r0 * r1));
    let theta = cos_theta.acos();

    let sin_theta = clamp_sine(theta.sin());
    let cross = 1.0 / (r0 * r1 * sin_theta);
    let self0 = cos_theta / (r0 * r0 * sin_theta);
    let self1 = cos_theta / (r1 * r1 * sin_theta);

    let end_derivatives = [
        0.5 * (d1 * cross - d0 * self0),
        0.5 * (d0 * cross - d1 * self1),
    ];
    (theta.to_degrees(), end_derivatives)
}

/// Angle at the vertex `ids[2]` between the legs to `ids[0]` and `ids[1]`,
/// with end-particle derivatives, gated by a shared squared-distance cutoff
/// on both legs.
///
/// Returns `None` when either leg exceeds the cutoff.
pub fn angle_with_derivatives(
    ids: [usize; 3],
    positions: &[Point3<f64>],
    cell: &SimulationCell,
    cutoff_sq: f64,
) -> Option<AngleMeasure> {
    let legs = measure_legs(ids, positions, cell, cutoff_sq)?;
    let (degrees, end_derivatives) = compose(&legs);
    Some(AngleMeasure {
        degrees,
        end_derivatives,
    })
}

/// Like [`angle_with_derivatives`], additionally exposing the leg derivative
/// vectors and lengths for reuse in composite-geometry calculations.
pub fn angle_with_intermediates(
    ids: [usize; 3],
    positions: &[Point3<f64>],
    cell: &SimulationCell,
    cutoff_sq: f64,
) -> Option<AngleIntermediates> {
    let legs = measure_legs(ids, positions, cell, cutoff_sq)?;
    let (degrees, end_derivatives) = compose(&legs);
    Some(AngleIntermediates {
        degrees,
        end_derivatives,
        leg_derivatives: legs.derivatives,
        leg_lengths: legs.lengths,
    })
}

/// Angle at the vertex `ids[2]`, value only, no cutoff.
pub fn angle(ids: [usize; 3], positions: &[Point3<f64>], cell: &SimulationCell) -> f64 {
    let u = cell.minimum_image(&positions[ids[2]], &positions[ids[0]]);
    let v = cell.minimum_image(&positions[ids[2]], &positions[ids[1]]);
    let cos_theta = clamp_cosine(u.dot(&v) / (u.norm() * v.norm()));
    cos_theta.acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FD_STEP: f64 = 1e-6;
    const FD_RELATIVE_TOLERANCE: f64 = 1e-5;

    fn open_cell() -> SimulationCell {
        SimulationCell::new(Vector3::new(50.0, 50.0, 50.0)).unwrap()
    }

    fn fd_matches(analytic: f64, numeric: f64) -> bool {
        let scale = analytic.abs().max(numeric.abs()).max(1e-8);
        (analytic - numeric).abs() / scale < FD_RELATIVE_TOLERANCE
    }

    fn generic_positions() -> [Point3<f64>; 3] {
        [
            Point3::new(1.3, 0.2, -0.4),
            Point3::new(0.9, 1.1, 0.8),
            Point3::new(-0.3, 0.4, 1.2),
        ]
    }

    /// Central difference of the angle in radians along one axis of one
    /// particle.
    fn fd_gradient(
        ids: [usize; 3],
        positions: &[Point3<f64>; 3],
        cell: &SimulationCell,
        particle: usize,
        axis: usize,
    ) -> f64 {
        let mut plus = *positions;
        plus[particle][axis] += FD_STEP;
        let mut minus = *positions;
        minus[particle][axis] -= FD_STEP;
        (angle(ids, &plus, cell).to_radians() - angle(ids, &minus, cell).to_radians())
            / (2.0 * FD_STEP)
    }

    #[test]
    fn right_angle_scenario() {
        // Vertex at (1,0,0), legs to (0,0,0) and (1,1,0).
        let positions = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        let cell = open_cell();
        let measured = angle([0, 2, 1], &positions, &cell);
        assert!((measured - 90.0).abs() < 1e-9);

        let with_derivs = angle_with_derivatives([0, 2, 1], &positions, &cell, 1e10).unwrap();
        assert!((with_derivs.degrees - 90.0).abs() < 1e-9);
    }

    #[test]
    fn angle_is_none_when_a_leg_exceeds_the_cutoff() {
        let positions = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ];
        let cell = open_cell();
        // Leg vertex→second is 9 long; cutoff² of 4 excludes it.
        assert!(angle_with_derivatives([0, 1, 2], &positions, &cell, 4.0).is_none());
        assert!(angle_with_intermediates([0, 1, 2], &positions, &cell, 4.0).is_none());
        // A permissive cutoff admits the same triple.
        assert!(angle_with_derivatives([0, 1, 2], &positions, &cell, 1e4).is_some());
    }

    #[test]
    fn angle_stays_in_domain_for_generic_triples() {
        let cell = open_cell();
        let positions = generic_positions();
        let degrees = angle([0, 1, 2], &positions, &cell);
        assert!((0.0..=180.0).contains(&degrees));
    }

    #[test]
    fn collinear_triple_is_clamped_not_nan() {
        let positions = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ];
        let cell = open_cell();
        let measure = angle_with_derivatives([0, 1, 2], &positions, &cell, 1e10).unwrap();
        assert!(measure.degrees.is_finite());
        assert!((measure.degrees - 180.0).abs() < 1e-3);
        for derivative in measure.end_derivatives {
            assert!(derivative.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn angle_value_is_invariant_under_rigid_motion() {
        use nalgebra::{Rotation3, Unit};
        let cell = open_cell();
        let positions = generic_positions();
        let reference = angle([0, 1, 2], &positions, &cell);

        let rotation = Rotation3::from_axis_angle(
            &Unit::new_normalize(Vector3::new(-0.3, 1.0, 0.8)),
            0.9,
        );
        let shift = Vector3::new(-1.5, 2.5, 0.3);
        let moved: Vec<_> = positions.iter().map(|p| rotation * p + shift).collect();
        assert!((reference - angle([0, 1, 2], &moved, &cell)).abs() < 1e-9);
    }

    #[test]
    fn end_derivatives_are_negative_gradients() {
        let cell = open_cell();
        let positions = generic_positions();
        let ids = [0, 1, 2];
        let measure = angle_with_derivatives(ids, &positions, &cell, 1e10).unwrap();

        for end in 0..2 {
            for axis in 0..3 {
                let numeric = fd_gradient(ids, &positions, &cell, ids[end], axis);
                assert!(
                    fd_matches(-measure.end_derivatives[end][axis], numeric),
                    "end {end} axis {axis}: analytic {} vs numeric {}",
                    -measure.end_derivatives[end][axis],
                    numeric
                );
            }
        }
    }

    #[test]
    fn vertex_derivative_is_recoverable_from_the_end_vectors() {
        let cell = open_cell();
        let positions = generic_positions();
        let ids = [0, 1, 2];
        let measure = angle_with_derivatives(ids, &positions, &cell, 1e10).unwrap();

        // In the returned (negative-gradient) convention the vertex vector is
        // -(e0 + e1), so the true vertex gradient is e0 + e1.
        let implied = measure.end_derivatives[0] + measure.end_derivatives[1];
        for axis in 0..3 {
            let numeric = fd_gradient(ids, &positions, &cell, ids[2], axis);
            assert!(
                fd_matches(implied[axis], numeric),
                "axis {axis}: analytic {} vs numeric {}",
                implied[axis],
                numeric
            );
        }
    }

    #[test]
    fn intermediates_expose_the_raw_leg_quantities() {
        let cell = open_cell();
        let positions = generic_positions();
        let ids = [0, 1, 2];
        let intermediates = angle_with_intermediates(ids, &positions, &cell, 1e10).unwrap();
        let measure = angle_with_derivatives(ids, &positions, &cell, 1e10).unwrap();

        assert_eq!(intermediates.degrees, measure.degrees);
        assert_eq!(intermediates.end_derivatives, measure.end_derivatives);

        let leg0 = cell.minimum_image(&positions[ids[2]], &positions[ids[0]]);
        let leg1 = cell.minimum_image(&positions[ids[2]], &positions[ids[1]]);
        assert!((intermediates.leg_derivatives[0] - 2.0 * leg0).norm() < 1e-12);
        assert!((intermediates.leg_derivatives[1] - 2.0 * leg1).norm() < 1e-12);
        assert!((intermediates.leg_lengths[0] - leg0.norm()).abs() < 1e-12);
        assert!((intermediates.leg_lengths[1] - leg1.norm()).abs() < 1e-12);
    }

    #[test]
    fn angle_value_matches_between_plain_and_derivative_variants() {
        let cell = open_cell();
        let positions = generic_positions();
        let plain = angle([0, 1, 2], &positions, &cell);
        let derived = angle_with_derivatives([0, 1, 2], &positions, &cell, 1e10).unwrap();
        assert!((plain - derived.degrees).abs() < 1e-12);
    }
}
