//! # Internal-Coordinate Families
//!
//! Translation- and rotation-invariant observables of 2–4 particles, each
//! available as a value-only calculation and as a derivative-returning
//! calculation, the latter gated by a squared-distance cutoff where one is
//! defined (distances and angles; dihedrals always succeed).
//!
//! ## Conventions shared by all families
//!
//! - Particles are addressed by index into a caller-owned slice of
//!   `Point3<f64>` positions; displacements between particles always go
//!   through the cell's minimum-image convention.
//! - Angles are reported in **degrees**; derivative vectors of the angular
//!   families are gradients of the angle in **radians** per unit length.
//! - Each family returns one derivative vector fewer than it has particles.
//!   The omitted particle's vector is recoverable as the negative sum of the
//!   returned ones (a consequence of translation invariance); it is the
//!   caller's job to materialize it when needed.
//! - Coincident particles (zero-length legs) and exactly collinear triples
//!   are genuine singularities: values stay finite thanks to the trig clamps,
//!   but derivative magnitudes blow up and a zero distance divides by zero.
//!   Callers are expected to keep configurations non-degenerate.

pub mod angle;
pub mod dihedral;
pub mod distance;

pub use angle::{AngleIntermediates, AngleMeasure};
pub use dihedral::DihedralMeasure;
pub use distance::PairMeasure;
