//! # Core Module
//!
//! The computational core of the crate: the periodic simulation cell with its
//! minimum-image convention, the internal-coordinate families built on top of
//! it, and the numerical safeguards shared by the angular coordinates.
//!
//! ## Overview
//!
//! - [`cell`] - Orthorhombic periodic cell, coordinate wrapping, and
//!   minimum-image displacements
//! - [`coordinates`] - Distance, angle, and dihedral observables with their
//!   analytic first derivatives and cutoff-gated variants
//! - [`numeric`] - Trig-domain clamps protecting `acos`/`asin` arguments from
//!   floating-point overshoot
//!
//! All operations are layered by dependency: the coordinate families call the
//! cell's minimum-image displacement on sub-pairs of their input particles and
//! combine the results, with no shared state anywhere in between.

pub mod cell;
pub mod coordinates;
pub mod numeric;
