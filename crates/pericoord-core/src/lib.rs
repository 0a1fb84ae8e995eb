//! # Pericoord Core Library
//!
//! A pure geometric-math kernel for computing translation- and
//! rotation-invariant internal coordinates (pairwise distance, bond angle,
//! dihedral/torsion angle) of particle configurations in an orthorhombic
//! periodic simulation cell, together with the analytic first derivatives of
//! those coordinates with respect to the Cartesian positions of the
//! participating particles.
//!
//! The crate is a leaf dependency for simulation and analysis drivers (for
//! example force-matching or coarse-graining engines) that own the particle
//! storage, construct the cell, and consume the derivative vectors to build
//! generalized forces or fit interaction potentials.
//!
//! ## Design
//!
//! Every function in this crate is stateless and reentrant: inputs are
//! borrowed, read-only slices of caller-owned positions, results are returned
//! by value, and no global or instance state exists anywhere. Calls may be
//! issued concurrently from any number of threads without coordination.
//!
//! The kernel deliberately performs no validation beyond a small set of
//! trig-domain clamps. Degenerate geometries (coincident particles, exactly
//! collinear triples) are the caller's responsibility; see the documentation
//! of the individual coordinate families in [`core::coordinates`].

pub mod core;
