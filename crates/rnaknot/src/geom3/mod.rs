//! 3-D geometry kernels.
//!
//! Purpose
//! - Principal-axis plane fitting via cyclic Jacobi rotations of the 3×3
//!   covariance matrix, plus the segment–plane and segment–triangle
//!   intersection primitives used by the evaluator.
//!
//! Degeneracy policy
//! - Kernels return `Option`; a `None` plane or intersection is silently
//!   dropped by callers, never an error.

mod intersect;
mod plane;

pub use intersect::{segment_plane_intersection, segment_triangle_intersection, Triangle};
pub use plane::{fit_plane, Plane};
