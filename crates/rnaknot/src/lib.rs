//! Topological entanglement detection for RNA tertiary structures.
//!
//! Given a chain's base pairs and per-residue backbone coordinates, this
//! crate counts the places where the backbone polyline pierces a surface
//! spanned by a closed secondary-structure loop. The pipeline runs in four
//! stages, each exposed as one operation:
//!
//! 1. [`extract_main_layer`]: maximum pseudoknot-free pair subset
//!    (Nussinov-style DP with reconstruction).
//! 2. [`build_loops`]: loop partition of a non-crossing pair set
//!    (hairpin / internal / multi, closing pairs, boundary residues).
//! 3. [`build_surfaces`]: best-fit plane per loop plus a convex-hull
//!    outline or an ear-clipped triangle fan.
//! 4. [`evaluate_entanglement`]: backbone segmentation, skip masking,
//!    segment-surface intersection, unique-hit counting.
//!
//! Data flows one way: pairs → layer → loops → surfaces; coordinates →
//! segments; (surfaces, segments) → result. Everything is built per call;
//! there is no shared state.
//!
//! Malformed pairing input (out-of-range, self-paired, multiply paired,
//! unexpected crossing) is a [`PairingError`]. Geometric degeneracies are
//! never errors: the affected loop simply contributes no hits.

pub mod api;
pub mod coords;
mod error;
pub mod eval;
pub mod geom2;
pub mod geom3;
pub mod layer;
pub mod loops;
pub mod surface;
mod types;

pub use error::{PairingError, Result};
pub use eval::evaluate_entanglement;
pub use layer::extract_main_layer;
pub use loops::build_loops;
pub use surface::build_surfaces;
pub use types::{AtomKind, BasePair, Loop, LoopKind, PairKind, ResidueCoord};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::eval::{evaluate_entanglement, Entanglement, EvaluateOptions, Hit, PolylineMode};
    pub use crate::loops::{build_loops, LoopBuildOptions};
    pub use crate::surface::{build_surfaces, Surface, SurfaceBuildOptions, SurfaceMode};
    pub use crate::types::{AtomKind, BasePair, Loop, LoopKind, PairKind, ResidueCoord};
    pub use crate::{extract_main_layer, PairingError};
    pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};
}
