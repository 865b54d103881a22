//! Curated re-export surface for downstream callers.
//!
//! Front-ends (file parsers, tabulators, bindings) should import from here;
//! the module paths behind these names may move.

// Pipeline operations
pub use crate::eval::evaluate_entanglement;
pub use crate::layer::extract_main_layer;
pub use crate::loops::{build_loops, collect_multi_loop_pairs};
pub use crate::surface::build_surfaces;

// Inputs and options
pub use crate::eval::{EvaluateOptions, PolylineMode};
pub use crate::loops::LoopBuildOptions;
pub use crate::surface::{SurfaceBuildOptions, SurfaceMode};
pub use crate::types::{BasePair, PairKind, ResidueCoord};

// Outputs
pub use crate::error::{PairingError, Result};
pub use crate::eval::{Entanglement, Hit};
pub use crate::surface::Surface;
pub use crate::types::{AtomKind, Loop, LoopKind};

// Geometry kernels, exposed for diagnostic tooling
pub use crate::geom2::{convex_hull, ear_clip, point_in_polygon, signed_area, Polygon2};
pub use crate::geom3::{
    fit_plane, segment_plane_intersection, segment_triangle_intersection, Plane, Triangle,
};
