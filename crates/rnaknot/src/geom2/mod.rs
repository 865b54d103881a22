//! 2-D polygon engine.
//!
//! Purpose
//! - Convex hulls (Andrew monotone chain), ear-clipping triangulation, and
//!   point-in-polygon membership with an explicit edge epsilon.
//! - Operates on in-plane coordinates produced by `geom3::Plane::project`.
//!
//! eps policy
//! - Membership treats points within `eps_edge` of any polygon edge as
//!   inside; away from edges a horizontal-ray parity test decides.

mod hull;
mod polygon;
mod triangulate;

pub use hull::convex_hull;
pub use polygon::{point_in_polygon, signed_area, Polygon2};
pub use triangulate::ear_clip;
