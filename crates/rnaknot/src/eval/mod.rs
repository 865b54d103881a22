//! Entanglement evaluation: backbone segments against loop surfaces.
//!
//! Purpose
//! - Segment the backbone polyline, mask each surface's own boundary
//!   segments, intersect the rest against the surface (per-triangle or
//!   plane-then-polygon), and count unique `(loop, segment)` piercings.
//!
//! Ordering
//! - Hits are reported in (surface order, segment order); the first observed
//!   segment for a `(loop, segment)` key wins the dedup.

use std::collections::HashSet;

use nalgebra::Vector3;

use crate::coords::{
    polyline_points_pc4, segments_from_polyline, segments_single_atom, CoordMap, Segment,
};
use crate::geom2::point_in_polygon;
use crate::geom3::{segment_plane_intersection, segment_triangle_intersection};
use crate::surface::Surface;
use crate::types::{AtomKind, ResidueCoord};

/// How the backbone polyline is assembled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PolylineMode {
    /// One point per residue at `atom_index`.
    #[default]
    SingleAtom,
    /// Alternating P and C4' points per residue.
    Pc4Alternating,
}

/// Options for [`evaluate_entanglement`].
#[derive(Clone, Copy, Debug)]
pub struct EvaluateOptions {
    pub atom_index: usize,
    pub atom_index_p: usize,
    pub atom_index_c4: usize,
    pub polyline_mode: PolylineMode,
    /// Endpoints closer to a plane than this are treated as non-crossing.
    pub eps_plane: f64,
    /// Edge tolerance for the in-polygon test.
    pub eps_polygon: f64,
    /// Tolerance for the segment-triangle test.
    pub eps_triangle: f64,
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self {
            atom_index: 0,
            atom_index_p: 0,
            atom_index_c4: 1,
            polyline_mode: PolylineMode::SingleAtom,
            eps_plane: 1e-2,
            eps_polygon: 1e-2,
            eps_triangle: 1e-8,
        }
    }
}

/// One piercing event.
#[derive(Clone, Copy, Debug)]
pub struct Hit {
    pub loop_id: usize,
    pub segment_id: usize,
    pub res_a: usize,
    pub res_b: usize,
    pub atom_a: AtomKind,
    pub atom_b: AtomKind,
    pub point: Vector3<f64>,
}

/// Evaluation result: the entanglement count `K` and the piercing events
/// behind it. `(loop_id, segment_id)` is unique across `hits` and
/// `count == hits.len()`.
#[derive(Clone, Debug, Default)]
pub struct Entanglement {
    pub count: usize,
    pub hits: Vec<Hit>,
}

fn skip_mask(surface: &Surface, n_res: usize) -> Vec<bool> {
    let mut mask = vec![false; n_res + 1];
    for &res in &surface.skip_residues {
        if res > 0 && res <= n_res {
            mask[res] = true;
        }
    }
    mask
}

fn intersect_surface(
    surface: &Surface,
    segment: &Segment,
    options: &EvaluateOptions,
) -> Option<Vector3<f64>> {
    if !surface.triangles.is_empty() {
        return surface.triangles.iter().find_map(|tri| {
            segment_triangle_intersection(segment.a, segment.b, tri, options.eps_triangle)
        });
    }
    let plane = surface.plane.as_ref()?;
    let polygon = surface.polygon.as_ref()?;
    let point = segment_plane_intersection(segment.a, segment.b, plane, options.eps_plane)?;
    let q = plane.project(point);
    point_in_polygon(q, polygon, options.eps_polygon).then_some(point)
}

/// Count unique piercings of backbone segments through loop surfaces.
///
/// Surfaces without usable geometry are skipped. Segments with an endpoint
/// residue in a surface's skip list are not tested against that surface.
pub fn evaluate_entanglement(
    coords: &[ResidueCoord],
    surfaces: &[Surface],
    options: &EvaluateOptions,
) -> Entanglement {
    let map = CoordMap::build(coords, options.atom_index);
    let segments = match options.polyline_mode {
        PolylineMode::SingleAtom => segments_single_atom(&map),
        PolylineMode::Pc4Alternating => segments_from_polyline(&polyline_points_pc4(
            coords,
            options.atom_index_p,
            options.atom_index_c4,
        )),
    };
    let mut result = Entanglement::default();
    if segments.is_empty() {
        return result;
    }

    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    for surface in surfaces {
        let use_triangles = !surface.triangles.is_empty();
        if !use_triangles && (surface.plane.is_none() || surface.polygon.is_none()) {
            tracing::debug!(loop_id = surface.loop_id, "surface without geometry, skipped");
            continue;
        }
        let mask = skip_mask(surface, map.n_res());
        for segment in &segments {
            let masked = |res: usize| res > 0 && res <= map.n_res() && mask[res];
            if masked(segment.res_a) || masked(segment.res_b) {
                continue;
            }
            let Some(point) = intersect_surface(surface, segment, options) else {
                continue;
            };
            if seen.insert((surface.loop_id, segment.id)) {
                tracing::trace!(
                    loop_id = surface.loop_id,
                    segment_id = segment.id,
                    res_a = segment.res_a,
                    res_b = segment.res_b,
                    "piercing"
                );
                result.hits.push(Hit {
                    loop_id: surface.loop_id,
                    segment_id: segment.id,
                    res_a: segment.res_a,
                    res_b: segment.res_b,
                    atom_a: segment.atom_a,
                    atom_b: segment.atom_b,
                    point,
                });
            }
        }
    }
    result.count = result.hits.len();
    tracing::debug!(
        surfaces = surfaces.len(),
        segments = segments.len(),
        count = result.count,
        "evaluation complete"
    );
    result
}
