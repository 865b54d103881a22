//! Surface construction per loop.
//!
//! Purpose
//! - Order each loop's boundary residues, fit a plane to their coordinates,
//!   and record either a convex-hull outline (best-fit-plane mode) or an
//!   ear-clipped triangle fan (triangle-planes mode, the default).
//!
//! Degeneracy policy
//! - Too few located boundary points, a near-collinear boundary, or an
//!   unclippable outline leave the plane/polygon/triangles absent; the
//!   evaluator then skips the surface, so the loop contributes no hits.

use nalgebra::{Vector2, Vector3};

use crate::coords::CoordMap;
use crate::geom2::{convex_hull, ear_clip, Polygon2};
use crate::geom3::{fit_plane, Plane, Triangle};
use crate::loops::skip_residues;
use crate::types::{BasePair, Loop, LoopKind, ResidueCoord};

/// Ear-clip degeneracy epsilon for projected outlines.
const EAR_CLIP_EPS: f64 = 1e-12;

/// How a loop's spanning surface is represented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SurfaceMode {
    /// Convex hull of the projected boundary in the best-fit plane.
    BestFitPlane,
    /// Boundary-ordered polygon, ear-clipped into 3-D triangles.
    #[default]
    TrianglePlanes,
}

/// Options for [`build_surfaces`].
#[derive(Clone, Copy, Debug)]
pub struct SurfaceBuildOptions {
    /// Atom slot used for boundary coordinates.
    pub atom_index: usize,
    /// Eigenvalue-ratio threshold for near-collinear boundaries; also the
    /// minimum 3-D parallelogram area of a kept triangle.
    pub eps_collinear: f64,
    pub surface_mode: SurfaceMode,
}

impl Default for SurfaceBuildOptions {
    fn default() -> Self {
        Self {
            atom_index: 0,
            eps_collinear: 1e-6,
            surface_mode: SurfaceMode::TrianglePlanes,
        }
    }
}

/// Spanning surface of one loop, ready for intersection tests.
///
/// `triangles` non-empty selects the per-triangle test; otherwise the
/// evaluator needs both `plane` and `polygon`.
#[derive(Clone, Debug)]
pub struct Surface {
    pub loop_id: usize,
    pub kind: LoopKind,
    pub closing_pairs: Vec<BasePair>,
    pub plane: Option<Plane>,
    pub polygon: Option<Polygon2>,
    pub triangles: Vec<Triangle>,
    pub skip_residues: Vec<usize>,
}

/// Ordered boundary residue indices for a loop's surface, first occurrence
/// winning on duplicates.
///
/// Hairpin: the contiguous outer range. Internal: outer-left strand, the
/// child pair, outer-right strand, then the outer endpoints. Multi: the gap
/// from the outer pair's left endpoint to the first branch, then that
/// branch's endpoints; remaining branches belong to other loop entries.
fn boundary_indices(lp: &Loop, n_res: usize) -> Vec<usize> {
    let mut out = Vec::new();
    let mut seen = vec![false; n_res + 1];
    let mut add = |idx: usize, out: &mut Vec<usize>| {
        if idx == 0 || idx > n_res || seen[idx] {
            return;
        }
        seen[idx] = true;
        out.push(idx);
    };

    if lp.closing_pairs.is_empty() {
        for &r in &lp.boundary_residues {
            add(r, &mut out);
        }
        return out;
    }

    match lp.kind {
        LoopKind::Hairpin => {
            let (i, j) = lp.outer();
            for idx in i..=j {
                add(idx, &mut out);
            }
        }
        LoopKind::Internal => {
            let (i, j) = lp.outer();
            if lp.closing_pairs.len() >= 2 {
                let (h, l) = lp.closing_pairs[1].sorted();
                for idx in i..h {
                    add(idx, &mut out);
                }
                add(h, &mut out);
                add(l, &mut out);
                for idx in (l + 1)..j {
                    add(idx, &mut out);
                }
                add(i, &mut out);
                add(j, &mut out);
            } else {
                for idx in i..=j {
                    add(idx, &mut out);
                }
            }
        }
        LoopKind::Multi => {
            let mut pairs: Vec<(usize, usize)> =
                lp.closing_pairs.iter().map(|bp| bp.sorted()).collect();
            pairs.sort_unstable();
            let (outer_left, _) = pairs[0];
            if let Some(&(branch_left, branch_right)) = pairs.get(1) {
                for idx in outer_left..branch_left {
                    add(idx, &mut out);
                }
                add(branch_left, &mut out);
                add(branch_right, &mut out);
            } else {
                add(outer_left, &mut out);
                add(pairs[0].1, &mut out);
            }
        }
        LoopKind::Unknown => {
            for &r in &lp.boundary_residues {
                add(r, &mut out);
            }
            for bp in &lp.closing_pairs {
                let (i, j) = bp.sorted();
                add(i, &mut out);
                add(j, &mut out);
            }
        }
    }
    out
}

fn triangulate(
    plane: &Plane,
    points: &[Vector3<f64>],
    eps_collinear: f64,
) -> (Option<Polygon2>, Vec<Triangle>) {
    let poly2d: Vec<Vector2<f64>> = points.iter().map(|&p| plane.project(p)).collect();
    let poly3d: Vec<Vector3<f64>> = poly2d.iter().map(|&q| plane.lift(q)).collect();
    let mut triangles = Vec::new();
    for tri in ear_clip(&poly2d, EAR_CLIP_EPS) {
        let t = Triangle {
            a: poly3d[tri[0]],
            b: poly3d[tri[1]],
            c: poly3d[tri[2]],
        };
        if t.parallelogram_area() <= eps_collinear {
            continue;
        }
        triangles.push(t);
    }
    (Polygon2::new(poly2d), triangles)
}

/// Build one surface per loop.
///
/// Loops whose boundary cannot support a plane still produce an entry (the
/// evaluator needs the skip list and id ordering); their geometry is absent.
pub fn build_surfaces(
    coords: &[ResidueCoord],
    loops: &[Loop],
    options: &SurfaceBuildOptions,
) -> Vec<Surface> {
    let map = CoordMap::build(coords, options.atom_index);
    let mut surfaces = Vec::with_capacity(loops.len());
    for lp in loops {
        let boundary = boundary_indices(lp, map.n_res());
        let points: Vec<Vector3<f64>> =
            boundary.iter().filter_map(|&r| map.get(r)).collect();
        let plane = fit_plane(&points, options.eps_collinear);

        let (polygon, triangles) = match (options.surface_mode, plane.as_ref()) {
            (_, None) => (None, Vec::new()),
            (SurfaceMode::BestFitPlane, Some(plane)) => {
                let projected: Vec<Vector2<f64>> =
                    points.iter().map(|&p| plane.project(p)).collect();
                let hull = convex_hull(&projected).and_then(Polygon2::new);
                (hull, Vec::new())
            }
            (SurfaceMode::TrianglePlanes, Some(plane)) => {
                triangulate(plane, &points, options.eps_collinear)
            }
        };

        tracing::debug!(
            loop_id = lp.id,
            kind = ?lp.kind,
            boundary_points = points.len(),
            plane = plane.is_some(),
            triangles = triangles.len(),
            "built surface"
        );
        surfaces.push(Surface {
            loop_id: lp.id,
            kind: lp.kind,
            closing_pairs: lp.closing_pairs.clone(),
            plane,
            polygon,
            triangles,
            skip_residues: skip_residues(lp),
        });
    }
    surfaces
}

#[cfg(test)]
mod tests;
