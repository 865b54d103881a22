//! Chain coordinate table and backbone segmentation.
//!
//! Input records may arrive in any residue order; the table is keyed by the
//! 1-based residue index. A coordinate with any non-finite component, or an
//! atom index past a residue's atom list, means "absent" and silently drops
//! the affected polyline links.

use nalgebra::Vector3;

use crate::types::{AtomKind, ResidueCoord};

/// Per-residue coordinate lookup for one atom slot.
#[derive(Clone, Debug)]
pub struct CoordMap {
    n_res: usize,
    // slot 0 unused.
    coords: Vec<Option<Vector3<f64>>>,
}

impl CoordMap {
    /// Build the lookup for `atom_index` over `coords`. The table spans
    /// `1..=max(res_index)` seen in the input.
    pub fn build(coords: &[ResidueCoord], atom_index: usize) -> Self {
        let n_res = coords.iter().map(|r| r.res_index).max().unwrap_or(0);
        let mut table = vec![None; n_res + 1];
        for res in coords {
            if res.res_index == 0 || res.res_index > n_res {
                continue;
            }
            let Some(v) = res.atoms.get(atom_index) else {
                continue;
            };
            if v.iter().all(|c| c.is_finite()) {
                table[res.res_index] = Some(*v);
            }
        }
        Self {
            n_res,
            coords: table,
        }
    }

    #[inline]
    pub fn n_res(&self) -> usize {
        self.n_res
    }

    #[inline]
    pub fn get(&self, res: usize) -> Option<Vector3<f64>> {
        self.coords.get(res).copied().flatten()
    }
}

/// One point of the backbone polyline.
#[derive(Clone, Copy, Debug)]
pub struct PolylinePoint {
    pub res_index: usize,
    pub atom: AtomKind,
    pub point: Vector3<f64>,
}

/// Backbone polyline link under test, with endpoint provenance for
/// reporting.
#[derive(Clone, Copy, Debug)]
pub struct Segment {
    /// Contiguous from 1 in emission order.
    pub id: usize,
    pub res_a: usize,
    pub res_b: usize,
    pub atom_a: AtomKind,
    pub atom_b: AtomKind,
    pub a: Vector3<f64>,
    pub b: Vector3<f64>,
}

/// Segments between consecutive residues that both carry a coordinate at
/// the mapped atom.
pub fn segments_single_atom(map: &CoordMap) -> Vec<Segment> {
    let mut segments = Vec::new();
    if map.n_res() <= 1 {
        return segments;
    }
    for i in 1..map.n_res() {
        let (Some(a), Some(b)) = (map.get(i), map.get(i + 1)) else {
            continue;
        };
        segments.push(Segment {
            id: segments.len() + 1,
            res_a: i,
            res_b: i + 1,
            atom_a: AtomKind::Single,
            atom_b: AtomKind::Single,
            a,
            b,
        });
    }
    segments
}

/// Alternating P / C4' polyline points in residue order: for each residue,
/// the P atom if present, then the C4' atom if present.
pub fn polyline_points_pc4(
    coords: &[ResidueCoord],
    atom_index_p: usize,
    atom_index_c4: usize,
) -> Vec<PolylinePoint> {
    let map_p = CoordMap::build(coords, atom_index_p);
    let map_c4 = CoordMap::build(coords, atom_index_c4);
    let n_res = map_p.n_res().max(map_c4.n_res());
    let mut points = Vec::with_capacity(n_res * 2);
    for i in 1..=n_res {
        if let Some(p) = map_p.get(i) {
            points.push(PolylinePoint {
                res_index: i,
                atom: AtomKind::P,
                point: p,
            });
        }
        if let Some(p) = map_c4.get(i) {
            points.push(PolylinePoint {
                res_index: i,
                atom: AtomKind::C4,
                point: p,
            });
        }
    }
    points
}

/// Segments linking consecutive polyline points.
pub fn segments_from_polyline(points: &[PolylinePoint]) -> Vec<Segment> {
    points
        .windows(2)
        .enumerate()
        .map(|(k, w)| Segment {
            id: k + 1,
            res_a: w[0].res_index,
            res_b: w[1].res_index,
            atom_a: w[0].atom,
            atom_b: w[1].atom,
            a: w[0].point,
            b: w[1].point,
        })
        .collect()
}

#[cfg(test)]
mod tests;
