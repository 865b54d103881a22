use super::*;
use crate::loops::{build_loops, LoopBuildOptions};
use crate::types::BasePair;
use nalgebra::Vector3;

fn pairs(list: &[(usize, usize)]) -> Vec<BasePair> {
    list.iter().map(|&(i, j)| BasePair::new(i, j)).collect()
}

fn res(idx: usize, p: Vector3<f64>) -> ResidueCoord {
    ResidueCoord::new(idx, vec![p])
}

/// Residues 1..=n on the unit circle in the z = 0 plane.
fn circle_coords(n: usize) -> Vec<ResidueCoord> {
    (1..=n)
        .map(|k| {
            let th = 2.0 * std::f64::consts::PI * (k - 1) as f64 / n as f64;
            res(k, Vector3::new(th.cos(), th.sin(), 0.0))
        })
        .collect()
}

fn hairpin_loop(i: usize, j: usize, n_res: usize) -> Loop {
    build_loops(&pairs(&[(i, j)]), n_res, &LoopBuildOptions::default())
        .unwrap()
        .remove(0)
}

#[test]
fn boundary_indices_hairpin_is_the_outer_range() {
    let lp = hairpin_loop(1, 8, 8);
    assert_eq!(boundary_indices(&lp, 8), (1..=8).collect::<Vec<_>>());
}

#[test]
fn boundary_indices_internal_walks_both_strands() {
    let loops = build_loops(&pairs(&[(1, 12), (3, 10)]), 12, &LoopBuildOptions::default()).unwrap();
    assert_eq!(boundary_indices(&loops[0], 12), vec![1, 2, 3, 10, 11, 12]);
}

#[test]
fn boundary_indices_multi_takes_the_first_branch_gap() {
    let loops = build_loops(
        &pairs(&[(1, 20), (3, 8), (10, 15)]),
        20,
        &LoopBuildOptions::default(),
    )
    .unwrap();
    assert_eq!(boundary_indices(&loops[0], 20), vec![1, 2, 3, 8]);
}

#[test]
fn best_fit_mode_builds_hull_outline() {
    let options = SurfaceBuildOptions {
        surface_mode: SurfaceMode::BestFitPlane,
        ..Default::default()
    };
    let loops = vec![hairpin_loop(1, 8, 8)];
    let surfaces = build_surfaces(&circle_coords(8), &loops, &options);
    assert_eq!(surfaces.len(), 1);
    let s = &surfaces[0];
    assert_eq!(s.loop_id, 1);
    assert!(s.plane.is_some());
    assert!(s.triangles.is_empty());
    // A regular octagon keeps all its vertices on the hull.
    assert_eq!(s.polygon.as_ref().unwrap().vertices.len(), 8);
    assert_eq!(s.skip_residues, (1..=8).collect::<Vec<_>>());
}

#[test]
fn triangle_mode_builds_a_fan() {
    let loops = vec![hairpin_loop(1, 8, 8)];
    let surfaces = build_surfaces(&circle_coords(8), &loops, &SurfaceBuildOptions::default());
    let s = &surfaces[0];
    assert!(s.plane.is_some());
    assert_eq!(s.polygon.as_ref().unwrap().vertices.len(), 8);
    assert_eq!(s.triangles.len(), 6);
    for t in &s.triangles {
        assert!(t.parallelogram_area() > 1e-6);
        // Every triangle vertex lies on the fitted plane.
        let plane = s.plane.as_ref().unwrap();
        assert!(plane.signed_distance(t.a).abs() < 1e-9);
    }
}

#[test]
fn collinear_boundary_yields_no_geometry() {
    let coords: Vec<_> = (1..=6)
        .map(|k| res(k, Vector3::new(k as f64, 0.0, 0.0)))
        .collect();
    let loops = vec![hairpin_loop(1, 6, 6)];
    let surfaces = build_surfaces(&coords, &loops, &SurfaceBuildOptions::default());
    let s = &surfaces[0];
    assert!(s.plane.is_none());
    assert!(s.polygon.is_none());
    assert!(s.triangles.is_empty());
    // The entry itself survives with its skip list intact.
    assert_eq!(s.loop_id, 1);
    assert_eq!(s.skip_residues, (1..=6).collect::<Vec<_>>());
}

#[test]
fn missing_coordinates_shrink_the_boundary() {
    // Only three residues carry coordinates: the plane still fits, and the
    // outline is a triangle.
    let coords = vec![
        res(1, Vector3::new(0.0, 0.0, 0.0)),
        res(4, Vector3::new(1.0, 0.0, 0.0)),
        res(8, Vector3::new(0.0, 1.0, 0.0)),
    ];
    let loops = vec![hairpin_loop(1, 8, 8)];
    let surfaces = build_surfaces(&coords, &loops, &SurfaceBuildOptions::default());
    let s = &surfaces[0];
    assert!(s.plane.is_some());
    assert_eq!(s.polygon.as_ref().unwrap().vertices.len(), 3);
    assert_eq!(s.triangles.len(), 1);

    // Two residues cannot support a plane.
    let coords = vec![
        res(1, Vector3::new(0.0, 0.0, 0.0)),
        res(8, Vector3::new(1.0, 0.0, 0.0)),
    ];
    let surfaces = build_surfaces(&coords, &loops, &SurfaceBuildOptions::default());
    assert!(surfaces[0].plane.is_none());
}

#[test]
fn surfaces_follow_loop_order() {
    let loops = build_loops(
        &pairs(&[(1, 20), (3, 8), (10, 15)]),
        20,
        &LoopBuildOptions::default(),
    )
    .unwrap();
    let surfaces = build_surfaces(&circle_coords(20), &loops, &SurfaceBuildOptions::default());
    let ids: Vec<_> = surfaces.iter().map(|s| s.loop_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(surfaces[0].kind, LoopKind::Multi);
    assert_eq!(surfaces[1].kind, LoopKind::Hairpin);
}
