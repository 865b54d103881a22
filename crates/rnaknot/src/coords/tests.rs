use super::*;
use crate::types::{AtomKind, ResidueCoord};
use nalgebra::Vector3;

fn v(x: f64, y: f64, z: f64) -> Vector3<f64> {
    Vector3::new(x, y, z)
}

fn res(idx: usize, atoms: &[Vector3<f64>]) -> ResidueCoord {
    ResidueCoord::new(idx, atoms.to_vec())
}

#[test]
fn coord_map_accepts_unordered_records() {
    let coords = vec![
        res(3, &[v(3.0, 0.0, 0.0)]),
        res(1, &[v(1.0, 0.0, 0.0)]),
        res(2, &[v(2.0, 0.0, 0.0)]),
    ];
    let map = CoordMap::build(&coords, 0);
    assert_eq!(map.n_res(), 3);
    assert_eq!(map.get(1), Some(v(1.0, 0.0, 0.0)));
    assert_eq!(map.get(2), Some(v(2.0, 0.0, 0.0)));
    assert_eq!(map.get(3), Some(v(3.0, 0.0, 0.0)));
    assert_eq!(map.get(0), None);
    assert_eq!(map.get(4), None);
}

#[test]
fn coord_map_treats_non_finite_as_absent() {
    let coords = vec![
        res(1, &[v(0.0, 0.0, 0.0)]),
        res(2, &[v(f64::NAN, 0.0, 0.0)]),
        res(3, &[v(0.0, f64::INFINITY, 0.0)]),
    ];
    let map = CoordMap::build(&coords, 0);
    assert!(map.get(1).is_some());
    assert!(map.get(2).is_none());
    assert!(map.get(3).is_none());
}

#[test]
fn coord_map_out_of_range_atom_index_is_absent() {
    let coords = vec![res(1, &[v(0.0, 0.0, 0.0)]), res(2, &[])];
    let map = CoordMap::build(&coords, 1);
    assert!(map.get(1).is_none());
    assert!(map.get(2).is_none());
}

#[test]
fn single_atom_segments_skip_gaps_but_stay_contiguous() {
    // Residue 3 has no coordinate: links (2,3) and (3,4) vanish, ids do not.
    let coords = vec![
        res(1, &[v(0.0, 0.0, 0.0)]),
        res(2, &[v(1.0, 0.0, 0.0)]),
        res(3, &[v(f64::NAN, 0.0, 0.0)]),
        res(4, &[v(3.0, 0.0, 0.0)]),
        res(5, &[v(4.0, 0.0, 0.0)]),
    ];
    let segments = segments_single_atom(&CoordMap::build(&coords, 0));
    assert_eq!(segments.len(), 2);
    assert_eq!((segments[0].id, segments[0].res_a, segments[0].res_b), (1, 1, 2));
    assert_eq!((segments[1].id, segments[1].res_a, segments[1].res_b), (2, 4, 5));
    assert_eq!(segments[0].atom_a, AtomKind::Single);
}

#[test]
fn single_atom_needs_two_residues() {
    let coords = vec![res(1, &[v(0.0, 0.0, 0.0)])];
    assert!(segments_single_atom(&CoordMap::build(&coords, 0)).is_empty());
    assert!(segments_single_atom(&CoordMap::build(&[], 0)).is_empty());
}

#[test]
fn pc4_polyline_alternates_atoms_in_residue_order() {
    let coords = vec![
        res(1, &[v(0.0, 0.0, 0.0), v(0.5, 0.0, 0.0)]),
        res(2, &[v(1.0, 0.0, 0.0), v(1.5, 0.0, 0.0)]),
    ];
    let points = polyline_points_pc4(&coords, 0, 1);
    let kinds: Vec<_> = points.iter().map(|p| (p.res_index, p.atom)).collect();
    assert_eq!(
        kinds,
        vec![
            (1, AtomKind::P),
            (1, AtomKind::C4),
            (2, AtomKind::P),
            (2, AtomKind::C4),
        ]
    );
}

#[test]
fn pc4_polyline_tolerates_missing_atoms() {
    // Residue 2 has no P; the polyline bridges C4'(1) -> C4'(2).
    let coords = vec![
        res(1, &[v(0.0, 0.0, 0.0), v(0.5, 0.0, 0.0)]),
        res(2, &[v(f64::NAN, 0.0, 0.0), v(1.5, 0.0, 0.0)]),
    ];
    let points = polyline_points_pc4(&coords, 0, 1);
    assert_eq!(points.len(), 3);
    let segments = segments_from_polyline(&points);
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[1].id, 2);
    assert_eq!(segments[1].res_a, 1);
    assert_eq!(segments[1].res_b, 2);
    assert_eq!(segments[1].atom_a, AtomKind::C4);
    assert_eq!(segments[1].atom_b, AtomKind::C4);
}

#[test]
fn polyline_segments_carry_endpoint_atoms() {
    let coords = vec![
        res(1, &[v(0.0, 0.0, 0.0), v(0.5, 0.0, 0.0)]),
        res(2, &[v(1.0, 0.0, 0.0), v(1.5, 0.0, 0.0)]),
    ];
    let segments = segments_from_polyline(&polyline_points_pc4(&coords, 0, 1));
    assert_eq!(segments.len(), 3);
    assert_eq!((segments[0].atom_a, segments[0].atom_b), (AtomKind::P, AtomKind::C4));
    assert_eq!((segments[1].atom_a, segments[1].atom_b), (AtomKind::C4, AtomKind::P));
    assert_eq!(segments.last().unwrap().id, 3);
}
