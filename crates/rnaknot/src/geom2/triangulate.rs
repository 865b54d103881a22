use nalgebra::Vector2;

use super::polygon::signed_area;

#[inline]
fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

fn point_in_triangle(
    p: Vector2<f64>,
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
    eps: f64,
) -> bool {
    let c1 = cross(a, b, p);
    let c2 = cross(b, c, p);
    let c3 = cross(c, a, p);
    let has_neg = c1 < -eps || c2 < -eps || c3 < -eps;
    let has_pos = c1 > eps || c2 > eps || c3 > eps;
    !(has_neg && has_pos)
}

/// Ear-clipping triangulation of a simple polygon.
///
/// Returns index triples into `poly`. Orientation is taken from the signed
/// area; a near-degenerate outline (|area| <= eps) or a failure to find an
/// ear (self-intersecting input) yields an empty list.
pub fn ear_clip(poly: &[Vector2<f64>], eps: f64) -> Vec<[usize; 3]> {
    let mut tris = Vec::new();
    if poly.len() < 3 {
        return tris;
    }
    let area = signed_area(poly);
    if area.abs() <= eps {
        return tris;
    }
    let orientation = if area > 0.0 { 1.0 } else { -1.0 };
    let mut indices: Vec<usize> = (0..poly.len()).collect();

    let mut guard = 0;
    while indices.len() > 3 && guard < 10_000 {
        let n = indices.len();
        let mut ear_found = false;
        for i in 0..n {
            let i_prev = indices[(i + n - 1) % n];
            let i_curr = indices[i];
            let i_next = indices[(i + 1) % n];
            let a = poly[i_prev];
            let b = poly[i_curr];
            let c = poly[i_next];
            if orientation * cross(a, b, c) <= eps {
                continue;
            }
            let blocked = indices.iter().any(|&idx| {
                idx != i_prev && idx != i_curr && idx != i_next && point_in_triangle(poly[idx], a, b, c, eps)
            });
            if blocked {
                continue;
            }
            tris.push([i_prev, i_curr, i_next]);
            indices.remove(i);
            ear_found = true;
            break;
        }
        if !ear_found {
            tris.clear();
            return tris;
        }
        guard += 1;
    }
    if indices.len() == 3 {
        tris.push([indices[0], indices[1], indices[2]]);
    }
    tris
}
