use nalgebra::Vector2;

/// Planar polygon, vertices in order (closing edge implied).
///
/// Invariant: at least 3 vertices. Constructors return `None` below that, so
/// holding a `Polygon2` means the outline is usable.
#[derive(Clone, Debug)]
pub struct Polygon2 {
    pub vertices: Vec<Vector2<f64>>,
}

impl Polygon2 {
    pub fn new(vertices: Vec<Vector2<f64>>) -> Option<Self> {
        (vertices.len() >= 3).then_some(Self { vertices })
    }
}

/// Signed area of a polygon given by `vertices` in order.
/// Positive for counterclockwise orientation.
pub fn signed_area(vertices: &[Vector2<f64>]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for k in 0..vertices.len() {
        let a = vertices[k];
        let b = vertices[(k + 1) % vertices.len()];
        area += a.x * b.y - a.y * b.x;
    }
    0.5 * area
}

/// Squared distance from `p` to the segment `[a, b]`.
pub(crate) fn dist2_point_segment(
    p: Vector2<f64>,
    a: Vector2<f64>,
    b: Vector2<f64>,
) -> f64 {
    let v = b - a;
    let w = p - a;
    let vv = v.dot(&v);
    if vv <= 0.0 {
        return w.dot(&w);
    }
    let t = w.dot(&v) / vv;
    if t < 0.0 {
        return w.dot(&w);
    }
    if t > 1.0 {
        let d = p - b;
        return d.dot(&d);
    }
    let d = p - (a + v * t);
    d.dot(&d)
}

/// Point membership with the edge-epsilon rule.
///
/// Points within `eps_edge` of any edge count as inside; otherwise a
/// horizontal-ray crossing-parity test decides.
pub fn point_in_polygon(q: Vector2<f64>, poly: &Polygon2, eps_edge: f64) -> bool {
    let vs = &poly.vertices;
    let eps2 = eps_edge * eps_edge;
    for k in 0..vs.len() {
        if dist2_point_segment(q, vs[k], vs[(k + 1) % vs.len()]) <= eps2 {
            return true;
        }
    }
    let mut inside = false;
    let mut j = vs.len() - 1;
    for i in 0..vs.len() {
        let pi = vs[i];
        let pj = vs[j];
        // The tiny denominator guard keeps horizontal edges from dividing by
        // zero; such edges never flip parity because the y-straddle test
        // already fails for them.
        let straddles = (pi.y > q.y) != (pj.y > q.y);
        if straddles && q.x < (pj.x - pi.x) * (q.y - pi.y) / (pj.y - pi.y + 1e-12) + pi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
