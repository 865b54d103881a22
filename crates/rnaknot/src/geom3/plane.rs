use nalgebra::{Matrix3, Vector2, Vector3};

/// Convergence threshold for the Jacobi sweep (max off-diagonal magnitude).
const JACOBI_EPS: f64 = 1e-12;
/// Iteration cap; 3×3 symmetric matrices converge in far fewer sweeps.
const JACOBI_MAX_SWEEPS: usize = 50;

/// Best-fit plane frame through a point cloud.
///
/// Invariants: `|normal| = 1`, `|e1| = 1`, `e1 · normal = 0`, and
/// `e2 = normal × e1`, so `(e1, e2, normal)` is right-handed.
#[derive(Clone, Copy, Debug)]
pub struct Plane {
    pub centroid: Vector3<f64>,
    pub normal: Vector3<f64>,
    pub e1: Vector3<f64>,
    pub e2: Vector3<f64>,
}

impl Plane {
    /// Signed distance of `p` from the plane along the normal.
    #[inline]
    pub fn signed_distance(&self, p: Vector3<f64>) -> f64 {
        (p - self.centroid).dot(&self.normal)
    }

    /// In-plane coordinates of `p` in the `(e1, e2)` basis.
    #[inline]
    pub fn project(&self, p: Vector3<f64>) -> Vector2<f64> {
        let d = p - self.centroid;
        Vector2::new(d.dot(&self.e1), d.dot(&self.e2))
    }

    /// 3-D point of in-plane coordinates `q`.
    #[inline]
    pub fn lift(&self, q: Vector2<f64>) -> Vector3<f64> {
        self.centroid + self.e1 * q.x + self.e2 * q.y
    }
}

/// Eigen-decomposition of a symmetric 3×3 matrix by cyclic Jacobi rotations.
///
/// Each iteration zeroes the off-diagonal entry of greatest magnitude with a
/// Givens rotation, accumulating the rotations into the eigenvector matrix
/// (columns). Terminates once the largest off-diagonal magnitude drops below
/// `JACOBI_EPS`.
fn jacobi_eigen(mut a: Matrix3<f64>) -> (Vector3<f64>, Matrix3<f64>) {
    let mut vecs = Matrix3::identity();
    for _ in 0..JACOBI_MAX_SWEEPS {
        let mut p = 0;
        let mut q = 1;
        let mut max_offdiag = a[(0, 1)].abs();
        for i in 0..3 {
            for j in (i + 1)..3 {
                if a[(i, j)].abs() > max_offdiag {
                    max_offdiag = a[(i, j)].abs();
                    p = i;
                    q = j;
                }
            }
        }
        if max_offdiag < JACOBI_EPS {
            break;
        }
        let phi = 0.5 * (2.0 * a[(p, q)]).atan2(a[(q, q)] - a[(p, p)]);
        let c = phi.cos();
        let s = phi.sin();

        let app = c * c * a[(p, p)] - 2.0 * s * c * a[(p, q)] + s * s * a[(q, q)];
        let aqq = s * s * a[(p, p)] + 2.0 * s * c * a[(p, q)] + c * c * a[(q, q)];
        a[(p, p)] = app;
        a[(q, q)] = aqq;
        a[(p, q)] = 0.0;
        a[(q, p)] = 0.0;

        for k in 0..3 {
            if k == p || k == q {
                continue;
            }
            let akp = c * a[(k, p)] - s * a[(k, q)];
            let akq = s * a[(k, p)] + c * a[(k, q)];
            a[(k, p)] = akp;
            a[(p, k)] = akp;
            a[(k, q)] = akq;
            a[(q, k)] = akq;
        }

        for k in 0..3 {
            let vkp = c * vecs[(k, p)] - s * vecs[(k, q)];
            let vkq = s * vecs[(k, p)] + c * vecs[(k, q)];
            vecs[(k, p)] = vkp;
            vecs[(k, q)] = vkq;
        }
    }
    (Vector3::new(a[(0, 0)], a[(1, 1)], a[(2, 2)]), vecs)
}

/// Fit a plane to `points` by principal-axis decomposition.
///
/// The normal is the eigenvector of the smallest covariance eigenvalue.
/// Returns `None` for fewer than 3 points, a degenerate spread
/// (`lambda_max <= 0`), or a near-collinear cloud
/// (`lambda_mid / lambda_max < eps_collinear`).
pub fn fit_plane(points: &[Vector3<f64>], eps_collinear: f64) -> Option<Plane> {
    if points.len() < 3 {
        return None;
    }
    let mut centroid = Vector3::zeros();
    for &p in points {
        centroid += p;
    }
    centroid /= points.len() as f64;

    let mut cov = Matrix3::zeros();
    for &p in points {
        let d = p - centroid;
        cov += d * d.transpose();
    }

    let (evals, evecs) = jacobi_eigen(cov);
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| evals[a].partial_cmp(&evals[b]).unwrap_or(std::cmp::Ordering::Equal));
    let [min_idx, mid_idx, max_idx] = order;
    if evals[max_idx] <= 0.0 {
        return None;
    }
    // Collinearity leaves only one significant principal axis, so the test is
    // on the middle eigenvalue: an exactly planar cloud (lambda_min = 0) is
    // the best case for a fit, not a degenerate one.
    if evals[mid_idx] / evals[max_idx] < eps_collinear {
        return None;
    }

    let n = evecs.column(min_idx).into_owned();
    let norm = n.norm();
    if norm <= 0.0 {
        return None;
    }
    let normal = n / norm;
    let r = if normal.x.abs() < 0.9 {
        Vector3::new(1.0, 0.0, 0.0)
    } else {
        Vector3::new(0.0, 1.0, 0.0)
    };
    let e1 = r.cross(&normal).normalize();
    let e2 = normal.cross(&e1);
    Some(Plane {
        centroid,
        normal,
        e1,
        e2,
    })
}
