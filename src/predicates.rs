use crate::face::Face;

/// True when two nodes are within `res` of each other in Euclidean distance.
#[inline]
pub fn points_equal(a: [f64; 3], b: [f64; 3], res: f64) -> bool {
    point_distance(a, b) < res
}

#[inline]
pub fn point_distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// True when two nodes agree to within `res` in each coordinate separately.
#[inline]
pub fn components_equal(a: [f64; 3], b: [f64; 3], res: f64) -> bool {
    (a[0] - b[0]).abs() < res && (a[1] - b[1]).abs() < res && (a[2] - b[2]).abs() < res
}

/// True when both faces have the same shape and every pair of corresponding
/// nodes agrees to within `res` in each coordinate.
pub fn faces_equal(a: &Face, b: &Face, res: f64) -> bool {
    if a.shape() != b.shape() {
        return false;
    }
    a.points()
        .iter()
        .zip(b.points().iter())
        .all(|(p, q)| components_equal(*p, *q, res))
}

/// True when face `b` is a rigid translation of face `a`.
///
/// The per-node coordinate offsets `|a - b|` are allowed any magnitude, but
/// their spread over the face must stay below `2*res` in each coordinate.
pub fn faces_parallel(a: &Face, b: &Face, res: f64) -> bool {
    if a.shape() != b.shape() {
        return false;
    }
    let mut lo = [f64::INFINITY; 3];
    let mut hi = [f64::NEG_INFINITY; 3];
    for (p, q) in a.points().iter().zip(b.points().iter()) {
        for c in 0..3 {
            let d = (p[c] - q[c]).abs();
            lo[c] = lo[c].min(d);
            hi[c] = hi[c].max(d);
        }
    }
    (0..3).all(|c| hi[c] - lo[c] < 2.0 * res)
}

/// True when face `b` is face `a` rotated rigidly about the z axis.
///
/// For each node pair the cosine of the angle between the xy projections is
/// computed; a rigid rotation keeps it constant over the face, so the spread
/// must stay below `0.02*res`.
pub fn faces_rotated(a: &Face, b: &Face, res: f64) -> bool {
    if a.shape() != b.shape() {
        return false;
    }
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for (p, q) in a.points().iter().zip(b.points().iter()) {
        let dot = p[0] * q[0] + p[1] * q[1];
        let na = (p[0] * p[0] + p[1] * p[1]).sqrt();
        let nb = (q[0] * q[0] + q[1] * q[1]).sqrt();
        let cos = dot / (na * nb);
        if !cos.is_finite() {
            // a node on the rotation axis has no defined angle
            return false;
        }
        lo = lo.min(cos);
        hi = hi.max(cos);
    }
    hi - lo < 0.02 * res
}

/// Locate the face node nearest to `p`, if it lies within `res`.
///
/// Ties keep the first node in row-major order.
pub fn nearest_point_in_face(face: &Face, p: [f64; 3], res: f64) -> Option<(usize, usize)> {
    let mut best = f64::INFINITY;
    let mut best_at = (0, 0);
    for r in 0..face.rows() {
        for c in 0..face.cols() {
            let d = point_distance(face.at(r, c), p);
            if d < best {
                best = d;
                best_at = (r, c);
            }
        }
    }
    if best < res {
        Some(best_at)
    } else {
        None
    }
}

/// Distance from `p` to the nearest node of a polyline sampled as points.
pub fn curve_distance(curve: &[[f64; 3]], p: [f64; 3]) -> f64 {
    curve
        .iter()
        .map(|q| point_distance(*q, p))
        .fold(f64::INFINITY, f64::min)
}
