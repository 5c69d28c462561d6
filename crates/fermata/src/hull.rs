//! Planar hull and polygon predicates used by the stability evaluator.
//!
//! - `convex_hull`: Andrew's monotone chain. Pops while the last turn is not a
//!   strict left turn (`cross <= 0`), so collinear points are dropped.
//! - `point_in_polygon`: even-odd ray casting (strict interior).
//! - `on_boundary`: collinearity within `eps` plus a bounding-box check per edge.
//!
//! Everything is iterative on plain vectors.

use std::cmp::Ordering;

use nalgebra::Vector2;

/// Signed area of the parallelogram (a→b, a→c). Positive for a left turn.
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

#[inline]
fn lexicographic(a: &Vector2<f64>, b: &Vector2<f64>) -> Ordering {
    match a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal) {
        Ordering::Equal => a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal),
        o => o,
    }
}

/// Distinct points in first-seen order (exact comparison).
pub fn distinct(points: impl IntoIterator<Item = Vector2<f64>>) -> Vec<Vector2<f64>> {
    let mut out: Vec<Vector2<f64>> = Vec::with_capacity(4);
    for p in points {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}

/// Monotone-chain convex hull of `points` (which should already be distinct).
///
/// Returns the hull with the duplicated chain endpoints removed. For inputs
/// of fewer than two points the input is returned unchanged; for collinear
/// inputs the result is the two extreme points.
pub fn convex_hull(points: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut pts = points.to_vec();
    pts.sort_by(lexicographic);

    let mut lower: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    hull
}

/// Even-odd ray casting; points exactly on an edge may land either way.
pub fn point_in_polygon(p: Vector2<f64>, polygon: &[Vector2<f64>]) -> bool {
    let n = polygon.len();
    let mut inside = false;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
    }
    inside
}

/// True if `p` lies on one of the polygon's edges (closed segments).
pub fn on_boundary(p: Vector2<f64>, polygon: &[Vector2<f64>], eps: f64) -> bool {
    let n = polygon.len();
    (0..n).any(|i| {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        cross(a, b, p).abs() < eps
            && a.x.min(b.x) <= p.x
            && p.x <= a.x.max(b.x)
            && a.y.min(b.y) <= p.y
            && p.y <= a.y.max(b.y)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn hull_drops_interior_and_collinear_points() {
        let pts = vec![
            vector![0.0, 0.0],
            vector![2.0, 0.0],
            vector![1.0, 0.0], // collinear on the bottom edge
            vector![2.0, 2.0],
            vector![0.0, 2.0],
            vector![1.0, 1.0], // interior
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&vector![1.0, 0.0]));
        assert!(!hull.contains(&vector![1.0, 1.0]));
        // counterclockwise starting at the lexicographic minimum
        assert_eq!(hull[0], vector![0.0, 0.0]);
        assert_eq!(hull[1], vector![2.0, 0.0]);
    }

    #[test]
    fn collinear_input_keeps_extremes() {
        let hull = convex_hull(&[vector![0.0, 0.0], vector![1.0, 1.0], vector![2.0, 2.0]]);
        assert_eq!(hull, vec![vector![0.0, 0.0], vector![2.0, 2.0]]);
    }

    #[test]
    fn ray_casting_and_boundary() {
        let square = convex_hull(&[
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
            vector![0.0, 1.0],
        ]);
        assert!(point_in_polygon(vector![0.5, 0.5], &square));
        assert!(!point_in_polygon(vector![1.5, 0.5], &square));
        assert!(on_boundary(vector![1.0, 0.25], &square, 1e-9));
        assert!(!on_boundary(vector![0.5, 0.5], &square, 1e-9));
        // on the edge's line but outside the segment
        assert!(!on_boundary(vector![2.0, 0.0], &square, 1e-9));
    }

    #[test]
    fn distinct_is_exact() {
        let d = distinct([vector![1.0, 1.0], vector![1.0, 1.0], vector![1.0, 1.0 + 1e-12]]);
        assert_eq!(d.len(), 2);
    }
}
