//! Contour-level measurements and containment predicates.
//!
//! A contour is a closed loop stored without its closing vertex. These
//! functions are the containment half of the segment intersection utility:
//! the difference engine uses them to classify inputs whose boundaries never
//! cross.

use crate::primitives::{Point2, Segment2};
use crate::tolerance::point_on_segment;
use num_traits::Float;

/// Computes the signed area of a contour using the shoelace formula.
///
/// Positive for CCW winding, negative for CW winding.
pub fn contour_signed_area<F: Float>(vertices: &[Point2<F>]) -> F {
    if vertices.len() < 3 {
        return F::zero();
    }

    let mut area = F::zero();
    let n = vertices.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area = area + vertices[i].x * vertices[j].y;
        area = area - vertices[j].x * vertices[i].y;
    }

    area / (F::one() + F::one())
}

/// Returns the axis-aligned bounding box of a contour as (min, max) points.
pub fn contour_bounding_box<F: Float>(vertices: &[Point2<F>]) -> Option<(Point2<F>, Point2<F>)> {
    let first = *vertices.first()?;

    let mut min = first;
    let mut max = first;

    for v in &vertices[1..] {
        min.x = min.x.min(v.x);
        min.y = min.y.min(v.y);
        max.x = max.x.max(v.x);
        max.y = max.y.max(v.y);
    }

    Some((min, max))
}

/// Returns a copy of the contour wound in the requested direction.
pub fn oriented<F: Float>(vertices: &[Point2<F>], ccw: bool) -> Vec<Point2<F>> {
    let mut out = vertices.to_vec();
    let area = contour_signed_area(&out);
    if (ccw && area < F::zero()) || (!ccw && area > F::zero()) {
        out.reverse();
    }
    out
}

/// Tests if a point is strictly inside a contour using ray casting.
///
/// Points on the boundary may return either true or false; pair with
/// [`point_on_contour`] when the boundary matters.
pub fn point_in_contour<F: Float>(vertices: &[Point2<F>], point: Point2<F>) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let n = vertices.len();

    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];

        if ((vi.y > point.y) != (vj.y > point.y))
            && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Returns `true` if the point lies within `eps` of any edge of the contour.
pub fn point_on_contour<F: Float>(vertices: &[Point2<F>], point: Point2<F>, eps: F) -> bool {
    let n = vertices.len();
    (0..n).any(|i| {
        let edge = Segment2::new(vertices[i], vertices[(i + 1) % n]);
        point_on_segment(point, edge, eps)
    })
}

/// Boundary-consistent test that contour `a` lies inside contour `b`.
///
/// Each vertex of `a` is classified against `b`. Vertices on `b`'s boundary
/// are inconclusive; any conclusive vertex outside `b` makes the answer
/// false, and `a` is inside only when at least one vertex is conclusive and
/// every conclusive vertex is inside. When every vertex is inconclusive the
/// edge midpoints of `a` are classified by the same rule. A contour lying
/// entirely on `b`'s boundary is not inside it.
pub fn contour_inside<F: Float>(a: &[Point2<F>], b: &[Point2<F>], eps: F) -> bool {
    if a.is_empty() || b.len() < 3 {
        return false;
    }

    let n = a.len();
    let midpoints: Vec<Point2<F>> = (0..n).map(|i| a[i].midpoint(a[(i + 1) % n])).collect();

    let inside = [a, midpoints.as_slice()]
        .into_iter()
        .find_map(|points| all_conclusive_inside(points, b, eps))
        .unwrap_or(false);
    inside
}

/// `None` when every point lies on `b`'s boundary.
fn all_conclusive_inside<F: Float>(points: &[Point2<F>], b: &[Point2<F>], eps: F) -> Option<bool> {
    let mut conclusive = false;
    for &p in points {
        if point_on_contour(b, p, eps) {
            continue;
        }
        if !point_in_contour(b, p) {
            return Some(false);
        }
        conclusive = true;
    }
    conclusive.then_some(true)
}

/// Returns `true` if two contours describe the same loop.
///
/// The comparison allows a different starting vertex and per-point tolerance
/// `eps`, but not a different winding direction.
pub fn contours_match<F: Float>(a: &[Point2<F>], b: &[Point2<F>], eps: F) -> bool {
    if a.len() != b.len() {
        return false;
    }
    if a.is_empty() {
        return true;
    }

    let n = a.len();
    (0..n)
        .filter(|&k| a[0].approx_eq(b[k], eps))
        .any(|k| (0..n).all(|i| a[i].approx_eq(b[(i + k) % n], eps)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(min: f64, max: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(min, min),
            Point2::new(max, min),
            Point2::new(max, max),
            Point2::new(min, max),
        ]
    }

    #[test]
    fn test_signed_area_ccw_and_cw() {
        let ccw = square(0.0, 2.0);
        let mut cw = ccw.clone();
        cw.reverse();
        assert_relative_eq!(contour_signed_area(&ccw), 4.0, epsilon = 1e-12);
        assert_relative_eq!(contour_signed_area(&cw), -4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bounding_box() {
        let contour = vec![
            Point2::new(1.0_f64, 2.0),
            Point2::new(3.0, 1.0),
            Point2::new(4.0, 3.0),
            Point2::new(2.0, 4.0),
        ];
        let (min, max) = contour_bounding_box(&contour).unwrap();
        assert_eq!(min, Point2::new(1.0, 1.0));
        assert_eq!(max, Point2::new(4.0, 4.0));
        assert!(contour_bounding_box::<f64>(&[]).is_none());
    }

    #[test]
    fn test_oriented() {
        let ccw = square(0.0, 1.0);
        assert_eq!(oriented(&ccw, true), ccw);
        assert!(contour_signed_area(&oriented(&ccw, false)) < 0.0);
    }

    #[test]
    fn test_point_in_contour() {
        let sq = square(0.0, 2.0);
        assert!(point_in_contour(&sq, Point2::new(1.0, 1.0)));
        assert!(!point_in_contour(&sq, Point2::new(3.0, 1.0)));
    }

    #[test]
    fn test_point_in_concave_contour() {
        // L-shape: the notch at the top right is outside.
        let l = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert!(point_in_contour(&l, Point2::new(0.5, 1.5)));
        assert!(!point_in_contour(&l, Point2::new(1.5, 1.5)));
    }

    #[test]
    fn test_point_on_contour() {
        let sq = square(0.0, 2.0);
        assert!(point_on_contour(&sq, Point2::new(1.0, 0.0), 1e-9));
        assert!(point_on_contour(&sq, Point2::new(2.0, 2.0), 1e-9));
        assert!(!point_on_contour(&sq, Point2::new(1.0, 1.0), 1e-9));
    }

    #[test]
    fn test_contour_inside() {
        let big = square(-2.0, 2.0);
        let small = square(-1.0, 1.0);
        assert!(contour_inside(&small, &big, 1e-9));
        assert!(!contour_inside(&big, &small, 1e-9));
    }

    #[test]
    fn test_contour_inside_skips_boundary_vertices() {
        // Shares the corner (0, 0) and the bottom edge with the big square.
        let big = square(0.0, 4.0);
        let corner = square(0.0, 1.0);
        assert!(contour_inside(&corner, &big, 1e-9));
    }

    #[test]
    fn test_contour_inside_rejects_any_outside_vertex() {
        // The reflex corner (0, 0) is inside the small square, the rest is not.
        let l_shape = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(0.0, -1.0),
            Point2::new(1.0, -1.0),
            Point2::new(1.0, 1.0),
            Point2::new(-1.0, 1.0),
            Point2::new(-1.0, 0.0),
        ];
        let small = square(-0.5, 0.5);
        assert!(!contour_inside(&l_shape, &small, 1e-9));

        let mut rotated = l_shape.clone();
        for _ in 0..l_shape.len() {
            assert!(!contour_inside(&rotated, &small, 1e-9));
            rotated.rotate_left(1);
        }
    }

    #[test]
    fn test_identical_contours_are_not_inside() {
        let sq = square(0.0, 1.0);
        assert!(!contour_inside(&sq, &sq, 1e-9));
    }

    #[test]
    fn test_contours_match_rotated() {
        let a = square(0.0, 1.0);
        let mut b = a.clone();
        b.rotate_left(2);
        assert!(contours_match(&a, &b, 1e-9));

        let mut reversed = a.clone();
        reversed.reverse();
        assert!(!contours_match(&a, &reversed, 1e-9));
    }

    #[test]
    fn test_contours_match_tolerance() {
        let a = square(0.0, 1.0);
        let b: Vec<_> = a.iter().map(|p| Point2::new(p.x + 1e-10, p.y)).collect();
        assert!(contours_match(&a, &b, 1e-9));
        assert!(!contours_match(&a, &b, 1e-12));
    }
}
