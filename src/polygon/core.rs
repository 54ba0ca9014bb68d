//! The polygon-with-holes data model.

use super::contour::{
    contour_bounding_box, contour_signed_area, contours_match, oriented, point_in_contour,
};
use crate::primitives::Point2;
use num_traits::Float;

/// A simple polygon with optional holes.
///
/// The outer `contour` is stored counter-clockwise (positive signed area) and
/// every hole clockwise. The constructors enforce this, and every polygon the
/// difference engines emit follows it, so downstream consumers such as a
/// triangulator can rely on it. Contours are implicitly closed.
///
/// A polygon whose contour has fewer than three vertices is degenerate and
/// represents nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<F> {
    /// The outer boundary in CCW order.
    pub contour: Vec<Point2<F>>,
    /// Hole boundaries, each in CW order.
    pub holes: Vec<Vec<Point2<F>>>,
}

impl<F: Float> Polygon<F> {
    /// Creates a polygon without holes.
    ///
    /// The contour is reversed if it was given clockwise.
    pub fn new(contour: Vec<Point2<F>>) -> Self {
        Self {
            contour: oriented(&contour, true),
            holes: Vec::new(),
        }
    }

    /// Creates a polygon with holes.
    ///
    /// The contour is wound CCW and each hole CW regardless of the input order.
    pub fn with_holes(contour: Vec<Point2<F>>, holes: Vec<Vec<Point2<F>>>) -> Self {
        Self {
            contour: oriented(&contour, true),
            holes: holes.iter().map(|h| oriented(h, false)).collect(),
        }
    }

    /// Creates an empty polygon.
    #[inline]
    pub fn empty() -> Self {
        Self {
            contour: Vec::new(),
            holes: Vec::new(),
        }
    }

    /// Returns true if the contour has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contour.is_empty()
    }

    /// Returns true if the contour cannot enclose any area.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.contour.len() < 3
    }

    /// Total number of vertices across the contour and all holes.
    pub fn vertex_count(&self) -> usize {
        self.contour.len() + self.holes.iter().map(Vec::len).sum::<usize>()
    }

    /// Returns the signed area of the outer contour.
    ///
    /// Positive for a correctly wound polygon.
    pub fn signed_area(&self) -> F {
        contour_signed_area(&self.contour)
    }

    /// Returns the enclosed area: the outer contour minus every hole.
    pub fn area(&self) -> F {
        self.holes
            .iter()
            .fold(self.signed_area().abs(), |acc, h| {
                acc - contour_signed_area(h).abs()
            })
    }

    /// Returns the bounding box of the outer contour as (min, max) points.
    pub fn bounding_box(&self) -> Option<(Point2<F>, Point2<F>)> {
        contour_bounding_box(&self.contour)
    }

    /// Tests if a point is inside the polygon and not inside any hole.
    pub fn contains(&self, point: Point2<F>) -> bool {
        point_in_contour(&self.contour, point)
            && !self.holes.iter().any(|h| point_in_contour(h, point))
    }

    /// Returns the outer contour in reverse (CW) order.
    ///
    /// This is the form a polygon takes when it becomes another polygon's hole.
    pub fn reversed_contour(&self) -> Vec<Point2<F>> {
        self.contour.iter().rev().copied().collect()
    }

    /// Returns true if the bounding boxes of the two outer contours overlap.
    pub fn bounds_overlap(&self, other: &Self) -> bool {
        match (self.bounding_box(), other.bounding_box()) {
            (Some((min_a, max_a)), Some((min_b, max_b))) => {
                !(max_a.x < min_b.x || max_b.x < min_a.x || max_a.y < min_b.y || max_b.y < min_a.y)
            }
            _ => false,
        }
    }

    /// Compares two polygons up to starting-vertex rotation and tolerance.
    ///
    /// Holes must match pairwise, in any order.
    pub fn approx_eq(&self, other: &Self, eps: F) -> bool {
        if !contours_match(&self.contour, &other.contour, eps)
            || self.holes.len() != other.holes.len()
        {
            return false;
        }

        let mut used = vec![false; other.holes.len()];
        self.holes.iter().all(|hole| {
            let found = other
                .holes
                .iter()
                .enumerate()
                .position(|(j, candidate)| !used[j] && contours_match(hole, candidate, eps));
            match found {
                Some(j) => {
                    used[j] = true;
                    true
                }
                None => false,
            }
        })
    }
}

impl<F: Float> Default for Polygon<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F: Float> From<Vec<Point2<F>>> for Polygon<F> {
    fn from(contour: Vec<Point2<F>>) -> Self {
        Self::new(contour)
    }
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
    fn test_polygon_new() {
        let poly: Polygon<f64> = Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        ]);
        assert_eq!(poly.vertex_count(), 3);
        assert!(!poly.is_empty());
        assert!(!poly.is_degenerate());
    }

    #[test]
    fn test_polygon_empty() {
        let poly: Polygon<f64> = Polygon::empty();
        assert!(poly.is_empty());
        assert!(poly.is_degenerate());
        assert_eq!(poly.vertex_count(), 0);
    }

    #[test]
    fn test_two_points_are_degenerate() {
        let poly = Polygon::new(vec![Point2::new(0.0_f64, 0.0), Point2::new(1.0, 0.0)]);
        assert!(poly.is_degenerate());
    }

    #[test]
    fn test_new_enforces_ccw() {
        let mut cw = square(0.0, 1.0);
        cw.reverse();
        let poly = Polygon::new(cw);
        assert!(poly.signed_area() > 0.0);
    }

    #[test]
    fn test_with_holes_enforces_cw_holes() {
        let poly = Polygon::with_holes(square(-2.0, 2.0), vec![square(-1.0, 1.0)]);
        assert!(poly.signed_area() > 0.0);
        assert!(contour_signed_area(&poly.holes[0]) < 0.0);
    }

    #[test]
    fn test_area_subtracts_holes() {
        let poly = Polygon::with_holes(square(-2.0, 2.0), vec![square(-1.0, 1.0)]);
        assert_relative_eq!(poly.area(), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_contains_respects_holes() {
        let poly = Polygon::with_holes(square(-2.0, 2.0), vec![square(-1.0, 1.0)]);
        assert!(poly.contains(Point2::new(1.5, 1.5)));
        assert!(!poly.contains(Point2::new(0.0, 0.0)));
        assert!(!poly.contains(Point2::new(3.0, 0.0)));
    }

    #[test]
    fn test_bounds_overlap() {
        let a = Polygon::new(square(0.0, 1.0));
        let b = Polygon::new(square(0.5, 1.5));
        let c = Polygon::new(square(2.0, 3.0));
        assert!(a.bounds_overlap(&b));
        assert!(!a.bounds_overlap(&c));
        assert!(!a.bounds_overlap(&Polygon::empty()));
    }

    #[test]
    fn test_reversed_contour() {
        let poly = Polygon::new(square(0.0, 1.0));
        let rev = poly.reversed_contour();
        assert!(contour_signed_area(&rev) < 0.0);
        assert_eq!(rev[0], Point2::new(0.0, 1.0));
    }

    #[test]
    fn test_approx_eq_rotation_and_holes() {
        let a = Polygon::with_holes(
            square(-3.0, 3.0),
            vec![square(-2.0, -1.0), square(1.0, 2.0)],
        );

        let mut contour = a.contour.clone();
        contour.rotate_left(1);
        let mut first_hole = a.holes[0].clone();
        first_hole.rotate_left(3);
        let b = Polygon {
            contour,
            holes: vec![a.holes[1].clone(), first_hole],
        };

        assert!(a.approx_eq(&b, 1e-9));
        assert!(!a.approx_eq(&Polygon::new(square(-3.0, 3.0)), 1e-9));
    }

    #[test]
    fn test_polygon_f32() {
        let poly: Polygon<f32> = Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]);
        assert!((poly.area() - 1.0).abs() < 0.001);
    }
}
