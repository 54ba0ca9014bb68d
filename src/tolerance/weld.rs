//! Contour cleanup and vertex quantization.
//!
//! Every contour the difference engines emit passes through
//! [`simplify_contour`], so output polygons never carry repeated or collinear
//! consecutive vertices. [`vertex_key`] gives the quantized vertex identity the
//! connectivity grouper compares.
//!
//! # Example
//!
//! ```
//! use fractum::tolerance::simplify_contour;
//! use fractum::Point2;
//!
//! let contour = vec![
//!     Point2::new(0.0_f64, 0.0),
//!     Point2::new(1.0, 0.0),     // On the bottom edge
//!     Point2::new(2.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(2.0, 2.0),     // Repeated corner
//!     Point2::new(0.0, 2.0),
//! ];
//!
//! let cleaned = simplify_contour(&contour, 1e-9);
//! assert_eq!(cleaned.len(), 4);
//! ```

use super::predicates::{orient2d, Orientation};
use crate::primitives::Point2;
use num_traits::Float;

/// Quantized vertex identity: coordinates divided by the grid size, rounded.
pub type VertexKey = (i64, i64);

/// Removes repeated vertices from a closed contour while preserving order.
///
/// Consecutive points within `epsilon` of each other are merged, including the
/// wrap-around pair (last, first).
///
/// # Example
///
/// ```
/// use fractum::tolerance::remove_duplicate_vertices;
/// use fractum::Point2;
///
/// let points = vec![
///     Point2::new(0.0_f64, 0.0),
///     Point2::new(0.001, 0.0),  // Duplicate of previous
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 0.0),    // Closes onto the first point
/// ];
///
/// let cleaned = remove_duplicate_vertices(&points, 0.01);
/// assert_eq!(cleaned.len(), 3);
/// ```
pub fn remove_duplicate_vertices<F: Float>(points: &[Point2<F>], epsilon: F) -> Vec<Point2<F>> {
    let mut result: Vec<Point2<F>> = Vec::with_capacity(points.len());

    for &p in points {
        match result.last() {
            Some(&last) if last.approx_eq(p, epsilon) => {}
            _ => result.push(p),
        }
    }

    while result.len() > 1 && result[result.len() - 1].approx_eq(result[0], epsilon) {
        result.pop();
    }

    result
}

/// Removes vertices of a closed contour that lie on the line through their
/// neighbours.
///
/// The test is angular: a vertex is dropped when the sine of the turn at it is
/// at most `epsilon`, so the tolerance does not depend on coordinate scale.
/// Spikes (a vertex where the contour doubles back on itself) are dropped too.
pub fn remove_collinear_vertices<F: Float>(points: &[Point2<F>], epsilon: F) -> Vec<Point2<F>> {
    let mut result = points.to_vec();

    while result.len() >= 3 {
        let n = result.len();
        let collinear = (0..n).find(|&i| {
            let prev = result[(i + n - 1) % n];
            let cur = result[i];
            let next = result[(i + 1) % n];
            let tol = epsilon * (cur - prev).magnitude() * (next - cur).magnitude();
            orient2d(prev, cur, next, tol) == Orientation::Collinear
        });

        match collinear {
            Some(i) => {
                result.remove(i);
            }
            None => break,
        }
    }

    result
}

/// Cleans a closed contour for output.
///
/// Drops repeated and collinear vertices. Returns an empty contour when fewer
/// than three vertices survive, which callers treat as "nothing".
pub fn simplify_contour<F: Float>(points: &[Point2<F>], epsilon: F) -> Vec<Point2<F>> {
    let deduped = remove_duplicate_vertices(points, epsilon);
    let cleaned = remove_collinear_vertices(&deduped, epsilon);

    if cleaned.len() < 3 {
        Vec::new()
    } else {
        cleaned
    }
}

/// Snaps a vertex to a grid of size `quantum` and returns its integer key.
///
/// Two vertices with the same key are the same vertex for connectivity
/// purposes. Returns `None` for non-finite coordinates or coordinates that do
/// not fit the integer range after scaling.
pub fn vertex_key<F: Float>(p: Point2<F>, quantum: F) -> Option<VertexKey> {
    if !p.is_finite() {
        return None;
    }

    let x = (p.x / quantum).round().to_i64()?;
    let y = (p.y / quantum).round().to_i64()?;
    Some((x, y))
}
