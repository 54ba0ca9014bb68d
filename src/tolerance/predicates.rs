//! Geometric predicates with explicit tolerance, and the segment crossing
//! primitive used by the boundary walk.

use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points are counter-clockwise (positive area).
    CounterClockwise,
    /// Points are clockwise (negative area).
    Clockwise,
    /// Points are collinear (within tolerance).
    Collinear,
}

/// Computes the orientation of three points with tolerance.
///
/// Returns the orientation of the triangle formed by points `a`, `b`, `c`:
/// - `CounterClockwise` if `c` is to the left of the line from `a` to `b`
/// - `Clockwise` if `c` is to the right of the line from `a` to `b`
/// - `Collinear` if `c` is on the line (within `eps` tolerance)
///
/// `eps` is compared against the absolute value of the cross product (twice
/// the signed area of the triangle).
#[inline]
pub fn orient2d<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, eps: F) -> Orientation {
    let cross = (b - a).cross(c - a);

    if cross > eps {
        Orientation::CounterClockwise
    } else if cross < -eps {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Checks if a point lies on a line segment within tolerance.
///
/// Returns `true` if the point `p` is within distance `eps` of the segment.
#[inline]
pub fn point_on_segment<F: Float>(p: Point2<F>, segment: Segment2<F>, eps: F) -> bool {
    segment.distance_squared_to_point(p) <= eps * eps
}

/// A proper crossing between two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing<F> {
    /// The crossing point.
    pub point: Point2<F>,
    /// Parameter along the first segment (0 = start, 1 = end).
    pub t_a: F,
    /// Parameter along the second segment (0 = start, 1 = end).
    pub t_b: F,
}

/// Intersects segment `a0 → a1` with segment `b0 → b1`.
///
/// Solves `a0 + t_a·(a1 − a0) = b0 + t_b·(b1 − b0)` with 2D cross products and
/// reports the crossing only when both parameters lie in `[0, 1]`.
///
/// Parallel segments never cross, including collinear and overlapping ones:
/// the test is an exact comparison of the direction cross product with zero.
/// Shared boundary is left to the walk's advance rule.
pub fn segment_crossing<F: Float>(
    a0: Point2<F>,
    a1: Point2<F>,
    b0: Point2<F>,
    b1: Point2<F>,
) -> Option<Crossing<F>> {
    let da = a1 - a0;
    let db = b1 - b0;
    let denom = da.cross(db);

    if denom == F::zero() {
        return None;
    }

    let d = b0 - a0;
    let t_a = d.cross(db) / denom;
    let t_b = d.cross(da) / denom;

    let zero = F::zero();
    let one = F::one();
    if t_a < zero || t_a > one || t_b < zero || t_b > one {
        return None;
    }

    Some(Crossing {
        point: a0 + da * t_a,
        t_a,
        t_b,
    })
}
