//! Contour edges as standalone segments.

use super::Point2;
use num_traits::Float;

/// One edge of a contour, from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2<F> {
    pub start: Point2<F>,
    pub end: Point2<F>,
}

impl<F: Float> Segment2<F> {
    #[inline]
    pub fn new(start: Point2<F>, end: Point2<F>) -> Self {
        Self { start, end }
    }

    /// Squared distance from `p` to the nearest point of the edge.
    ///
    /// A zero-length edge measures to its start.
    pub fn distance_squared_to_point(self, p: Point2<F>) -> F {
        let along = self.end - self.start;
        let len_sq = along.dot(along);
        if len_sq <= F::epsilon() {
            return p.distance_squared(self.start);
        }

        let t = ((p - self.start).dot(along) / len_sq)
            .max(F::zero())
            .min(F::one());
        p.distance_squared(self.start + along * t)
    }
}
