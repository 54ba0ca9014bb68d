//! Polygon difference engines.
//!
//! A [`DifferenceEngine`] removes every point covered by a clip polygon from a
//! subject polygon and returns the pieces that remain, each with its outer
//! contour counter-clockwise and its holes clockwise.
//!
//! - [`BoundaryWalk`]: floating-point boundary walk, checked against and
//!   backed by a crossing-graph trace, with containment classification
//! - `ClipperEngine` (feature `clipper`): fixed-point integer clipping
//!
//! # Example
//!
//! ```
//! use fractum::difference::{BoundaryWalk, DifferenceEngine};
//! use fractum::{Point2, Polygon};
//!
//! let wall = Polygon::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(4.0, 0.0),
//!     Point2::new(4.0, 2.0),
//!     Point2::new(0.0, 2.0),
//! ]);
//! let blast = Polygon::new(vec![
//!     Point2::new(1.0, -1.0),
//!     Point2::new(3.0, -1.0),
//!     Point2::new(3.0, 3.0),
//!     Point2::new(1.0, 3.0),
//! ]);
//!
//! let pieces = BoundaryWalk::default().subtract(&wall, &blast).unwrap();
//! assert_eq!(pieces.len(), 2);
//! ```

mod boundary;
#[cfg(feature = "clipper")]
mod clipper;
mod merge;
mod trace;
mod walk;

pub use boundary::BoundaryWalk;
#[cfg(feature = "clipper")]
pub use clipper::ClipperEngine;
pub use merge::{union_contours, ContourUnion};
pub use trace::difference_contours;
pub use walk::boundary_walk;

use crate::error::FractureError;
use crate::polygon::Polygon;
use num_traits::Float;

/// A polygon difference algorithm.
pub trait DifferenceEngine<F> {
    /// Returns the polygons remaining after removing `clip` from `subject`.
    ///
    /// Inputs are never mutated. A degenerate subject yields no polygons and a
    /// degenerate clip yields a copy of the subject.
    fn subtract(
        &self,
        subject: &Polygon<F>,
        clip: &Polygon<F>,
    ) -> Result<Vec<Polygon<F>>, FractureError>;
}

impl<F, E: DifferenceEngine<F> + ?Sized> DifferenceEngine<F> for &E {
    fn subtract(
        &self,
        subject: &Polygon<F>,
        clip: &Polygon<F>,
    ) -> Result<Vec<Polygon<F>>, FractureError> {
        (**self).subtract(subject, clip)
    }
}

/// Subtracts `clip` from `subject` with a default [`BoundaryWalk`].
pub fn subtract<F: Float>(
    subject: &Polygon<F>,
    clip: &Polygon<F>,
) -> Result<Vec<Polygon<F>>, FractureError> {
    BoundaryWalk::default().subtract(subject, clip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Point2;
    use approx::assert_relative_eq;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
        Polygon::new(vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
    }

    #[test]
    fn test_free_subtract_uses_boundary_walk() {
        let subject = rect(0.0, 0.0, 4.0, 2.0);
        let clip = rect(1.0, -1.0, 3.0, 3.0);

        let pieces = subtract(&subject, &clip).unwrap();
        assert_eq!(pieces.len(), 2);
        for piece in &pieces {
            assert_relative_eq!(piece.area(), 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_engine_by_reference() {
        fn run<E: DifferenceEngine<f64>>(engine: E) -> usize {
            let subject = rect(0.0, 0.0, 1.0, 1.0);
            let clip = rect(5.0, 5.0, 6.0, 6.0);
            engine.subtract(&subject, &clip).unwrap().len()
        }

        let engine = BoundaryWalk::default();
        assert_eq!(run(&engine), 1);
    }
}
