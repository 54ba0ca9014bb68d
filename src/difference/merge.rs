//! Contour union for merging a new cavity with the holes it breaks into.
//!
//! The union is traced through the crossing graph of the two contours with
//! `A ∪ B` as the target region. The trace yields the union's outer boundary
//! (counter-clockwise) and any pockets the two contours enclose between them
//! (clockwise).

use super::trace::trace_region;
use crate::error::FractureError;
use crate::polygon::{contour_signed_area, point_in_contour};
use crate::primitives::Point2;
use num_traits::Float;

/// The union of two crossing contours.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourUnion<F> {
    /// Outer boundary, counter-clockwise.
    pub outer: Vec<Point2<F>>,
    /// Regions enclosed by the union but covered by neither contour, each
    /// counter-clockwise.
    pub islands: Vec<Vec<Point2<F>>>,
}

/// Computes the union of two counter-clockwise contours whose boundaries
/// cross.
///
/// Returns `Ok(None)` when the boundaries never cross; the caller decides
/// containment. A trace that fails to close, or a union with anything other
/// than exactly one outer boundary, is an unclassifiable topology.
pub fn union_contours<F: Float>(
    a: &[Point2<F>],
    b: &[Point2<F>],
    eps: F,
) -> Result<Option<ContourUnion<F>>, FractureError> {
    let Some(loops) = trace_region(a, b, eps, |p| {
        point_in_contour(a, p) || point_in_contour(b, p)
    })?
    else {
        return Ok(None);
    };

    let (outer, pockets): (Vec<_>, Vec<_>) = loops
        .into_iter()
        .partition(|l| contour_signed_area(l) > F::zero());

    let mut outer = outer.into_iter();
    let (Some(outer), None) = (outer.next(), outer.next()) else {
        return Err(FractureError::topology(
            "contour union did not yield exactly one outer boundary",
        ));
    };

    let islands = pockets
        .into_iter()
        .map(|mut p| {
            p.reverse();
            p
        })
        .collect();

    Ok(Some(ContourUnion { outer, islands }))
}
