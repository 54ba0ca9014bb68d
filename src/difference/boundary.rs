//! The boundary-walk difference engine.

use super::merge::union_contours;
use super::trace::{difference_contours, find_crossings, is_difference};
use super::walk::boundary_walk;
use super::DifferenceEngine;
use crate::config::Tolerances;
use crate::error::FractureError;
use crate::polygon::{
    contour_inside, contours_match, oriented, point_in_contour, point_on_contour, Polygon,
};
use crate::primitives::Point2;
use crate::tolerance::simplify_contour;
use log::debug;
use num_traits::Float;

/// Difference engine built on the boundary walk.
///
/// The walk handles outer contours whose boundaries cross. Its loops are
/// checked against the crossings and the region they should bound; when the
/// check fails, or the walk does not close, the pieces are traced through the
/// crossing graph instead. Inputs that never cross are classified by
/// containment: the subject vanishes, gains a hole, or is returned as-is.
/// Subject holes are honoured in both cases; clip holes are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryWalk<F> {
    tolerances: Tolerances<F>,
}

impl<F: Float> BoundaryWalk<F> {
    /// Creates an engine with the given tolerances.
    pub fn new(tolerances: Tolerances<F>) -> Self {
        Self { tolerances }
    }

    /// Returns the engine's tolerances.
    pub fn tolerances(&self) -> Tolerances<F> {
        self.tolerances
    }

    fn classify(
        &self,
        subject: &Polygon<F>,
        outer: &[Point2<F>],
        cutter: &[Point2<F>],
    ) -> Result<Vec<Polygon<F>>, FractureError> {
        let eps = self.tolerances.epsilon;

        if contour_inside(outer, cutter, eps) {
            debug!("subject lies inside clip; consumed");
            return Ok(Vec::new());
        }

        if contour_inside(cutter, outer, eps) {
            return self.punch_hole(subject, outer, cutter);
        }

        if contours_match(outer, cutter, eps) {
            debug!("subject coincides with clip; consumed");
            return Ok(Vec::new());
        }

        debug!("clip does not reach subject");
        Ok(vec![subject.clone()])
    }

    /// The pieces of `outer` outside `cutter`, whose boundaries cross.
    fn cut(
        &self,
        outer: &[Point2<F>],
        cutter: &[Point2<F>],
    ) -> Result<Vec<Vec<Point2<F>>>, FractureError> {
        let eps = self.tolerances.epsilon;

        match boundary_walk(outer, cutter, eps) {
            Ok(loops) if is_difference(&loops, outer, cutter, eps) => return Ok(loops),
            Ok(loops) => debug!("rejected {} walk loops; tracing crossings", loops.len()),
            Err(err) => debug!("{}; tracing crossings", err),
        }

        let loops = difference_contours(outer, cutter, eps)?.unwrap_or_default();
        let escapes = outer
            .iter()
            .any(|&v| !point_on_contour(cutter, v, eps) && !point_in_contour(cutter, v));
        if loops.is_empty() && escapes {
            return Err(FractureError::topology(
                "boundaries cross but no piece closed around a subject vertex outside the clip",
            ));
        }
        Ok(loops)
    }

    /// Cuts `cutter` out of the interior of `subject`.
    ///
    /// Holes the cavity breaks into are merged with it. Material the merged
    /// cavity encloses becomes separate island polygons.
    fn punch_hole(
        &self,
        subject: &Polygon<F>,
        outer: &[Point2<F>],
        cutter: &[Point2<F>],
    ) -> Result<Vec<Polygon<F>>, FractureError> {
        let eps = self.tolerances.epsilon;

        let mut holes: Vec<Vec<Point2<F>>> =
            subject.holes.iter().map(|h| oriented(h, true)).collect();
        let mut cavity = cutter.to_vec();
        let mut islands: Vec<Vec<Point2<F>>> = Vec::new();
        let mut merged = 0;

        while let Some((i, union)) = merge_next(&cavity, &holes, eps)? {
            holes.remove(i);
            cavity = union.outer;
            islands.extend(union.islands);
            merged += 1;
        }

        if merged == 0
            && holes
                .iter()
                .any(|h| contour_inside(&cavity, h, eps) || contours_match(&cavity, h, eps))
        {
            debug!("clip lies inside an existing hole");
            return Ok(vec![subject.clone()]);
        }

        let mut kept = Vec::with_capacity(holes.len() + 1);
        let mut island_holes = vec![Vec::new(); islands.len()];
        for hole in holes {
            if !contour_inside(&hole, &cavity, eps) {
                kept.push(hole);
            } else if let Some(k) = islands
                .iter()
                .position(|island| contour_inside(&hole, island, eps))
            {
                island_holes[k].push(hole);
            } else {
                debug!("hole absorbed by cavity");
            }
        }
        kept.push(cavity);

        debug!(
            "clip punched a hole; merged {} existing holes, {} islands",
            merged,
            islands.len()
        );

        let mut out = Vec::with_capacity(islands.len() + 1);
        out.push(Polygon::with_holes(outer.to_vec(), kept));
        out.extend(
            islands
                .into_iter()
                .zip(island_holes)
                .map(|(island, holes)| Polygon::with_holes(island, holes)),
        );
        Ok(out)
    }
}

fn merge_next<F: Float>(
    cavity: &[Point2<F>],
    holes: &[Vec<Point2<F>>],
    eps: F,
) -> Result<Option<(usize, super::merge::ContourUnion<F>)>, FractureError> {
    for (i, hole) in holes.iter().enumerate() {
        if let Some(union) = union_contours(cavity, hole, eps)? {
            return Ok(Some((i, union)));
        }
    }
    Ok(None)
}

impl<F: Float> Default for BoundaryWalk<F> {
    fn default() -> Self {
        Self::new(Tolerances::default())
    }
}

impl<F: Float> DifferenceEngine<F> for BoundaryWalk<F> {
    fn subtract(
        &self,
        subject: &Polygon<F>,
        clip: &Polygon<F>,
    ) -> Result<Vec<Polygon<F>>, FractureError> {
        if subject.is_degenerate() {
            debug!("degenerate subject skipped");
            return Ok(Vec::new());
        }
        if clip.is_degenerate() {
            debug!("degenerate clip skipped");
            return Ok(vec![subject.clone()]);
        }
        if !subject.bounds_overlap(clip) {
            return Ok(vec![subject.clone()]);
        }

        let eps = self.tolerances.epsilon;
        let outer = simplify_contour(&oriented(&subject.contour, true), eps);
        let cutter = simplify_contour(&oriented(&clip.contour, true), eps);
        if outer.len() < 3 {
            debug!("subject collapsed under simplification");
            return Ok(Vec::new());
        }
        if cutter.len() < 3 {
            return Ok(vec![subject.clone()]);
        }

        if find_crossings(&outer, &cutter, eps).is_empty() {
            return self.classify(subject, &outer, &cutter);
        }

        let loops = self.cut(&outer, &cutter)?;
        if loops.is_empty() {
            debug!("subject lies inside clip; consumed");
            return Ok(Vec::new());
        }

        debug!("clip cut subject into {} loops", loops.len());
        let mut pieces: Vec<Polygon<F>> = loops.into_iter().map(Polygon::new).collect();

        for hole in &subject.holes {
            let region = Polygon::new(hole.clone());
            let mut next = Vec::with_capacity(pieces.len());
            for piece in &pieces {
                next.extend(self.subtract(piece, &region)?);
            }
            pieces = next;
        }

        Ok(pieces)
    }
}
