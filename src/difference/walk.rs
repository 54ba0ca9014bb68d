//! The boundary walk.
//!
//! Two cursors advance in lockstep around the subject contour `P` and the clip
//! contour `Q`, one edge at a time. Crossings where `P` leaves `Q` open an
//! output loop; crossings where `P` re-enters `Q` close it. Between the two,
//! the walk collects the subject vertices it passes (the stretch of `P` outside
//! `Q`) and the clip vertices it passes (the stretch of `Q` inside `P`), so a
//! closed loop is the entry point, the subject chain, the exit point and the
//! clip chain reversed.
//!
//! The cursors start on a pair of edges where `P` leaves `Q`, found by
//! scanning every edge pair, so the result does not hinge on where either
//! contour happens to start. Both contours must be wound counter-clockwise.
//!
//! The advance rule tracks the boundaries reliably while both stay convex
//! near the crossings. Callers check the loops before trusting them.

use crate::error::FractureError;
use crate::polygon::contours_match;
use crate::primitives::{Point2, Vec2};
use crate::tolerance::{segment_crossing, simplify_contour};
use log::{trace, warn};
use num_traits::Float;

/// A position on a closed contour. `index` names the end vertex of the
/// current edge.
struct Cursor<'a, F> {
    ring: &'a [Point2<F>],
    index: usize,
}

impl<'a, F: Float> Cursor<'a, F> {
    /// A cursor on the edge that ends at vertex `index`.
    fn at(ring: &'a [Point2<F>], index: usize) -> Self {
        Self { ring, index }
    }

    #[inline]
    fn current(&self) -> Point2<F> {
        self.ring[self.index]
    }

    #[inline]
    fn prev(&self) -> Point2<F> {
        let n = self.ring.len();
        self.ring[(self.index + n - 1) % n]
    }

    #[inline]
    fn edge(&self) -> Vec2<F> {
        self.current() - self.prev()
    }

    /// Moves to the next edge and returns the vertex stepped over.
    fn advance(&mut self) -> Point2<F> {
        let passed = self.current();
        self.index = (self.index + 1) % self.ring.len();
        passed
    }
}

/// An output loop between its entrance and its exit.
struct OpenLoop<F> {
    entry: Point2<F>,
    subject_chain: Vec<Point2<F>>,
    clip_chain: Vec<Point2<F>>,
}

impl<F: Float> OpenLoop<F> {
    fn new(entry: Point2<F>) -> Self {
        Self {
            entry,
            subject_chain: Vec::new(),
            clip_chain: Vec::new(),
        }
    }

    fn close(self, exit: Point2<F>, eps: F) -> Vec<Point2<F>> {
        let mut points =
            Vec::with_capacity(self.subject_chain.len() + self.clip_chain.len() + 2);
        points.push(self.entry);
        points.extend(self.subject_chain);
        points.push(exit);
        points.extend(self.clip_chain.into_iter().rev());
        simplify_contour(&points, eps)
    }
}

/// Walks `subject` against `clip` and returns the loops of `subject` lying
/// outside `clip`, each wound counter-clockwise and simplified.
///
/// An empty result means no edge pair crosses in a way that opens a loop;
/// the caller classifies such inputs by containment.
///
/// The walk takes at most `2 · (|P| + |Q|)` steps before the first entrance
/// and as many again after it. Running out of steps with a loop still open is
/// reported as [`FractureError::UnclosedLoop`].
pub fn boundary_walk<F: Float>(
    subject: &[Point2<F>],
    clip: &[Point2<F>],
    eps: F,
) -> Result<Vec<Vec<Point2<F>>>, FractureError> {
    if subject.len() < 3 || clip.len() < 3 {
        return Ok(Vec::new());
    }

    let zero = F::zero();
    let one = F::one();
    let budget = 2 * (subject.len() + clip.len());

    let Some((i, j)) = first_entrance(subject, clip) else {
        return Ok(Vec::new());
    };
    trace!("walk seeded at subject edge {} and clip edge {}", i, j);

    let mut p = Cursor::at(subject, (i + 1) % subject.len());
    let mut q = Cursor::at(clip, (j + 1) % clip.len());
    let mut entrances: Vec<(usize, usize)> = Vec::new();
    let mut open: Option<OpenLoop<F>> = None;
    let mut loops: Vec<Vec<Point2<F>>> = Vec::new();
    let mut steps = 0;

    loop {
        let p_edge = p.edge();
        let q_edge = q.edge();
        let cross = p_edge.cross(q_edge);
        let hit = segment_crossing(p.prev(), p.current(), q.prev(), q.current());

        match (open.take(), hit) {
            (None, Some(c)) if cross > zero && c.t_a < one && c.t_b < one => {
                let pair = (p.index, q.index);
                if entrances.contains(&pair) {
                    break;
                }
                if entrances.is_empty() {
                    steps = 0;
                }
                entrances.push(pair);
                trace!("walk entrance on edges {:?}", pair);
                open = Some(OpenLoop::new(c.point));
            }
            (Some(building), Some(c)) if cross < zero => {
                trace!("walk exit on edges {:?}", (p.index, q.index));
                let contour = building.close(c.point, eps);
                if contour.is_empty() {
                    trace!("walk loop collapsed under simplification");
                } else if loops.iter().any(|l| contours_match(l, &contour, eps)) {
                    warn!("boundary walk produced a duplicate loop; dropped");
                } else {
                    loops.push(contour);
                }
            }
            (state, _) => open = state,
        }

        let turn = q_edge.cross(p_edge);
        let p_side = (p.current() - q.prev()).cross(q_edge);
        let q_side = (q.current() - p.prev()).cross(p_edge);
        let advance_subject = if turn <= zero {
            q_side < zero
        } else {
            p_side >= zero
        };

        if advance_subject {
            let passed = p.advance();
            if let Some(building) = open.as_mut() {
                building.subject_chain.push(passed);
            }
        } else {
            let passed = q.advance();
            if let Some(building) = open.as_mut() {
                building.clip_chain.push(passed);
            }
        }

        steps += 1;
        if steps >= budget {
            if open.is_some() {
                return Err(FractureError::UnclosedLoop { steps });
            }
            break;
        }
    }

    Ok(loops)
}

/// The first edge pair, in scan order, where `subject` crosses out of `clip`.
fn first_entrance<F: Float>(subject: &[Point2<F>], clip: &[Point2<F>]) -> Option<(usize, usize)> {
    let (n, m) = (subject.len(), clip.len());
    let one = F::one();
    (0..n)
        .flat_map(|i| (0..m).map(move |j| (i, j)))
        .find(|&(i, j)| {
            let (p0, p1) = (subject[i], subject[(i + 1) % n]);
            let (q0, q1) = (clip[j], clip[(j + 1) % m]);
            (p1 - p0).cross(q1 - q0) > F::zero()
                && segment_crossing(p0, p1, q0, q1).is_some_and(|c| c.t_a < one && c.t_b < one)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::contour_signed_area;
    use approx::assert_relative_eq;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ]
    }

    #[test]
    fn test_corner_bite_leaves_l_shape() {
        let subject = rect(-1.0, -1.0, 1.0, 1.0);
        let clip = rect(-2.0, -2.0, 0.0, 0.0);

        let loops = boundary_walk(&subject, &clip, 1e-9).unwrap();
        assert_eq!(loops.len(), 1);

        let expected = vec![
            Point2::new(0.0, -1.0),
            Point2::new(1.0, -1.0),
            Point2::new(1.0, 1.0),
            Point2::new(-1.0, 1.0),
            Point2::new(-1.0, 0.0),
            Point2::new(0.0, 0.0),
        ];
        assert!(contours_match(&loops[0], &expected, 1e-12));
    }

    #[test]
    fn test_diamond_leaves_four_corners() {
        let subject = rect(-1.0, -1.0, 1.0, 1.0);
        let diamond = vec![
            Point2::new(0.0, -1.5),
            Point2::new(1.5, 0.0),
            Point2::new(0.0, 1.5),
            Point2::new(-1.5, 0.0),
        ];

        let loops = boundary_walk(&subject, &diamond, 1e-9).unwrap();
        assert_eq!(loops.len(), 4);
        for l in &loops {
            assert_eq!(l.len(), 3);
            assert_relative_eq!(contour_signed_area(l), 0.125, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_strip_splits_square() {
        let subject = rect(0.0, 0.0, 3.0, 3.0);
        let strip = rect(-1.0, 0.8, 14.0, 1.2);

        let loops = boundary_walk(&subject, &strip, 1e-9).unwrap();
        assert_eq!(loops.len(), 2);

        let mut areas: Vec<f64> = loops.iter().map(|l| contour_signed_area(l)).collect();
        areas.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_relative_eq!(areas[0], 2.4, epsilon = 1e-9);
        assert_relative_eq!(areas[1], 5.4, epsilon = 1e-9);
    }

    #[test]
    fn test_corner_bite_from_every_start() {
        let mut subject = rect(-1.0, -1.0, 1.0, 1.0);
        let mut clip = rect(-2.0, -2.0, 0.0, 0.0);
        let reference = boundary_walk(&subject, &clip, 1e-9).unwrap();

        for _ in 0..4 {
            subject.rotate_left(1);
            for _ in 0..4 {
                clip.rotate_left(1);
                let loops = boundary_walk(&subject, &clip, 1e-9).unwrap();
                assert_eq!(loops.len(), 1);
                assert!(contours_match(&loops[0], &reference[0], 1e-12));
            }
        }
    }

    #[test]
    fn test_seed_is_an_exit_from_clip() {
        let subject = rect(-1.0, -1.0, 1.0, 1.0);
        let clip = rect(-2.0, -2.0, 0.0, 0.0);
        // The bottom edge of the subject leaves the clip through its right side.
        assert_eq!(first_entrance(&subject, &clip), Some((0, 1)));
        assert_eq!(first_entrance(&subject, &rect(5.0, 5.0, 6.0, 6.0)), None);
    }

    #[test]
    fn test_identical_contours_produce_no_loop() {
        let square = rect(0.0, 0.0, 1.0, 1.0);
        assert!(boundary_walk(&square, &square, 1e-9).unwrap().is_empty());
    }

    #[test]
    fn test_disjoint_contours_produce_no_loop() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        let b = rect(5.0, 5.0, 6.0, 6.0);
        assert!(boundary_walk(&a, &b, 1e-9).unwrap().is_empty());
    }

    #[test]
    fn test_nested_contours_produce_no_loop() {
        let outer = rect(0.0, 0.0, 4.0, 4.0);
        let inner = rect(1.0, 1.0, 2.0, 2.0);
        assert!(boundary_walk(&outer, &inner, 1e-9).unwrap().is_empty());
        assert!(boundary_walk(&inner, &outer, 1e-9).unwrap().is_empty());
    }

    #[test]
    fn test_degenerate_input_produces_no_loop() {
        let line = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        let square = rect(0.0, 0.0, 1.0, 1.0);
        assert!(boundary_walk(&line, &square, 1e-9).unwrap().is_empty());
        assert!(boundary_walk(&square, &line, 1e-9).unwrap().is_empty());
    }
}
