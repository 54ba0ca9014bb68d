//! Crossing-graph tracing.
//!
//! Both contours are split at every point where their boundaries cross. An
//! edge piece belongs to the boundary of a target region when the region lies
//! immediately to its left and not to its right; chaining those pieces at the
//! crossings yields the region's boundary loops, each with the region on its
//! left. With the region set to `A ∪ B` the loops are the union's outline and
//! pockets. With `A \ B`, and `B` walked backwards, they are the pieces of the
//! difference.
//!
//! The trace does not depend on where either contour starts, and makes no
//! convexity assumption.

use crate::error::FractureError;
use crate::polygon::{contour_signed_area, point_in_contour};
use crate::primitives::{Point2, Segment2};
use crate::tolerance::{point_on_segment, segment_crossing, simplify_contour};
use log::trace;
use num_traits::Float;

/// A crossing between edge `a_edge` of one contour and edge `b_edge` of
/// another, at parameters `t_a` and `t_b` along them.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Hit<F> {
    pub a_edge: usize,
    pub t_a: F,
    pub b_edge: usize,
    pub t_b: F,
    pub point: Point2<F>,
}

/// Every point where the two closed contours meet.
///
/// Besides proper crossings this reports each vertex lying within `eps` of
/// the other contour's boundary, which catches contacts along collinear
/// edges. Only parameters in `[0, 1)` count for crossings, so a crossing at
/// a shared vertex is reported once. Contacts within `eps` of an earlier one
/// are dropped.
pub(crate) fn find_crossings<F: Float>(a: &[Point2<F>], b: &[Point2<F>], eps: F) -> Vec<Hit<F>> {
    let (n, m) = (a.len(), b.len());
    let mut hits: Vec<Hit<F>> = Vec::new();
    if n < 3 || m < 3 {
        return hits;
    }

    let zero = F::zero();
    let one = F::one();
    let mut record = |hit: Hit<F>| {
        if !hits.iter().any(|h| h.point.approx_eq(hit.point, eps)) {
            hits.push(hit);
        }
    };

    for i in 0..n {
        let (a0, a1) = (a[i], a[(i + 1) % n]);
        for j in 0..m {
            let (b0, b1) = (b[j], b[(j + 1) % m]);
            if let Some(c) = segment_crossing(a0, a1, b0, b1) {
                if c.t_a < one && c.t_b < one {
                    record(Hit {
                        a_edge: i,
                        t_a: c.t_a,
                        b_edge: j,
                        t_b: c.t_b,
                        point: c.point,
                    });
                }
            }
            if let Some(t_b) = contact(a0, b0, b1, eps) {
                record(Hit {
                    a_edge: i,
                    t_a: zero,
                    b_edge: j,
                    t_b,
                    point: a0,
                });
            }
            if let Some(t_a) = contact(b0, a0, a1, eps) {
                record(Hit {
                    a_edge: i,
                    t_a,
                    b_edge: j,
                    t_b: zero,
                    point: b0,
                });
            }
        }
    }
    hits
}

/// The parameter along `s → e` of the point nearest `p`, if `p` lies
/// within `eps` of the segment.
fn contact<F: Float>(p: Point2<F>, s: Point2<F>, e: Point2<F>, eps: F) -> Option<F> {
    if !point_on_segment(p, Segment2::new(s, e), eps) {
        return None;
    }
    let d = e - s;
    let len_sq = d.dot(d);
    if len_sq <= F::zero() {
        return None;
    }
    Some(((p - s).dot(d) / len_sq).max(F::zero()).min(F::one()))
}

/// Returns true if `inside` holds just left of the segment `u → v` and fails
/// just right of it.
pub(crate) fn separates<F, R>(u: Point2<F>, v: Point2<F>, eps: F, inside: &R) -> bool
where
    F: Float,
    R: Fn(Point2<F>) -> bool,
{
    let d = v - u;
    let len = d.magnitude();
    if len <= eps {
        return false;
    }

    let reach = eps * len.max(F::one()) / len;
    let normal = d.perp() * reach;
    let mid = u.midpoint(v);
    inside(mid + normal) && !inside(mid + normal * -F::one())
}

#[derive(Debug, Clone, Copy)]
struct Node<F> {
    point: Point2<F>,
    crossing: Option<usize>,
}

/// A contour with every crossing spliced in as a node.
struct Ring<F> {
    nodes: Vec<Node<F>>,
    /// Node index of each crossing.
    at: Vec<usize>,
}

impl<F: Float> Ring<F> {
    /// Splices crossing `k` into `ring` at `stops[k]`, an edge and a
    /// parameter along it. A crossing within `eps` of a vertex takes that
    /// vertex's node instead of a new one.
    fn split(ring: &[Point2<F>], stops: &[(usize, F, Point2<F>)], eps: F) -> Self {
        let n = ring.len();
        let mut on_vertex: Vec<Option<usize>> = vec![None; n];
        let mut on_edge: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (k, &(edge, _, point)) in stops.iter().enumerate() {
            let end = (edge + 1) % n;
            if point.approx_eq(ring[edge], eps) && on_vertex[edge].is_none() {
                on_vertex[edge] = Some(k);
            } else if point.approx_eq(ring[end], eps) && on_vertex[end].is_none() {
                on_vertex[end] = Some(k);
            } else {
                on_edge[edge].push(k);
            }
        }

        let mut nodes = Vec::with_capacity(n + stops.len());
        let mut at = vec![0; stops.len()];
        for (i, &vertex) in ring.iter().enumerate() {
            if let Some(k) = on_vertex[i] {
                at[k] = nodes.len();
            }
            nodes.push(Node {
                point: vertex,
                crossing: on_vertex[i],
            });

            on_edge[i].sort_by(|&x, &y| {
                stops[x]
                    .1
                    .partial_cmp(&stops[y].1)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            for &k in &on_edge[i] {
                at[k] = nodes.len();
                nodes.push(Node {
                    point: stops[k].2,
                    crossing: Some(k),
                });
            }
        }

        Self { nodes, at }
    }

    fn next(&self, idx: usize) -> usize {
        (idx + 1) % self.nodes.len()
    }

    fn edge(&self, idx: usize) -> (Point2<F>, Point2<F>) {
        (self.nodes[idx].point, self.nodes[self.next(idx)].point)
    }

    fn boundary_edges<R: Fn(Point2<F>) -> bool>(&self, eps: F, inside: &R) -> Vec<bool> {
        (0..self.nodes.len())
            .map(|i| {
                let (u, v) = self.edge(i);
                separates(u, v, eps, inside)
            })
            .collect()
    }
}

/// Both contours split at their crossings, with every piece that bounds the
/// target region marked.
///
/// Every piece of either contour must bound the region with the region on its
/// left, or lie off its boundary entirely. A piece both contours run along in
/// the same direction is kept once, on the first contour.
struct CrossingGraph<F> {
    rings: [Ring<F>; 2],
    kept: [Vec<bool>; 2],
}

impl<F: Float> CrossingGraph<F> {
    /// Returns `None` when the contours never meet.
    fn new<R>(a: &[Point2<F>], b: &[Point2<F>], eps: F, inside: R) -> Option<Self>
    where
        R: Fn(Point2<F>) -> bool,
    {
        let hits = find_crossings(a, b, eps);
        if hits.is_empty() {
            return None;
        }

        let stops_a: Vec<_> = hits.iter().map(|h| (h.a_edge, h.t_a, h.point)).collect();
        let stops_b: Vec<_> = hits.iter().map(|h| (h.b_edge, h.t_b, h.point)).collect();
        let rings = [Ring::split(a, &stops_a, eps), Ring::split(b, &stops_b, eps)];
        let mut kept = [
            rings[0].boundary_edges(eps, &inside),
            rings[1].boundary_edges(eps, &inside),
        ];

        for x in 0..rings[1].nodes.len() {
            if !kept[1][x] {
                continue;
            }
            let (u, v) = rings[1].edge(x);
            let twin = (0..rings[0].nodes.len()).any(|y| {
                let (p, q) = rings[0].edge(y);
                kept[0][y] && p.approx_eq(u, eps) && q.approx_eq(v, eps)
            });
            if twin {
                kept[1][x] = false;
            }
        }

        trace!("crossing graph has {} crossings", hits.len());
        Some(Self { rings, kept })
    }

    fn kept_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..2).flat_map(move |s| {
            (0..self.rings[s].nodes.len()).filter_map(move |i| self.kept[s][i].then_some((s, i)))
        })
    }

    /// The region's area, summed over its boundary pieces.
    fn area(&self) -> F {
        let two = F::one() + F::one();
        self.kept_edges().fold(F::zero(), |acc, (s, i)| {
            let (u, v) = self.rings[s].edge(i);
            acc + (u.x * v.y - v.x * u.y) / two
        })
    }

    /// Chains the kept pieces into closed loops, switching contours at
    /// crossings.
    fn trace(&self, eps: F) -> Result<Vec<Vec<Point2<F>>>, FractureError> {
        let rings = &self.rings;
        let kept = &self.kept;
        let mut visited = [
            vec![false; rings[0].nodes.len()],
            vec![false; rings[1].nodes.len()],
        ];
        let limit = rings[0].nodes.len() + rings[1].nodes.len();
        let mut loops = Vec::new();

        for start in self.kept_edges() {
            if visited[start.0][start.1] {
                continue;
            }

            let (mut s, mut i) = start;
            let mut points = Vec::new();
            loop {
                visited[s][i] = true;
                points.push(rings[s].nodes[i].point);
                if points.len() > limit {
                    return Err(FractureError::topology("region trace did not close"));
                }

                let j = rings[s].next(i);
                let switch = rings[s].nodes[j]
                    .crossing
                    .map(|k| (1 - s, rings[1 - s].at[k]));
                let stay = (s, j);
                if switch == Some(start) || stay == start {
                    break;
                }

                let (ns, ni) = switch
                    .into_iter()
                    .chain(std::iter::once(stay))
                    .find(|&(t, x)| kept[t][x] && !visited[t][x])
                    .ok_or_else(|| {
                        FractureError::topology("region trace reached a crossing with no way on")
                    })?;
                s = ns;
                i = ni;
            }

            let contour = simplify_contour(&points, eps);
            if !contour.is_empty() {
                loops.push(contour);
            }
        }

        Ok(loops)
    }
}

/// Traces the boundary of the region `inside` through the crossings of
/// contours `a` and `b`.
///
/// Returns `Ok(None)` when the contours never meet. A trace that runs into a
/// crossing with no way on, or fails to close, is an unclassifiable
/// topology.
pub(crate) fn trace_region<F, R>(
    a: &[Point2<F>],
    b: &[Point2<F>],
    eps: F,
    inside: R,
) -> Result<Option<Vec<Vec<Point2<F>>>>, FractureError>
where
    F: Float,
    R: Fn(Point2<F>) -> bool,
{
    CrossingGraph::new(a, b, eps, inside)
        .map(|graph| graph.trace(eps))
        .transpose()
}

/// Computes the pieces of counter-clockwise contour `subject` lying outside
/// counter-clockwise contour `clip` by tracing their crossing graph.
///
/// Every piece comes back counter-clockwise and simplified. Returns
/// `Ok(None)` when the boundaries never meet; an empty list means the clip
/// covers the subject. A clockwise piece is an unclassifiable topology.
pub fn difference_contours<F: Float>(
    subject: &[Point2<F>],
    clip: &[Point2<F>],
    eps: F,
) -> Result<Option<Vec<Vec<Point2<F>>>>, FractureError> {
    let backwards: Vec<Point2<F>> = clip.iter().rev().copied().collect();
    let loops = trace_region(subject, &backwards, eps, |p| {
        point_in_contour(subject, p) && !point_in_contour(clip, p)
    })?;

    if let Some(loops) = &loops {
        if loops.iter().any(|l| contour_signed_area(l) <= F::zero()) {
            return Err(FractureError::topology(
                "difference trace produced a clockwise piece",
            ));
        }
    }
    Ok(loops)
}

/// Returns true if `loops` are exactly the pieces of `subject` outside
/// `clip`.
///
/// Each loop must be simple and counter-clockwise, cross neither contour,
/// and run along the difference's boundary with the difference on its left.
/// Together the loops must enclose the difference's area as measured over
/// the crossing graph.
pub(crate) fn is_difference<F: Float>(
    loops: &[Vec<Point2<F>>],
    subject: &[Point2<F>],
    clip: &[Point2<F>],
    eps: F,
) -> bool {
    let inside = |p| point_in_contour(subject, p) && !point_in_contour(clip, p);
    let backwards: Vec<Point2<F>> = clip.iter().rev().copied().collect();
    let Some(graph) = CrossingGraph::new(subject, &backwards, eps, inside) else {
        return false;
    };

    let total = loops
        .iter()
        .map(|l| contour_signed_area(l))
        .fold(F::zero(), |acc, a| acc + a);
    let scale = contour_signed_area(subject).abs().max(F::one());
    if (total - graph.area()).abs() > eps * scale {
        return false;
    }

    loops.iter().all(|l| {
        let n = l.len();
        contour_signed_area(l) > F::zero()
            && is_simple(l)
            && (0..n).all(|i| {
                let (u, v) = (l[i], l[(i + 1) % n]);
                separates(u, v, eps, &inside)
                    && !crosses_between(u, v, subject, eps)
                    && !crosses_between(u, v, clip, eps)
            })
    })
}

/// Returns true if no two non-adjacent edges of `contour` meet.
pub(crate) fn is_simple<F: Float>(contour: &[Point2<F>]) -> bool {
    let n = contour.len();
    for i in 0..n {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let hit = segment_crossing(
                contour[i],
                contour[(i + 1) % n],
                contour[j],
                contour[(j + 1) % n],
            );
            if hit.is_some() {
                return false;
            }
        }
    }
    true
}

/// Returns true if segment `u → v` meets `ring` anywhere other than within
/// `eps` of its own endpoints.
fn crosses_between<F: Float>(u: Point2<F>, v: Point2<F>, ring: &[Point2<F>], eps: F) -> bool {
    let n = ring.len();
    (0..n).any(|j| {
        segment_crossing(u, v, ring[j], ring[(j + 1) % n])
            .is_some_and(|c| !c.point.approx_eq(u, eps) && !c.point.approx_eq(v, eps))
    })
}
