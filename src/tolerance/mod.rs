//! Epsilon-aware geometric predicates and contour cleanup.
//!
//! All functions in this module take explicit tolerance parameters.
//! No hidden epsilons are used.

mod predicates;
mod weld;

pub use predicates::{
    orient2d, point_on_segment, segment_crossing, Crossing, Orientation,
};
pub use weld::{
    remove_collinear_vertices, remove_duplicate_vertices, simplify_contour, vertex_key,
    VertexKey,
};
