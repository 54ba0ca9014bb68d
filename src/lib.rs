//! fractum - Real-time 2D polygon fragmentation
//!
//! Cut explosion footprints out of destructible shapes and find out what is
//! left: which pieces survived, which pieces broke off, and which shapes they
//! belong to.

pub mod batch;
pub mod config;
pub mod difference;
pub mod error;
pub mod grouping;
pub mod polygon;
pub mod primitives;
pub mod tolerance;

pub use batch::{subtract_batch, BatchSubtractor, Fragment, InputGroup};
pub use config::{FractureConfig, FragmentAttribution, Tolerances, CLIPPER_SCALE};
pub use difference::{subtract, BoundaryWalk, DifferenceEngine};
pub use error::FractureError;
pub use grouping::{ConnectivityGrouper, DisjointSet, FragmentMapping};
pub use polygon::Polygon;
pub use primitives::{Point2, Segment2, Vec2};
