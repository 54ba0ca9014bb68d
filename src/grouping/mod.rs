//! Fragment tracking: partitioning subtraction output into connected pieces
//! and attributing them to the shapes they came from.

mod connectivity;
mod disjoint_set;

pub use connectivity::{ConnectivityGrouper, FragmentMapping};
pub use disjoint_set::DisjointSet;
