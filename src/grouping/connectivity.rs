//! Vertex-connectivity grouping of polygons into fragments.

use super::DisjointSet;
use crate::config::Tolerances;
use crate::polygon::Polygon;
use crate::tolerance::{vertex_key, VertexKey};
use log::warn;
use num_traits::Float;
use std::collections::{HashMap, HashSet};

/// Assignment of fragments to the input groups they came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FragmentMapping {
    /// For each input group, the indices of the fragments that share a vertex
    /// with it. Empty for input groups that were fully consumed.
    pub per_input: Vec<Vec<usize>>,
    /// Indices of fragments that share no vertex with any input group.
    pub unmatched: Vec<usize>,
}

/// Partitions polygons into fragments of transitively vertex-sharing polygons.
///
/// Two vertices are the same vertex when they snap to the same cell of a grid
/// of size `quantum`. Only outer contour vertices take part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectivityGrouper<F> {
    quantum: F,
}

impl<F: Float> ConnectivityGrouper<F> {
    /// Creates a grouper with the given vertex grid size.
    pub fn new(quantum: F) -> Self {
        Self { quantum }
    }

    /// Creates a grouper from shared tolerances.
    pub fn from_tolerances(tolerances: &Tolerances<F>) -> Self {
        Self::new(tolerances.vertex_quantum)
    }

    /// Returns the vertex grid size.
    pub fn quantum(&self) -> F {
        self.quantum
    }

    fn keys<'a>(&'a self, polygon: &'a Polygon<F>) -> impl Iterator<Item = VertexKey> + 'a {
        polygon
            .contour
            .iter()
            .filter_map(move |&v| vertex_key(v, self.quantum))
    }

    /// Groups polygon indices.
    ///
    /// Groups are ordered by their first polygon, and indices within a group
    /// are ascending.
    pub fn group_indices(&self, polygons: &[Polygon<F>]) -> Vec<Vec<usize>> {
        let mut sets = DisjointSet::new(polygons.len());
        let mut owner: HashMap<VertexKey, usize> = HashMap::new();

        for (i, polygon) in polygons.iter().enumerate() {
            for key in self.keys(polygon) {
                let first = *owner.entry(key).or_insert(i);
                if first != i {
                    sets.union(first, i);
                }
            }
        }

        let mut slot: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for i in 0..polygons.len() {
            let root = sets.find(i);
            let g = *slot.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[g].push(i);
        }

        groups
    }

    /// Groups polygons into fragments.
    pub fn group(&self, polygons: &[Polygon<F>]) -> Vec<Vec<Polygon<F>>> {
        self.group_indices(polygons)
            .into_iter()
            .map(|g| g.into_iter().map(|i| polygons[i].clone()).collect())
            .collect()
    }

    /// Matches fragments to the input groups they were cut from.
    ///
    /// A fragment belongs to the first input group with which it shares at
    /// least one vertex.
    pub fn map_to_input_groups<G>(
        &self,
        fragments: &[Vec<Polygon<F>>],
        inputs: &[G],
    ) -> FragmentMapping
    where
        G: AsRef<[Polygon<F>]>,
    {
        let vertex_sets: Vec<HashSet<VertexKey>> = inputs
            .iter()
            .map(|group| group.as_ref().iter().flat_map(|p| self.keys(p)).collect())
            .collect();

        let mut mapping = FragmentMapping {
            per_input: vec![Vec::new(); inputs.len()],
            unmatched: Vec::new(),
        };

        for (f, fragment) in fragments.iter().enumerate() {
            let owner = vertex_sets.iter().position(|set| {
                fragment
                    .iter()
                    .any(|p| self.keys(p).any(|key| set.contains(&key)))
            });

            match owner {
                Some(g) => mapping.per_input[g].push(f),
                None => {
                    warn!("fragment {} shares no vertex with any input group", f);
                    mapping.unmatched.push(f);
                }
            }
        }

        mapping
    }
}

impl<F: Float> Default for ConnectivityGrouper<F> {
    fn default() -> Self {
        Self::from_tolerances(&Tolerances::default())
    }
}
