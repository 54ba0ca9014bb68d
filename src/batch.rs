//! Batch subtraction: many clips against many tracked shapes.
//!
//! Each input group is a shape made of one or more polygons. Every clip is
//! subtracted from every polygon of every group, in order, and the survivors
//! are regrouped into fragments so the caller can update, split or destroy
//! the shapes they track.

use crate::config::{FractureConfig, FragmentAttribution};
use crate::difference::{BoundaryWalk, DifferenceEngine};
use crate::error::FractureError;
use crate::grouping::ConnectivityGrouper;
use crate::polygon::Polygon;
use log::{debug, warn};
use num_traits::Float;

/// A maximal set of mutually vertex-connected polygons.
pub type Fragment<F> = Vec<Polygon<F>>;

/// The polygons that make up one tracked shape before subtraction.
#[derive(Debug, Clone, PartialEq)]
pub struct InputGroup<F> {
    /// Caller-side identifier, used in log output.
    pub name: String,
    /// The shape's polygons.
    pub polygons: Vec<Polygon<F>>,
}

impl<F> InputGroup<F> {
    /// Creates an input group.
    pub fn new(name: impl Into<String>, polygons: Vec<Polygon<F>>) -> Self {
        Self {
            name: name.into(),
            polygons,
        }
    }
}

impl<F> AsRef<[Polygon<F>]> for InputGroup<F> {
    fn as_ref(&self) -> &[Polygon<F>] {
        &self.polygons
    }
}

/// Applies a sequence of clips to a set of input groups with one engine.
#[derive(Debug, Clone)]
pub struct BatchSubtractor<F, E> {
    engine: E,
    grouper: ConnectivityGrouper<F>,
    attribution: FragmentAttribution,
}

impl<F: Float, E: DifferenceEngine<F>> BatchSubtractor<F, E> {
    /// Creates an orchestrator around `engine`.
    pub fn new(engine: E, config: FractureConfig<F>) -> Self {
        Self {
            engine,
            grouper: ConnectivityGrouper::from_tolerances(&config.tolerances),
            attribution: config.attribution,
        }
    }

    /// Returns the difference engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Subtracts every clip from every input group.
    ///
    /// Returns one entry per input group, in input order, holding the
    /// fragments that group broke into; a fully consumed group gets an empty
    /// entry. Under [`FragmentAttribution::SharedVertex`], fragments that match
    /// no input group follow as extra single-fragment entries.
    ///
    /// Clips are applied in order, and each clip sees the output of the one
    /// before it.
    pub fn subtract_batch(
        &self,
        inputs: &[InputGroup<F>],
        clips: &[Polygon<F>],
    ) -> Result<Vec<Vec<Fragment<F>>>, FractureError> {
        let survivors = inputs
            .iter()
            .map(|group| self.fold(&group.polygons, clips))
            .collect::<Result<Vec<_>, _>>()?;

        let result = match self.attribution {
            FragmentAttribution::Provenance => survivors
                .iter()
                .map(|polygons| self.grouper.group(polygons))
                .collect(),
            FragmentAttribution::SharedVertex => self.regroup_shared(survivors, inputs),
        };

        for (group, fragments) in inputs.iter().zip(&result) {
            match fragments.len() {
                0 => debug!("input group '{}' fully consumed", group.name),
                1 => {}
                n => debug!("input group '{}' split into {} fragments", group.name, n),
            }
        }

        Ok(result)
    }

    fn fold(
        &self,
        polygons: &[Polygon<F>],
        clips: &[Polygon<F>],
    ) -> Result<Vec<Polygon<F>>, FractureError> {
        let mut current = polygons.to_vec();
        for clip in clips {
            let mut next = Vec::with_capacity(current.len());
            for polygon in &current {
                next.extend(self.engine.subtract(polygon, clip)?);
            }
            current = next;
        }
        Ok(current)
    }

    fn regroup_shared(
        &self,
        survivors: Vec<Vec<Polygon<F>>>,
        inputs: &[InputGroup<F>],
    ) -> Vec<Vec<Fragment<F>>> {
        let flat: Vec<Polygon<F>> = survivors.into_iter().flatten().collect();
        let fragments = self.grouper.group(&flat);
        let mapping = self.grouper.map_to_input_groups(&fragments, inputs);

        if !mapping.unmatched.is_empty() {
            warn!(
                "{} fragments matched no input group and are reported as new",
                mapping.unmatched.len()
            );
        }

        let mut slots: Vec<Option<Fragment<F>>> = fragments.into_iter().map(Some).collect();
        let mut out: Vec<Vec<Fragment<F>>> = mapping
            .per_input
            .iter()
            .map(|indices| indices.iter().filter_map(|&i| slots[i].take()).collect())
            .collect();
        out.extend(
            mapping
                .unmatched
                .iter()
                .filter_map(|&i| slots[i].take())
                .map(|fragment| vec![fragment]),
        );
        out
    }
}

impl<F: Float> Default for BatchSubtractor<F, BoundaryWalk<F>> {
    fn default() -> Self {
        let config = FractureConfig::default();
        Self::new(BoundaryWalk::new(config.tolerances), config)
    }
}

/// Subtracts `clips` from `inputs` with a default [`BoundaryWalk`] and
/// provenance attribution.
pub fn subtract_batch<F: Float>(
    inputs: &[InputGroup<F>],
    clips: &[Polygon<F>],
) -> Result<Vec<Vec<Fragment<F>>>, FractureError> {
    BatchSubtractor::default().subtract_batch(inputs, clips)
}
