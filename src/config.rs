//! Tolerances and batch configuration.
//!
//! Every tunable number lives here. Nothing is global: engines and
//! orchestrators copy what they need out of these structs at construction.

use num_traits::Float;

/// Scale factor between float coordinates and the fixed-point backend's
/// integer grid (seven decimal places).
pub const CLIPPER_SCALE: f64 = 1.0e7;

/// Multiplier applied to the distance tolerance to get the default grid size
/// for vertex identity.
const QUANTUM_FACTOR: f64 = 64.0;

/// Numerical tolerances shared by the engine and the grouper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances<F> {
    /// Distance tolerance for point equality and point-on-boundary tests, and
    /// the sine tolerance for dropping collinear vertices.
    pub epsilon: F,
    /// Grid size used to decide that two vertices are the same vertex when
    /// grouping fragments.
    pub vertex_quantum: F,
}

impl<F: Float> Default for Tolerances<F> {
    /// `epsilon` defaults to the square root of the type's machine epsilon
    /// (about `1.5e-8` for `f64`, `3.5e-4` for `f32`).
    fn default() -> Self {
        let epsilon = F::epsilon().sqrt();
        Self {
            epsilon,
            vertex_quantum: epsilon * F::from(QUANTUM_FACTOR).unwrap(),
        }
    }
}

/// How output fragments are attributed back to the input groups they came
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FragmentAttribution {
    /// Each output polygon remembers the input group it was cut from, and
    /// connectivity is computed per input group. Unrelated shapes can never
    /// be fused and every fragment has an owner.
    #[default]
    Provenance,
    /// All outputs are grouped together and matched to input groups by shared
    /// vertices. Fragments that keep none of their shape's original vertices
    /// are reported as new, and shapes that happen to share a vertex can fuse.
    SharedVertex,
}

/// Configuration for a batch subtraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractureConfig<F> {
    /// Numerical tolerances.
    pub tolerances: Tolerances<F>,
    /// Fragment attribution policy.
    pub attribution: FragmentAttribution,
}

impl<F: Float> FractureConfig<F> {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            tolerances: Tolerances::default(),
            attribution: FragmentAttribution::default(),
        }
    }

    /// Sets the distance tolerance.
    pub fn with_epsilon(mut self, epsilon: F) -> Self {
        self.tolerances.epsilon = epsilon;
        self
    }

    /// Sets the vertex identity grid size.
    pub fn with_vertex_quantum(mut self, quantum: F) -> Self {
        self.tolerances.vertex_quantum = quantum;
        self
    }

    /// Sets the attribution policy.
    pub fn with_attribution(mut self, attribution: FragmentAttribution) -> Self {
        self.attribution = attribution;
        self
    }
}

impl<F: Float> Default for FractureConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
