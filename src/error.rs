//! Error types for fractum operations.

use thiserror::Error;

/// Errors surfaced by the difference engines and the batch orchestrator.
///
/// Malformed input and numerical near-degeneracy are never errors: degenerate
/// polygons are skipped and near-parallel configurations are settled by the
/// walk's sign tests. Only a boundary topology the engine cannot classify is
/// reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FractureError {
    /// The boundary walk ran out of steps while an output loop was still open.
    #[error("boundary walk exhausted {steps} steps with an output loop still open")]
    UnclosedLoop {
        /// Number of steps taken before giving up.
        steps: usize,
    },

    /// Two contours produced a boundary arrangement with no recognized outcome.
    #[error("unclassifiable contour topology: {reason}")]
    UnclassifiableTopology {
        /// What the engine observed.
        reason: String,
    },

    /// A coordinate does not fit the integer grid of the fixed-point backend.
    #[error("coordinate {value} is out of range for the integer backend")]
    CoordinateOutOfRange {
        /// The offending coordinate, before scaling.
        value: f64,
    },
}

impl FractureError {
    pub(crate) fn topology(reason: impl Into<String>) -> Self {
        Self::UnclassifiableTopology {
            reason: reason.into(),
        }
    }
}
