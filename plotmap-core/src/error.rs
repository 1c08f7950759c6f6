//! Error types for the boundary editor
//!
//! None of these are fatal. A rejected action leaves the session exactly as it
//! was, and the user can keep interacting with it.

use crate::plot::PlotId;
use thiserror::Error;

/// Validation failures surfaced to the user as rejected actions
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("a boundary needs at least {required} points, this one has {actual}")]
    TooFewVertices { required: usize, actual: usize },

    #[error("cannot delete point: a boundary must keep at least {minimum} points")]
    VertexMinimum { minimum: usize },

    #[error("rectangle has no area")]
    DegenerateRectangle,

    #[error("no boundary is being drawn")]
    NoActiveSession,

    #[error("plot {0} not found")]
    UnknownPlot(PlotId),
}

/// Failure of a commit that was handed to a save callback
#[derive(Debug, Error)]
pub enum CommitError<E> {
    /// The boundary did not validate; nothing was saved
    #[error(transparent)]
    Invalid(#[from] EditorError),

    /// The caller's save failed; the session is still open
    #[error("failed to save boundary: {0}")]
    Save(E),
}
