use meshmorph_3d::Error3d;

/// Errors raised by resampling, morphing, interpolation and smoothing.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MorphError {
    /// A required point set or list is empty.
    #[error("{0} is empty")]
    EmptyInput(&'static str),

    /// The requested sample count is not in `1..=len`.
    #[error("cannot sample {n} points out of {len}")]
    InvalidSampleCount {
        /// Requested number of samples.
        n: usize,
        /// Number of available points.
        len: usize,
    },

    /// Two sequences that must have the same length do not.
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Keyframe interpolation needs more keyframes.
    #[error("at least {required} keyframes required, got {provided}")]
    NotEnoughKeyframes {
        /// Minimum number of keyframes.
        required: usize,
        /// Number of keyframes provided.
        provided: usize,
    },

    /// An adjacency entry points outside the vertex list.
    #[error("vertex {vertex} lists neighbor {neighbor} but there are only {len} vertices")]
    AdjacencyOutOfBounds {
        /// The vertex owning the adjacency entry.
        vertex: usize,
        /// The invalid neighbor index.
        neighbor: usize,
        /// The number of vertices.
        len: usize,
    },

    /// Error from the geometry primitives.
    #[error(transparent)]
    Geometry(#[from] Error3d),
}
