use meshmorph_3d::Error3d;

/// Errors raised by rigid motion estimation and ICP.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum IcpError {
    /// The source or target point set is empty.
    #[error("{0} point set is empty")]
    EmptyInput(&'static str),

    /// The correspondence does not cover the source point set.
    #[error("correspondence covers {actual} points but the source has {expected}")]
    CorrespondenceMismatch {
        /// Number of source points.
        expected: usize,
        /// Number of entries in the correspondence.
        actual: usize,
    },

    /// Every correspondence entry is a fallback; nothing to fit.
    #[error("no matched point pairs to estimate a transform from")]
    NoCorrespondences,

    /// Error from the geometry primitives.
    #[error(transparent)]
    Geometry(#[from] Error3d),
}
