/// Errors raised by the 3d primitives and the correspondence engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error3d {
    /// A point set that must hold at least one point is empty.
    #[error("{what} point set is empty")]
    EmptyInput {
        /// Which argument was empty.
        what: &'static str,
    },

    /// A unique matching policy ran out of unused targets.
    #[error("no unused target left for source point {source_index}")]
    TargetsExhausted {
        /// First source index that fell back.
        source_index: usize,
    },

    /// The extremeness floor must be strictly positive and finite.
    #[error("invalid extremeness floor {0}, expected a positive finite value")]
    InvalidExtremenessFloor(f64),

    /// An index does not address an element of a sequence.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The length of the indexed sequence.
        len: usize,
    },
}
