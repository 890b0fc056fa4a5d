#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

mod error;
pub use error::MorphError;

/// Spline and blend-shape interpolation of vertex positions.
pub mod interpolation;

mod morph;
pub use morph::{morph, morph_with_policy, MorphPlan};

mod resample;
pub use resample::{uniform_sample, uniform_sample_indices};

/// Laplacian smoothing over an adjacency list.
pub mod smoothing;
