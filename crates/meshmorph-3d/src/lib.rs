#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Point correspondence between two vertex clouds.
pub mod correspondence;

mod error;
pub use error::Error3d;

/// Linear algebra utilities.
pub mod linalg;

/// The canonical 3d point value type.
pub mod point;

/// Ordered point sets.
pub mod pointset;

/// 3D transforms algorithms.
pub mod transforms;

pub use correspondence::{correspond, Correspondence, Match, MatchPolicy};
pub use point::Point3;
pub use pointset::{centroid, PointSet};
pub use transforms::RigidTransform;
