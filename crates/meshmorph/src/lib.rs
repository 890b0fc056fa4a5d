#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Re-exports the workspace crates under short module names.

#[doc(inline)]
pub use meshmorph_3d as k3d;

#[doc(inline)]
pub use meshmorph_icp as icp;

#[doc(inline)]
pub use meshmorph_morph as morph;
