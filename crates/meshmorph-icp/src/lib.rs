#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

mod error;
pub use error::IcpError;

mod icp;
pub use icp::*;

mod rigid_motion;
pub use rigid_motion::{estimate_rigid_motion, fit_transformation, RotationEstimation};
