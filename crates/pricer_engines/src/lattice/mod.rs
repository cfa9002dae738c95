//! Cox-Ross-Rubinstein binomial lattice pricer.
//!
//! Backward induction over a recombining tree: O(steps^2) time, O(steps)
//! auxiliary space (one value vector overwritten level by level). A pure
//! function of its inputs; identical inputs yield bit-identical output.

pub mod error;
pub mod params;
pub mod pricer;

pub use error::LatticeError;
pub use params::LatticeParams;
pub use pricer::price;
