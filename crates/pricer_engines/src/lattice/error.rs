//! Lattice pricing error types.

use thiserror::Error;

/// Errors from lattice parameter derivation and pricing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// The risk-neutral up-move probability left [0, 1].
    ///
    /// Typically caused by volatility too low relative to the drift per
    /// step, or an ill-chosen step count. The configuration is rejected
    /// outright; the probability is never clamped.
    #[error(
        "risk-neutral probability {prob} is outside [0, 1]; \
         check the step count or input parameters"
    )]
    ProbabilityOutOfRange {
        /// The computed probability.
        prob: f64,
    },
}
