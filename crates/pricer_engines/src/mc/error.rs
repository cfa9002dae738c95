//! Monte Carlo simulation error types.

use pricer_expr::ExprError;
use thiserror::Error;

/// Errors from Monte Carlo configuration and estimation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Path count outside [1, [`MAX_PATHS`](super::config::MAX_PATHS)].
    #[error("Invalid path count {0}: must be in range [1, 10_000_000]")]
    InvalidPathCount(usize),

    /// Maturity must be positive.
    #[error("Invalid maturity: T = {maturity} (must be positive, in years)")]
    InvalidMaturity {
        /// The rejected maturity.
        maturity: f64,
    },

    /// Volatility cannot be negative.
    #[error("Invalid volatility: sigma = {volatility} (cannot be negative)")]
    InvalidVolatility {
        /// The rejected volatility.
        volatility: f64,
    },

    /// A market parameter holds a NaN or infinite value.
    #[error("Invalid {name}: value {value} is not finite")]
    NonFiniteParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The compiled payoff faulted during evaluation.
    ///
    /// Aborts the whole simulation; no partial result is returned and no
    /// sample is skipped or substituted.
    #[error(transparent)]
    Payoff(#[from] ExprError),
}
