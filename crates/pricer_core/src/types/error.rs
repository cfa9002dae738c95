//! Contract validation error types.
//!
//! Structured errors for [`OptionSpec`](super::spec::OptionSpec)
//! construction. Each variant names the offending field and carries the
//! rejected value.

use thiserror::Error;

/// Option specification validation errors.
///
/// Produced by [`OptionSpecBuilder::build`](super::spec::OptionSpecBuilder::build)
/// and by parsing contract enums from text.
///
/// # Examples
/// ```
/// use pricer_core::SpecError;
///
/// let err = SpecError::InvalidMaturity { maturity: -0.5 };
/// assert!(err.to_string().contains("-0.5"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpecError {
    /// Step count must be a positive integer.
    #[error("Invalid steps: n = {steps} (must be a positive integer)")]
    InvalidSteps {
        /// The rejected step count.
        steps: usize,
    },

    /// Time to maturity must be positive, in years.
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

    /// Dividend yield cannot be negative.
    #[error("Invalid dividend yield: q = {dividend_yield} (cannot be negative)")]
    InvalidDividendYield {
        /// The rejected dividend yield.
        dividend_yield: f64,
    },

    /// A numeric field holds a NaN or infinite value.
    #[error("Invalid {field}: value {value} is not finite")]
    NonFiniteField {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A required builder field was never set.
    #[error("Missing field '{0}': must be specified")]
    MissingField(&'static str),

    /// Unrecognised option kind text.
    #[error("Unknown option kind '{0}': must be 'call' or 'put'")]
    UnknownOptionKind(String),

    /// Unrecognised exercise style text.
    #[error("Unknown exercise style '{0}': must be 'european' or 'american'")]
    UnknownExerciseStyle(String),
}
