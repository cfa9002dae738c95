//! Option kind (call or put).

use std::fmt;
use std::str::FromStr;

use super::error::SpecError;

/// Kind of vanilla option payoff.
///
/// # Examples
/// ```
/// use pricer_core::OptionKind;
///
/// let call = OptionKind::Call;
/// assert_eq!(call.intrinsic(110.0, 100.0), 10.0);
/// assert_eq!(call.intrinsic(90.0, 100.0), 0.0);
///
/// let put: OptionKind = "put".parse().unwrap();
/// assert_eq!(put.intrinsic(90.0, 100.0), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// Call option: max(S - K, 0)
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl OptionKind {
    /// Intrinsic (immediate exercise) value at the given spot and strike.
    ///
    /// # Arguments
    /// * `spot` - Underlying price (S)
    /// * `strike` - Strike price (K)
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionKind::Call => (spot - strike).max(0.0),
            OptionKind::Put => (strike - spot).max(0.0),
        }
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionKind::Call)
    }

    /// Returns whether this is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionKind::Put)
    }
}

impl FromStr for OptionKind {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "call" => Ok(OptionKind::Call),
            "put" => Ok(OptionKind::Put),
            _ => Err(SpecError::UnknownOptionKind(s.to_string())),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Call => write!(f, "call"),
            OptionKind::Put => write!(f, "put"),
        }
    }
}
