//! Derived CRR lattice parameters.

use pricer_core::OptionSpec;

use super::error::LatticeError;

/// Per-step lattice quantities derived from an [`OptionSpec`].
///
/// Derived on every pricing call, never stored on the spec:
///
/// ```text
/// dt       = T / steps
/// up       = exp(sigma * sqrt(dt))
/// down     = 1 / up
/// growth   = exp((r - q) * dt)
/// prob     = (growth - down) / (up - down)
/// discount = exp(-r * dt)
/// ```
///
/// Derivation requires `prob` in [0, 1]; anything else is a configuration
/// error, not something to clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeParams {
    /// Time increment per step.
    pub dt: f64,
    /// Up-move factor.
    pub up: f64,
    /// Down-move factor (reciprocal of `up`).
    pub down: f64,
    /// Risk-neutral growth per step.
    pub growth: f64,
    /// Risk-neutral up-move probability.
    pub prob: f64,
    /// Per-step discount factor.
    pub discount: f64,
}

impl LatticeParams {
    /// Derives the lattice parameters for a validated specification.
    ///
    /// The caller must handle zero volatility before calling: `up == down`
    /// makes the probability denominator vanish, and the resulting NaN is
    /// reported as [`LatticeError::ProbabilityOutOfRange`].
    ///
    /// # Errors
    ///
    /// [`LatticeError::ProbabilityOutOfRange`] when the computed
    /// probability is not a number in [0, 1].
    pub fn derive(spec: &OptionSpec) -> Result<Self, LatticeError> {
        let dt = spec.maturity() / spec.steps() as f64;
        let up = (spec.volatility() * dt.sqrt()).exp();
        let down = 1.0 / up;
        let growth = ((spec.rate() - spec.dividend_yield()) * dt).exp();
        let prob = (growth - down) / (up - down);

        if !(0.0..=1.0).contains(&prob) || !prob.is_finite() {
            return Err(LatticeError::ProbabilityOutOfRange { prob });
        }

        let discount = (-spec.rate() * dt).exp();
        Ok(Self {
            dt,
            up,
            down,
            growth,
            prob,
            discount,
        })
    }
}
