//! Monte Carlo estimation of discounted expected payoff.

use pricer_expr::PayoffExpr;

use super::config::{GbmParams, McConfig};
use super::error::SimulationError;
use crate::rng::PathRng;

/// Monte Carlo estimate with its sampling error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct McResult {
    /// Discounted mean payoff: the price estimate.
    pub price: f64,
    /// Standard error of the estimate.
    pub std_error: f64,
}

impl McResult {
    /// 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }
}

/// Estimates the option price by simulating terminal prices under GBM.
///
/// For each path a standard normal `z` drives the exact log-space solution
///
/// ```text
/// S_T = spot * exp((r - q - sigma^2/2) * T + sigma * sqrt(T) * z)
/// ```
///
/// and the compiled payoff is evaluated at `S_T`. The estimate is the
/// discounted sample mean `exp(-r*T) * sum / n_paths`.
///
/// With a seed in the configuration the result is bit-reproducible across
/// runs; without one each call draws operating-system entropy. Each call
/// owns its generator and accumulators, so concurrent calls do not
/// interfere.
///
/// # Errors
///
/// * [`SimulationError::InvalidMaturity`] / [`InvalidVolatility`] /
///   [`NonFiniteParameter`] on bad market parameters
/// * [`SimulationError::Payoff`] when the payoff faults on a sampled
///   terminal price; the whole estimate aborts, nothing is skipped
///
/// [`InvalidVolatility`]: SimulationError::InvalidVolatility
/// [`NonFiniteParameter`]: SimulationError::NonFiniteParameter
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use pricer_engines::mc::{estimate, GbmParams, McConfig};
/// use pricer_expr::PayoffExpr;
///
/// let payoff = PayoffExpr::compile("max(s - 100, 0)", &["s"], &HashMap::new()).unwrap();
/// let config = McConfig::builder().n_paths(50_000).seed(42).build().unwrap();
///
/// let result = estimate(GbmParams::default(), &config, &payoff).unwrap();
/// assert!(result.price > 0.0);
/// assert!(result.std_error > 0.0);
/// ```
pub fn estimate(
    params: GbmParams,
    config: &McConfig,
    payoff: &PayoffExpr,
) -> Result<McResult, SimulationError> {
    params.validate()?;

    let drift = (params.rate - params.dividend_yield
        - 0.5 * params.volatility * params.volatility)
        * params.maturity;
    let diffusion = params.volatility * params.maturity.sqrt();
    let discount = (-params.rate * params.maturity).exp();

    let mut rng = match config.seed() {
        Some(seed) => PathRng::from_seed(seed),
        None => PathRng::from_entropy(),
    };

    let n_paths = config.n_paths();
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for _ in 0..n_paths {
        let z = rng.standard_normal();
        let terminal = params.spot * (drift + diffusion * z).exp();
        let value = payoff.eval(terminal)?;
        sum += value;
        sum_sq += value * value;
    }

    let mean = sum / n_paths as f64;
    let variance = (sum_sq / n_paths as f64 - mean * mean).max(0.0);
    let std_error = (variance / n_paths as f64).sqrt();

    Ok(McResult {
        price: discount * mean,
        std_error: discount * std_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_expr::ExprError;
    use std::collections::HashMap;

    fn call_payoff() -> PayoffExpr {
        PayoffExpr::compile("max(s - 100, 0)", &["s"], &HashMap::new()).unwrap()
    }

    fn seeded_config(n_paths: usize, seed: u64) -> McConfig {
        McConfig::builder().n_paths(n_paths).seed(seed).build().unwrap()
    }

    #[test]
    fn test_same_seed_bit_identical() {
        let config = seeded_config(20_000, 42);
        let payoff = call_payoff();
        let a = estimate(GbmParams::default(), &config, &payoff).unwrap();
        let b = estimate(GbmParams::default(), &config, &payoff).unwrap();
        assert_eq!(a.price.to_bits(), b.price.to_bits());
        assert_eq!(a.std_error.to_bits(), b.std_error.to_bits());
    }

    #[test]
    fn test_different_seeds_within_tolerance() {
        let payoff = call_payoff();
        let a = estimate(GbmParams::default(), &seeded_config(100_000, 1), &payoff).unwrap();
        let b = estimate(GbmParams::default(), &seeded_config(100_000, 2), &payoff).unwrap();
        let spread = 3.0 * (a.std_error + b.std_error);
        assert!(
            (a.price - b.price).abs() < spread,
            "{} vs {} exceeds {spread}",
            a.price,
            b.price
        );
    }

    #[test]
    fn test_unseeded_runs_vary() {
        let config = McConfig::builder().n_paths(1000).build().unwrap();
        let payoff = call_payoff();
        let a = estimate(GbmParams::default(), &config, &payoff).unwrap();
        let b = estimate(GbmParams::default(), &config, &payoff).unwrap();
        // With 1000 entropy-seeded paths two identical means are
        // vanishingly unlikely.
        assert_ne!(a.price.to_bits(), b.price.to_bits());
    }

    #[test]
    fn test_zero_volatility_degenerates_to_forward() {
        let params = GbmParams {
            volatility: 0.0,
            ..Default::default()
        };
        let config = seeded_config(100, 9);
        let result = estimate(params, &config, &call_payoff()).unwrap();
        let forward = 100.0 * (0.05_f64).exp();
        let expected = (-0.05_f64).exp() * (forward - 100.0);
        assert_relative_eq!(result.price, expected, epsilon = 1e-9);
        // Every sample is the same value; only summation rounding remains.
        assert!(result.std_error < 1e-6);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let config = seeded_config(100, 1);
        let payoff = call_payoff();

        let err = estimate(
            GbmParams {
                maturity: -1.0,
                ..Default::default()
            },
            &config,
            &payoff,
        )
        .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidMaturity { .. }));

        let err = estimate(
            GbmParams {
                volatility: -0.5,
                ..Default::default()
            },
            &config,
            &payoff,
        )
        .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidVolatility { .. }));
    }

    #[test]
    fn test_payoff_fault_aborts_simulation() {
        // Every sampled terminal price sits far below 1000, so the square
        // root faults on the first path.
        let payoff =
            PayoffExpr::compile("sqrt(s - 1000)", &["s"], &HashMap::new()).unwrap();
        let err = estimate(GbmParams::default(), &seeded_config(1000, 3), &payoff).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Payoff(ExprError::Eval { .. })
        ));
    }

    #[test]
    fn test_constant_payoff_prices_discount_bond() {
        let payoff = PayoffExpr::compile("1 + 0 * s", &["s"], &HashMap::new()).unwrap();
        let result = estimate(GbmParams::default(), &seeded_config(500, 4), &payoff).unwrap();
        assert_relative_eq!(result.price, (-0.05_f64).exp(), epsilon = 1e-12);
        assert_eq!(result.std_error, 0.0);
    }
}
