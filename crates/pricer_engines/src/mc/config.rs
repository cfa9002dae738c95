//! Monte Carlo market parameters and simulation configuration.

use super::error::SimulationError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Market parameters of the geometric Brownian motion.
///
/// # Examples
///
/// ```rust
/// use pricer_engines::GbmParams;
///
/// let params = GbmParams {
///     spot: 100.0,
///     rate: 0.05,
///     volatility: 0.2,
///     maturity: 1.0,
///     dividend_yield: 0.0,
/// };
/// assert_eq!(params, GbmParams::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GbmParams {
    /// Current underlying price.
    pub spot: f64,
    /// Annualised risk-free rate.
    pub rate: f64,
    /// Annualised volatility.
    pub volatility: f64,
    /// Time to maturity in years.
    pub maturity: f64,
    /// Continuous dividend yield (annualised).
    pub dividend_yield: f64,
}

impl Default for GbmParams {
    fn default() -> Self {
        Self {
            spot: 100.0,
            rate: 0.05,
            volatility: 0.2,
            maturity: 1.0,
            dividend_yield: 0.0,
        }
    }
}

impl GbmParams {
    /// Validates the market parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] when `maturity <= 0`, `volatility < 0`
    /// or any field is non-finite.
    pub fn validate(&self) -> Result<(), SimulationError> {
        for (name, value) in [
            ("spot", self.spot),
            ("rate", self.rate),
            ("volatility", self.volatility),
            ("maturity", self.maturity),
            ("dividend_yield", self.dividend_yield),
        ] {
            if !value.is_finite() {
                return Err(SimulationError::NonFiniteParameter { name, value });
            }
        }
        if self.maturity <= 0.0 {
            return Err(SimulationError::InvalidMaturity {
                maturity: self.maturity,
            });
        }
        if self.volatility < 0.0 {
            return Err(SimulationError::InvalidVolatility {
                volatility: self.volatility,
            });
        }
        Ok(())
    }
}

/// Monte Carlo simulation configuration.
///
/// Immutable; use [`McConfig::builder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_engines::McConfig;
///
/// let config = McConfig::builder()
///     .n_paths(100_000)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.n_paths(), 100_000);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Debug, Clone)]
pub struct McConfig {
    n_paths: usize,
    seed: Option<u64>,
}

impl McConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> McConfigBuilder {
        McConfigBuilder::default()
    }

    /// Number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Optional seed for reproducibility. `None` draws operating-system
    /// entropy per run.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Builder for [`McConfig`].
#[derive(Debug, Clone, Default)]
pub struct McConfigBuilder {
    n_paths: Option<usize>,
    seed: Option<u64>,
}

impl McConfigBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidPathCount`] when `n_paths` is
    /// missing, zero or above [`MAX_PATHS`].
    pub fn build(self) -> Result<McConfig, SimulationError> {
        let n_paths = self.n_paths.unwrap_or(0);
        if n_paths == 0 || n_paths > MAX_PATHS {
            return Err(SimulationError::InvalidPathCount(n_paths));
        }
        Ok(McConfig {
            n_paths,
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_valid() {
        let config = McConfig::builder().n_paths(1000).build().unwrap();
        assert_eq!(config.n_paths(), 1000);
        assert_eq!(config.seed(), None);
    }

    #[test]
    fn test_builder_with_seed() {
        let config = McConfig::builder().n_paths(10).seed(7).build().unwrap();
        assert_eq!(config.seed(), Some(7));
    }

    #[test]
    fn test_zero_paths_rejected() {
        let result = McConfig::builder().n_paths(0).build();
        assert!(matches!(result, Err(SimulationError::InvalidPathCount(0))));
    }

    #[test]
    fn test_missing_paths_rejected() {
        let result = McConfig::builder().build();
        assert!(matches!(result, Err(SimulationError::InvalidPathCount(0))));
    }

    #[test]
    fn test_too_many_paths_rejected() {
        let result = McConfig::builder().n_paths(MAX_PATHS + 1).build();
        assert!(matches!(result, Err(SimulationError::InvalidPathCount(_))));
    }

    #[test]
    fn test_gbm_defaults_validate() {
        assert!(GbmParams::default().validate().is_ok());
    }

    #[test]
    fn test_gbm_invalid_maturity() {
        let params = GbmParams {
            maturity: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SimulationError::InvalidMaturity { .. })
        ));
    }

    #[test]
    fn test_gbm_negative_volatility() {
        let params = GbmParams {
            volatility: -0.2,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SimulationError::InvalidVolatility { .. })
        ));
    }

    #[test]
    fn test_gbm_non_finite() {
        let params = GbmParams {
            spot: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SimulationError::NonFiniteParameter { name: "spot", .. })
        ));
    }
}
