//! Validated option specification.
//!
//! [`OptionSpec`] is the immutable record of market and contract inputs
//! consumed by the lattice pricer. Construction goes through
//! [`OptionSpecBuilder`], which validates every field; no partially-valid
//! instance is ever observable.

use super::error::SpecError;
use super::exercise::ExerciseStyle;
use super::kind::OptionKind;

/// Immutable option contract and market inputs.
///
/// Fields are private; read access goes through the inlined accessors.
/// The builder validates on [`build`](OptionSpecBuilder::build):
/// - `steps > 0`
/// - `maturity > 0` (years)
/// - `volatility >= 0`
/// - `dividend_yield >= 0`
/// - every numeric field finite
///
/// # Examples
/// ```
/// use pricer_core::{OptionKind, OptionSpec};
///
/// let spec = OptionSpec::builder()
///     .spot(100.0)
///     .strike(105.0)
///     .maturity(0.5)
///     .rate(0.03)
///     .volatility(0.25)
///     .steps(100)
///     .kind(OptionKind::Put)
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.strike(), 105.0);
/// assert!(spec.exercise().is_european()); // default
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionSpec {
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    volatility: f64,
    steps: usize,
    kind: OptionKind,
    exercise: ExerciseStyle,
    dividend_yield: f64,
}

impl OptionSpec {
    /// Creates a new specification builder.
    #[inline]
    pub fn builder() -> OptionSpecBuilder {
        OptionSpecBuilder::default()
    }

    /// Current underlying price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Annualised risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Annualised volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Number of lattice steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Option kind (call or put).
    #[inline]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Exercise style (european or american).
    #[inline]
    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }

    /// Continuous dividend yield (annualised, defaults to 0).
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Intrinsic value of the contract at the given underlying price.
    #[inline]
    pub fn intrinsic(&self, spot: f64) -> f64 {
        self.kind.intrinsic(spot, self.strike)
    }
}

/// Builder for [`OptionSpec`].
///
/// Required fields: `spot`, `strike`, `maturity`, `rate`, `volatility`,
/// `steps`. Optional: `kind` (default call), `exercise` (default european),
/// `dividend_yield` (default 0).
#[derive(Debug, Clone, Default)]
pub struct OptionSpecBuilder {
    spot: Option<f64>,
    strike: Option<f64>,
    maturity: Option<f64>,
    rate: Option<f64>,
    volatility: Option<f64>,
    steps: Option<usize>,
    kind: Option<OptionKind>,
    exercise: Option<ExerciseStyle>,
    dividend_yield: Option<f64>,
}

impl OptionSpecBuilder {
    /// Sets the current underlying price.
    #[inline]
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the strike price.
    #[inline]
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets the time to maturity in years.
    #[inline]
    pub fn maturity(mut self, maturity: f64) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the annualised risk-free rate.
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets the annualised volatility.
    #[inline]
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the number of lattice steps.
    #[inline]
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Sets the option kind.
    #[inline]
    pub fn kind(mut self, kind: OptionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the exercise style.
    #[inline]
    pub fn exercise(mut self, exercise: ExerciseStyle) -> Self {
        self.exercise = Some(exercise);
        self
    }

    /// Sets the continuous dividend yield.
    #[inline]
    pub fn dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = Some(dividend_yield);
        self
    }

    /// Validates all fields and builds the specification.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] naming the first offending field: a missing
    /// required field, a non-finite number, `steps == 0`,
    /// `maturity <= 0`, `volatility < 0` or `dividend_yield < 0`.
    pub fn build(self) -> Result<OptionSpec, SpecError> {
        let spot = self.spot.ok_or(SpecError::MissingField("spot"))?;
        let strike = self.strike.ok_or(SpecError::MissingField("strike"))?;
        let maturity = self.maturity.ok_or(SpecError::MissingField("maturity"))?;
        let rate = self.rate.ok_or(SpecError::MissingField("rate"))?;
        let volatility = self
            .volatility
            .ok_or(SpecError::MissingField("volatility"))?;
        let steps = self.steps.ok_or(SpecError::MissingField("steps"))?;

        let kind = self.kind.unwrap_or(OptionKind::Call);
        let exercise = self.exercise.unwrap_or(ExerciseStyle::European);
        let dividend_yield = self.dividend_yield.unwrap_or(0.0);

        for (field, value) in [
            ("spot", spot),
            ("strike", strike),
            ("maturity", maturity),
            ("rate", rate),
            ("volatility", volatility),
            ("dividend_yield", dividend_yield),
        ] {
            if !value.is_finite() {
                return Err(SpecError::NonFiniteField { field, value });
            }
        }

        if steps == 0 {
            return Err(SpecError::InvalidSteps { steps });
        }
        if maturity <= 0.0 {
            return Err(SpecError::InvalidMaturity { maturity });
        }
        if volatility < 0.0 {
            return Err(SpecError::InvalidVolatility { volatility });
        }
        if dividend_yield < 0.0 {
            return Err(SpecError::InvalidDividendYield { dividend_yield });
        }

        Ok(OptionSpec {
            spot,
            strike,
            maturity,
            rate,
            volatility,
            steps,
            kind,
            exercise,
            dividend_yield,
        })
    }
}
