//! Backward-induction pricing over the CRR lattice.

use pricer_core::OptionSpec;

use super::error::LatticeError;
use super::params::LatticeParams;

/// Prices an option on a CRR binomial lattice.
///
/// Terminal payoffs are laid out over `steps + 1` nodes (node `j` holds
/// `spot * up^j * down^(steps-j)`, built by multiplicative recurrence) and
/// folded back one level at a time. American exercise takes the maximum of
/// continuation and intrinsic value at every interior node; European
/// exercise keeps the continuation value unmodified.
///
/// Zero volatility is handled before any lattice parameter is derived:
/// `up == down == 1` would zero the probability denominator, and the price
/// collapses to the discounted payoff of the deterministic forward
/// `spot * exp((r - q) * T)`.
///
/// # Errors
///
/// [`LatticeError::ProbabilityOutOfRange`] when the risk-neutral up-move
/// probability leaves [0, 1].
///
/// # Examples
///
/// ```rust
/// use pricer_core::{OptionKind, OptionSpec};
/// use pricer_engines::lattice;
///
/// let spec = OptionSpec::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .maturity(1.0)
///     .rate(0.05)
///     .volatility(0.2)
///     .steps(200)
///     .kind(OptionKind::Call)
///     .build()
///     .unwrap();
///
/// let price = lattice::price(&spec).unwrap();
/// assert!((price - 10.45).abs() < 0.05);
/// ```
pub fn price(spec: &OptionSpec) -> Result<f64, LatticeError> {
    if spec.volatility() == 0.0 {
        let forward =
            spec.spot() * ((spec.rate() - spec.dividend_yield()) * spec.maturity()).exp();
        let discount = (-spec.rate() * spec.maturity()).exp();
        return Ok(discount * spec.intrinsic(forward));
    }

    let params = LatticeParams::derive(spec)?;
    let steps = spec.steps();

    // spot * up^j * down^(n-j) = spot * down^n * ratio^j
    let ratio = params.up / params.down;
    let disc_p = params.discount * params.prob;
    let disc_1mp = params.discount * (1.0 - params.prob);

    let mut values = vec![0.0_f64; steps + 1];
    {
        let mut st = spec.spot() * params.down.powi(steps as i32);
        for value in values.iter_mut() {
            *value = spec.intrinsic(st);
            st *= ratio;
        }
    }

    let early_exercise = spec.exercise().allows_early_exercise();
    let mut base = spec.spot() * params.down.powi(steps as i32 - 1);
    for step in (0..steps).rev() {
        if early_exercise {
            let mut st = base;
            for j in 0..=step {
                let continuation = disc_p * values[j + 1] + disc_1mp * values[j];
                values[j] = continuation.max(spec.intrinsic(st));
                st *= ratio;
            }
        } else {
            for j in 0..=step {
                values[j] = disc_p * values[j + 1] + disc_1mp * values[j];
            }
        }
        base *= params.up;
    }

    Ok(values[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::{ExerciseStyle, OptionKind};
    use proptest::prelude::*;

    fn build_spec(
        spot: f64,
        strike: f64,
        maturity: f64,
        rate: f64,
        volatility: f64,
        steps: usize,
        kind: OptionKind,
        exercise: ExerciseStyle,
        dividend_yield: f64,
    ) -> OptionSpec {
        OptionSpec::builder()
            .spot(spot)
            .strike(strike)
            .maturity(maturity)
            .rate(rate)
            .volatility(volatility)
            .steps(steps)
            .kind(kind)
            .exercise(exercise)
            .dividend_yield(dividend_yield)
            .build()
            .unwrap()
    }

    fn european_call_200() -> OptionSpec {
        build_spec(
            100.0,
            100.0,
            1.0,
            0.05,
            0.2,
            200,
            OptionKind::Call,
            ExerciseStyle::European,
            0.0,
        )
    }

    #[test]
    fn test_reference_scenario() {
        // 200-step at-the-money European call, textbook parameters.
        let price = price(&european_call_200()).unwrap();
        assert!((price - 10.45).abs() < 0.05, "price = {price}");
    }

    #[test]
    fn test_determinism_bit_identical() {
        let spec = european_call_200();
        let a = price(&spec).unwrap();
        let b = price(&spec).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_put_call_parity_european() {
        let call = price(&european_call_200()).unwrap();
        let put = price(&build_spec(
            100.0,
            100.0,
            1.0,
            0.05,
            0.2,
            200,
            OptionKind::Put,
            ExerciseStyle::European,
            0.0,
        ))
        .unwrap();
        let forward_value = 100.0 - 100.0 * (-0.05_f64).exp();
        assert_relative_eq!(call - put, forward_value, epsilon = 1e-9);
    }

    #[test]
    fn test_american_at_least_european() {
        for kind in [OptionKind::Call, OptionKind::Put] {
            let european = price(&build_spec(
                100.0,
                110.0,
                1.0,
                0.08,
                0.25,
                150,
                kind,
                ExerciseStyle::European,
                0.0,
            ))
            .unwrap();
            let american = price(&build_spec(
                100.0,
                110.0,
                1.0,
                0.08,
                0.25,
                150,
                kind,
                ExerciseStyle::American,
                0.0,
            ))
            .unwrap();
            assert!(
                american >= european - 1e-12,
                "{kind}: american {american} < european {european}"
            );
        }
    }

    #[test]
    fn test_american_put_premium_strictly_positive() {
        // Deep in-the-money put with positive rates carries early-exercise value.
        let european = price(&build_spec(
            80.0,
            120.0,
            2.0,
            0.08,
            0.2,
            200,
            OptionKind::Put,
            ExerciseStyle::European,
            0.0,
        ))
        .unwrap();
        let american = price(&build_spec(
            80.0,
            120.0,
            2.0,
            0.08,
            0.2,
            200,
            OptionKind::Put,
            ExerciseStyle::American,
            0.0,
        ))
        .unwrap();
        assert!(american > european + 0.1);
    }

    #[test]
    fn test_monotone_in_volatility() {
        let mut last = 0.0;
        for volatility in [0.05, 0.1, 0.2, 0.4, 0.8] {
            let p = price(&build_spec(
                100.0,
                100.0,
                1.0,
                0.05,
                volatility,
                200,
                OptionKind::Call,
                ExerciseStyle::European,
                0.0,
            ))
            .unwrap();
            assert!(p >= last, "vol {volatility}: {p} < {last}");
            last = p;
        }
    }

    #[test]
    fn test_dividend_yield_lowers_call() {
        let without = price(&european_call_200()).unwrap();
        let with = price(&build_spec(
            100.0,
            100.0,
            1.0,
            0.05,
            0.2,
            200,
            OptionKind::Call,
            ExerciseStyle::European,
            0.03,
        ))
        .unwrap();
        assert!(with < without);
    }

    #[test]
    fn test_zero_volatility_deterministic_forward() {
        let spec = build_spec(
            110.0,
            100.0,
            1.0,
            0.05,
            0.0,
            100,
            OptionKind::Call,
            ExerciseStyle::European,
            0.0,
        );
        let p = price(&spec).unwrap();
        let forward = 110.0 * (0.05_f64).exp();
        let expected = (-0.05_f64).exp() * (forward - 100.0);
        assert_relative_eq!(p, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_volatility_out_of_the_money_is_zero() {
        let spec = build_spec(
            80.0,
            100.0,
            1.0,
            0.0,
            0.0,
            10,
            OptionKind::Call,
            ExerciseStyle::European,
            0.0,
        );
        assert_eq!(price(&spec).unwrap(), 0.0);
    }

    #[test]
    fn test_probability_out_of_range_propagates() {
        let spec = build_spec(
            100.0,
            100.0,
            1.0,
            0.5,
            0.01,
            1,
            OptionKind::Call,
            ExerciseStyle::European,
            0.0,
        );
        assert!(matches!(
            price(&spec),
            Err(LatticeError::ProbabilityOutOfRange { .. })
        ));
    }

    #[test]
    fn test_single_step_tree() {
        // One step, worked by hand: u = e^0.2, d = e^-0.2, p = (e^0.05-d)/(u-d).
        let spec = build_spec(
            100.0,
            100.0,
            1.0,
            0.05,
            0.2,
            1,
            OptionKind::Call,
            ExerciseStyle::European,
            0.0,
        );
        let u = (0.2_f64).exp();
        let d = (-0.2_f64).exp();
        let p = ((0.05_f64).exp() - d) / (u - d);
        let expected = (-0.05_f64).exp() * (p * (100.0 * u - 100.0));
        assert_relative_eq!(price(&spec).unwrap(), expected, epsilon = 1e-12);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_european_call_no_arbitrage_bounds(
            spot in 50.0_f64..150.0,
            strike in 50.0_f64..150.0,
            maturity in 0.25_f64..2.0,
            rate in 0.0_f64..0.1,
            volatility in 0.1_f64..0.5,
            steps in 50_usize..200,
            dividend_yield in 0.0_f64..0.05,
        ) {
            let spec = build_spec(
                spot, strike, maturity, rate, volatility, steps,
                OptionKind::Call, ExerciseStyle::European, dividend_yield,
            );
            let p = price(&spec).unwrap();
            let lower = (spot * (-dividend_yield * maturity).exp()
                - strike * (-rate * maturity).exp())
                .max(0.0);
            let upper = spot * (-dividend_yield * maturity).exp();
            prop_assert!(p >= lower - 1e-9, "price {p} below bound {lower}");
            prop_assert!(p <= upper + 1e-9, "price {p} above bound {upper}");
        }

        #[test]
        fn prop_american_dominates_european(
            spot in 50.0_f64..150.0,
            strike in 50.0_f64..150.0,
            maturity in 0.25_f64..2.0,
            rate in 0.0_f64..0.1,
            volatility in 0.1_f64..0.5,
            steps in 50_usize..150,
        ) {
            let european = price(&build_spec(
                spot, strike, maturity, rate, volatility, steps,
                OptionKind::Put, ExerciseStyle::European, 0.0,
            )).unwrap();
            let american = price(&build_spec(
                spot, strike, maturity, rate, volatility, steps,
                OptionKind::Put, ExerciseStyle::American, 0.0,
            )).unwrap();
            prop_assert!(american >= european - 1e-9);
        }
    }
}
