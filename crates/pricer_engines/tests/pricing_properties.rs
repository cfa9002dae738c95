//! Cross-engine consistency checks: the Monte Carlo estimator must agree
//! with the European lattice price, and both must satisfy the standard
//! model-free relations.

use std::collections::HashMap;

use approx::assert_relative_eq;
use pricer_core::{ExerciseStyle, OptionKind, OptionSpec};
use pricer_engines::mc::{estimate, GbmParams, McConfig};
use pricer_engines::{lattice, SimulationError};
use pricer_expr::PayoffExpr;

fn european_spec(kind: OptionKind, volatility: f64, steps: usize) -> OptionSpec {
    OptionSpec::builder()
        .spot(100.0)
        .strike(100.0)
        .maturity(1.0)
        .rate(0.05)
        .volatility(volatility)
        .steps(steps)
        .kind(kind)
        .exercise(ExerciseStyle::European)
        .build()
        .unwrap()
}

#[test]
fn monte_carlo_matches_lattice_reference_scenario() {
    // spot=100, strike=100, T=1, r=0.05, sigma=0.2, 100k paths, seed 42:
    // the estimate must land within 0.1 of the 200-step lattice call price.
    let tree_price = lattice::price(&european_spec(OptionKind::Call, 0.2, 200)).unwrap();

    let payoff = PayoffExpr::compile("max(s-100,0)", &["s"], &HashMap::new()).unwrap();
    let config = McConfig::builder().n_paths(100_000).seed(42).build().unwrap();
    let result = estimate(GbmParams::default(), &config, &payoff).unwrap();

    assert!(
        (result.price - tree_price).abs() < 0.1,
        "mc {} vs lattice {tree_price}",
        result.price
    );
}

#[test]
fn monte_carlo_converges_within_sampling_error() {
    let tree_price = lattice::price(&european_spec(OptionKind::Call, 0.2, 500)).unwrap();

    let payoff = PayoffExpr::compile("max(s-100,0)", &["s"], &HashMap::new()).unwrap();
    let config = McConfig::builder().n_paths(500_000).seed(7).build().unwrap();
    let result = estimate(GbmParams::default(), &config, &payoff).unwrap();

    // Allow for both sampling noise and the lattice discretisation bias.
    let tolerance = 3.0 * result.std_error + 0.02;
    assert!(
        (result.price - tree_price).abs() < tolerance,
        "mc {} vs lattice {tree_price}, tolerance {tolerance}",
        result.price
    );
}

#[test]
fn monte_carlo_put_matches_lattice() {
    let tree_price = lattice::price(&european_spec(OptionKind::Put, 0.2, 200)).unwrap();

    let payoff = PayoffExpr::compile("max(100 - s, 0)", &["s"], &HashMap::new()).unwrap();
    let config = McConfig::builder().n_paths(200_000).seed(11).build().unwrap();
    let result = estimate(GbmParams::default(), &config, &payoff).unwrap();

    let tolerance = 3.0 * result.std_error + 0.02;
    assert!((result.price - tree_price).abs() < tolerance);
}

#[test]
fn expression_constants_reproduce_plain_strike() {
    // `max(S_T - K, 0)` with K injected equals `max(s - 100, 0)`.
    let constants = HashMap::from([("K".to_string(), 100.0)]);
    let with_constant =
        PayoffExpr::compile("max(S_T - K, 0)", &["s", "ST", "S_T"], &constants).unwrap();
    let plain = PayoffExpr::compile("max(s - 100, 0)", &["s"], &HashMap::new()).unwrap();

    let config = McConfig::builder().n_paths(50_000).seed(5).build().unwrap();
    let a = estimate(GbmParams::default(), &config, &with_constant).unwrap();
    let b = estimate(GbmParams::default(), &config, &plain).unwrap();

    assert_eq!(a.price.to_bits(), b.price.to_bits());
}

#[test]
fn capped_call_is_cheaper_than_vanilla() {
    let config = McConfig::builder().n_paths(100_000).seed(13).build().unwrap();

    let vanilla = PayoffExpr::compile("max(s - 100, 0)", &["s"], &HashMap::new()).unwrap();
    let capped =
        PayoffExpr::compile("min(max(s - 100, 0), 20)", &["s"], &HashMap::new()).unwrap();

    let vanilla_price = estimate(GbmParams::default(), &config, &vanilla).unwrap().price;
    let capped_price = estimate(GbmParams::default(), &config, &capped).unwrap().price;

    assert!(capped_price < vanilla_price);
    assert!(capped_price > 0.0);
}

#[test]
fn put_call_parity_via_monte_carlo() {
    let config = McConfig::builder().n_paths(400_000).seed(17).build().unwrap();

    let call = PayoffExpr::compile("max(s - 100, 0)", &["s"], &HashMap::new()).unwrap();
    let put = PayoffExpr::compile("max(100 - s, 0)", &["s"], &HashMap::new()).unwrap();

    let call_result = estimate(GbmParams::default(), &config, &call).unwrap();
    let put_result = estimate(GbmParams::default(), &config, &put).unwrap();

    let expected = 100.0 - 100.0 * (-0.05_f64).exp();
    let tolerance = 3.0 * (call_result.std_error + put_result.std_error);
    assert!(
        (call_result.price - put_result.price - expected).abs() < tolerance,
        "parity violated: {} - {} vs {expected}",
        call_result.price,
        put_result.price
    );
}

#[test]
fn zero_volatility_engines_agree() {
    let spec = OptionSpec::builder()
        .spot(110.0)
        .strike(100.0)
        .maturity(1.0)
        .rate(0.05)
        .volatility(0.0)
        .steps(50)
        .kind(OptionKind::Call)
        .build()
        .unwrap();
    let tree_price = lattice::price(&spec).unwrap();

    let payoff = PayoffExpr::compile("max(s - 100, 0)", &["s"], &HashMap::new()).unwrap();
    let config = McConfig::builder().n_paths(100).seed(1).build().unwrap();
    let params = GbmParams {
        spot: 110.0,
        volatility: 0.0,
        ..Default::default()
    };
    let result = estimate(params, &config, &payoff).unwrap();

    assert_relative_eq!(result.price, tree_price, epsilon = 1e-9);
}

#[test]
fn evaluation_fault_never_returns_partial_result() {
    // log faults only on paths ending below 100; with 100k paths such a
    // path certainly occurs, and the estimate must abort as a whole.
    let payoff = PayoffExpr::compile("log(s - 100)", &["s"], &HashMap::new()).unwrap();
    let config = McConfig::builder().n_paths(100_000).seed(23).build().unwrap();
    let err = estimate(GbmParams::default(), &config, &payoff).unwrap_err();
    assert!(matches!(err, SimulationError::Payoff(_)));
}
