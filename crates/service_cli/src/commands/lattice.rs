//! Lattice command implementation.
//!
//! Builds an `OptionSpec` from the command-line fields and prices it on
//! the binomial lattice.

use pricer_core::{ExerciseStyle, OptionKind, OptionSpec};
use pricer_engines::lattice;
use tracing::info;

use crate::Result;

/// Parsed `optira lattice` arguments.
pub struct LatticeArgs {
    /// Current underlying price.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Time to maturity in years.
    pub maturity: f64,
    /// Risk-free rate.
    pub rate: f64,
    /// Volatility.
    pub volatility: f64,
    /// Lattice step count.
    pub steps: usize,
    /// Option kind text ("call" or "put").
    pub kind: String,
    /// Exercise style text ("european" or "american").
    pub exercise: String,
    /// Continuous dividend yield.
    pub dividend_yield: f64,
}

/// Run the lattice command.
pub fn run(args: LatticeArgs) -> Result<()> {
    let kind: OptionKind = args.kind.parse()?;
    let exercise: ExerciseStyle = args.exercise.parse()?;

    info!(
        spot = args.spot,
        strike = args.strike,
        steps = args.steps,
        %kind,
        %exercise,
        "Pricing on CRR lattice"
    );

    let spec = OptionSpec::builder()
        .spot(args.spot)
        .strike(args.strike)
        .maturity(args.maturity)
        .rate(args.rate)
        .volatility(args.volatility)
        .steps(args.steps)
        .kind(kind)
        .exercise(exercise)
        .dividend_yield(args.dividend_yield)
        .build()?;

    let price = lattice::price(&spec)?;
    println!("Option price: {price:.4}");

    Ok(())
}
