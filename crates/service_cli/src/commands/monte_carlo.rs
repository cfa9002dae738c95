//! Monte Carlo command implementation.
//!
//! Compiles the payoff expression (prompting on stdin when the flag is
//! omitted) and runs the GBM estimator. Prompting lives here and only
//! here; the engine never performs interactive input.

use std::collections::HashMap;
use std::io::Write;

use pricer_engines::mc::{estimate, GbmParams, McConfig};
use pricer_expr::PayoffExpr;
use tracing::info;

use crate::Result;

/// Parsed `optira mc` arguments.
pub struct McArgs {
    /// Current underlying price.
    pub spot: f64,
    /// Risk-free rate.
    pub rate: f64,
    /// Volatility.
    pub volatility: f64,
    /// Time to maturity in years.
    pub maturity: f64,
    /// Continuous dividend yield.
    pub dividend_yield: f64,
    /// Number of Monte Carlo paths.
    pub paths: usize,
    /// Payoff expression; prompted for when absent.
    pub payoff: Option<String>,
    /// Optional RNG seed.
    pub seed: Option<u64>,
}

/// Run the Monte Carlo command.
pub fn run(args: McArgs) -> Result<()> {
    let source = match args.payoff {
        Some(source) => source,
        None => prompt_for_payoff()?,
    };

    let payoff = PayoffExpr::compile(&source, &["s"], &HashMap::new())?;

    info!(
        paths = args.paths,
        seed = ?args.seed,
        payoff = payoff.source(),
        "Running Monte Carlo estimation"
    );

    let params = GbmParams {
        spot: args.spot,
        rate: args.rate,
        volatility: args.volatility,
        maturity: args.maturity,
        dividend_yield: args.dividend_yield,
    };

    let mut builder = McConfig::builder().n_paths(args.paths);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let config = builder.build()?;

    let result = estimate(params, &config, &payoff)?;
    println!("Estimated option price: {:.4}", result.price);
    println!("Standard error: {:.4}", result.std_error);

    Ok(())
}

/// Reads a payoff expression from stdin.
fn prompt_for_payoff() -> Result<String> {
    print!("Payoff expression in variable 's' (e.g. max(s - 100, 0)): ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
