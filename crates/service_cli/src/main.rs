//! Optira CLI - command-line option pricing.
//!
//! # Commands
//!
//! - `optira lattice` - Price a European or American option on a
//!   Cox-Ross-Rubinstein binomial lattice
//! - `optira mc` - Estimate a price by Monte Carlo simulation with a
//!   user-supplied payoff expression (prompted for interactively when the
//!   `--payoff` flag is omitted)
//!
//! The CLI is a thin adapter: it gathers numeric fields, constructs engine
//! inputs, and prints the formatted price or the engine's error text. All
//! numerical work lives in the pricer crates.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;

pub use error::{CliError, Result};

/// Optira option pricing CLI
#[derive(Parser)]
#[command(name = "optira")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price an option on a CRR binomial lattice
    Lattice {
        /// Current underlying price
        #[arg(long)]
        spot: f64,

        /// Strike price
        #[arg(long)]
        strike: f64,

        /// Time to maturity in years
        #[arg(long)]
        maturity: f64,

        /// Risk-free rate (annualised)
        #[arg(long)]
        rate: f64,

        /// Volatility (annualised)
        #[arg(long)]
        volatility: f64,

        /// Number of lattice steps
        #[arg(long, default_value = "200")]
        steps: usize,

        /// Option kind (call, put)
        #[arg(short, long, default_value = "call")]
        kind: String,

        /// Exercise style (european, american)
        #[arg(short, long, default_value = "european")]
        exercise: String,

        /// Continuous dividend yield (annualised)
        #[arg(long, default_value = "0.0")]
        dividend_yield: f64,
    },

    /// Estimate a price by Monte Carlo simulation under GBM
    Mc {
        /// Current underlying price
        #[arg(long)]
        spot: f64,

        /// Risk-free rate (annualised)
        #[arg(long)]
        rate: f64,

        /// Volatility (annualised)
        #[arg(long)]
        volatility: f64,

        /// Time to maturity in years
        #[arg(long)]
        maturity: f64,

        /// Continuous dividend yield (annualised)
        #[arg(long, default_value = "0.0")]
        dividend_yield: f64,

        /// Number of Monte Carlo paths
        #[arg(short, long, default_value = "10000")]
        paths: usize,

        /// Payoff expression in variable 's' (terminal price), e.g.
        /// 'max(s - 100, 0)'. Prompted for when omitted.
        #[arg(long)]
        payoff: Option<String>,

        /// Optional RNG seed for reproducible results
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let outcome = match cli.command {
        Commands::Lattice {
            spot,
            strike,
            maturity,
            rate,
            volatility,
            steps,
            kind,
            exercise,
            dividend_yield,
        } => commands::lattice::run(commands::lattice::LatticeArgs {
            spot,
            strike,
            maturity,
            rate,
            volatility,
            steps,
            kind,
            exercise,
            dividend_yield,
        }),
        Commands::Mc {
            spot,
            rate,
            volatility,
            maturity,
            dividend_yield,
            paths,
            payoff,
            seed,
        } => commands::monte_carlo::run(commands::monte_carlo::McArgs {
            spot,
            rate,
            volatility,
            maturity,
            dividend_yield,
            paths,
            payoff,
            seed,
        }),
    };

    if let Err(err) = outcome {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
