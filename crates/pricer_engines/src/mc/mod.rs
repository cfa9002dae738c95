//! Monte Carlo pricing under geometric Brownian motion.
//!
//! Terminal-price simulation only: the estimator is unbiased for any
//! payoff depending solely on the terminal price and is not valid for
//! path-dependent payoffs, which is a scope boundary rather than a defect.

pub mod config;
pub mod error;
pub mod pricer;

pub use config::{GbmParams, McConfig, McConfigBuilder, MAX_PATHS};
pub use error::SimulationError;
pub use pricer::{estimate, McResult};
