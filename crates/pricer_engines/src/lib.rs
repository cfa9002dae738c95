//! # pricer_engines: Numerical Option Pricers
//!
//! Two independent pricing methods over the contract types of
//! `pricer_core`:
//!
//! - [`lattice`] - Cox-Ross-Rubinstein binomial tree with backward
//!   induction, European and American exercise, continuous dividend yield.
//! - [`mc`] - Monte Carlo estimation under geometric Brownian motion with
//!   an arbitrary compiled payoff from `pricer_expr`.
//!
//! Both pricers are synchronous pure computations. Each Monte Carlo call
//! owns its random generator and accumulators; with a fixed seed the
//! result is bit-reproducible across runs.
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use pricer_core::{OptionKind, OptionSpec};
//! use pricer_engines::{lattice, mc};
//! use pricer_expr::PayoffExpr;
//!
//! let spec = OptionSpec::builder()
//!     .spot(100.0)
//!     .strike(100.0)
//!     .maturity(1.0)
//!     .rate(0.05)
//!     .volatility(0.2)
//!     .steps(200)
//!     .kind(OptionKind::Call)
//!     .build()
//!     .unwrap();
//! let tree_price = lattice::price(&spec).unwrap();
//!
//! let payoff = PayoffExpr::compile("max(s - 100, 0)", &["s"], &HashMap::new()).unwrap();
//! let config = mc::McConfig::builder().n_paths(10_000).seed(42).build().unwrap();
//! let estimate = mc::estimate(mc::GbmParams::default(), &config, &payoff).unwrap();
//!
//! assert!((tree_price - estimate.price).abs() < 1.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod lattice;
pub mod mc;
pub mod rng;

pub use lattice::{LatticeError, LatticeParams};
pub use mc::{GbmParams, McConfig, McConfigBuilder, McResult, SimulationError};
pub use rng::PathRng;
