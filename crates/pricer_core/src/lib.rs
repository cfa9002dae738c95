//! # pricer_core: Contract Types for Option Pricing
//!
//! Foundation crate of the Optira workspace. Provides:
//! - Option contract enums: [`OptionKind`], [`ExerciseStyle`] (`types`)
//! - Validated, immutable contract record: [`OptionSpec`] (`types::spec`)
//! - Error types: [`SpecError`] (`types::error`)
//! - Special math functions: `erf`, `erfc` (`math::special`)
//!
//! ## Validation Principle
//!
//! [`OptionSpec`] is the sole admission point for lattice inputs. Every
//! field is checked when [`OptionSpecBuilder::build`] runs; an invalid
//! combination never produces a live instance.
//!
//! ## Usage
//!
//! ```rust
//! use pricer_core::{ExerciseStyle, OptionKind, OptionSpec};
//!
//! let spec = OptionSpec::builder()
//!     .spot(100.0)
//!     .strike(100.0)
//!     .maturity(1.0)
//!     .rate(0.05)
//!     .volatility(0.2)
//!     .steps(200)
//!     .kind(OptionKind::Call)
//!     .exercise(ExerciseStyle::European)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(spec.steps(), 200);
//! assert_eq!(spec.dividend_yield(), 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod math;
pub mod types;

pub use types::error::SpecError;
pub use types::exercise::ExerciseStyle;
pub use types::kind::OptionKind;
pub use types::spec::{OptionSpec, OptionSpecBuilder};
