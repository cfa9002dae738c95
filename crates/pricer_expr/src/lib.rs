//! # pricer_expr: Sandboxed Payoff Expression Compiler
//!
//! Compiles user-supplied payoff text such as `max(S_T - K, 0)` into a
//! reusable numeric function of the terminal price, with no ambient
//! code-execution surface.
//!
//! ## Pipeline
//!
//! ```text
//! source text
//!   └── lexer      (tokens with byte spans)
//!        └── parser     (explicit AST: literal / name / unary / binary / call)
//!             └── validation (whitelist of names, constants and functions)
//!                  └── PayoffExpr (evaluated once per simulated path)
//! ```
//!
//! ## Sandbox Guarantees
//!
//! - The grammar admits only numeric literals, name references, unary `+`/`-`,
//!   binary `+ - * / % // **`, parentheses and calls to a fixed table of math
//!   functions. Attribute access, subscripting, assignment and any other
//!   construct are rejected at compile time with a security error.
//! - Name references must come from the declared variable set, the injected
//!   constant map or the whitelist; anything else is a security error.
//! - The whitelist is an explicit value owned by each compiled expression,
//!   never process-wide state, so concurrent compilations with different
//!   variable or constant sets cannot interfere.
//! - Source length and nesting depth are bounded
//!   ([`MAX_SOURCE_LEN`](payoff::MAX_SOURCE_LEN),
//!   [`MAX_DEPTH`](parser::MAX_DEPTH)); the limits exist purely to stop
//!   resource exhaustion from untrusted input.
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use pricer_expr::PayoffExpr;
//!
//! let constants = HashMap::from([("K".to_string(), 100.0)]);
//! let payoff = PayoffExpr::compile("max(S_T - K, 0)", &["s", "ST", "S_T"], &constants).unwrap();
//!
//! assert_eq!(payoff.eval(150.0).unwrap(), 50.0);
//! assert_eq!(payoff.eval(50.0).unwrap(), 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod ast;
pub mod error;
pub mod functions;
pub mod lexer;
pub mod parser;
pub mod payoff;

pub use ast::{BinaryOp, Expr, ExprKind, UnaryOp};
pub use error::{ExprError, Span};
pub use functions::{FunctionTable, MathFn};
pub use payoff::PayoffExpr;
