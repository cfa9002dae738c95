//! Whitelisted math functions and named constants.
//!
//! The whitelist is closed: [`MathFn`] is a fixed enum, so no compilation
//! can ever reach a function outside this table. A [`FunctionTable`] value
//! is owned by each compiled expression rather than shared process-wide.

use std::collections::HashMap;

use crate::error::ExprError;

/// Built-in math functions available to payoff expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathFn {
    /// `exp(x)`
    Exp,
    /// `log(x)` natural logarithm
    Log,
    /// `sqrt(x)`
    Sqrt,
    /// `sin(x)`
    Sin,
    /// `cos(x)`
    Cos,
    /// `tan(x)`
    Tan,
    /// `fabs(x)` absolute value
    Fabs,
    /// `erf(x)` error function
    Erf,
    /// `erfc(x)` complementary error function
    Erfc,
    /// `max(a, b, ...)`
    Max,
    /// `min(a, b, ...)`
    Min,
}

impl MathFn {
    /// Resolves a source name to a whitelisted function.
    pub fn lookup(name: &str) -> Option<MathFn> {
        match name {
            "exp" => Some(MathFn::Exp),
            "log" => Some(MathFn::Log),
            "sqrt" => Some(MathFn::Sqrt),
            "sin" => Some(MathFn::Sin),
            "cos" => Some(MathFn::Cos),
            "tan" => Some(MathFn::Tan),
            "fabs" => Some(MathFn::Fabs),
            "erf" => Some(MathFn::Erf),
            "erfc" => Some(MathFn::Erfc),
            "max" => Some(MathFn::Max),
            "min" => Some(MathFn::Min),
            _ => None,
        }
    }

    /// Source name of the function.
    pub fn name(&self) -> &'static str {
        match self {
            MathFn::Exp => "exp",
            MathFn::Log => "log",
            MathFn::Sqrt => "sqrt",
            MathFn::Sin => "sin",
            MathFn::Cos => "cos",
            MathFn::Tan => "tan",
            MathFn::Fabs => "fabs",
            MathFn::Erf => "erf",
            MathFn::Erfc => "erfc",
            MathFn::Max => "max",
            MathFn::Min => "min",
        }
    }

    /// Checks the argument count: `max`/`min` are variadic with at least
    /// two arguments, everything else takes exactly one.
    pub fn accepts_arity(&self, n: usize) -> bool {
        match self {
            MathFn::Max | MathFn::Min => n >= 2,
            _ => n == 1,
        }
    }

    /// Human-readable arity description for diagnostics.
    pub fn arity_text(&self) -> &'static str {
        match self {
            MathFn::Max | MathFn::Min => "at least 2 arguments",
            _ => "exactly 1 argument",
        }
    }

    /// Applies the function. Callers must have checked the arity.
    ///
    /// Domain violations (e.g. `sqrt` of a negative, `log` of zero)
    /// produce non-finite values here; the evaluator turns those into
    /// [`ExprError::Eval`].
    #[inline]
    pub fn apply(&self, args: &[f64]) -> f64 {
        match self {
            MathFn::Exp => args[0].exp(),
            MathFn::Log => args[0].ln(),
            MathFn::Sqrt => args[0].sqrt(),
            MathFn::Sin => args[0].sin(),
            MathFn::Cos => args[0].cos(),
            MathFn::Tan => args[0].tan(),
            MathFn::Fabs => args[0].abs(),
            MathFn::Erf => pricer_core::math::erf(args[0]),
            MathFn::Erfc => pricer_core::math::erfc(args[0]),
            MathFn::Max => args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            MathFn::Min => args.iter().copied().fold(f64::INFINITY, f64::min),
        }
    }
}

/// Explicit whitelist configuration handed to the compiler.
///
/// Bundles the closed function set with the named mathematical constants
/// (`pi`, `e`). Whitelist entries take precedence over user-supplied
/// constants and declared variables during name resolution, so a payoff
/// cannot shadow `pi` or `max`.
#[derive(Debug, Clone)]
pub struct FunctionTable {
    constants: HashMap<&'static str, f64>,
}

impl FunctionTable {
    /// The standard table: all of [`MathFn`] plus `pi` and `e`.
    pub fn standard() -> Self {
        let constants = HashMap::from([
            ("pi", std::f64::consts::PI),
            ("e", std::f64::consts::E),
        ]);
        Self { constants }
    }

    /// Resolves a whitelisted function by name.
    pub fn function(&self, name: &str) -> Option<MathFn> {
        MathFn::lookup(name)
    }

    /// Resolves a whitelisted named constant.
    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    /// Returns whether `name` is any whitelist entry (function or constant).
    pub fn contains(&self, name: &str) -> bool {
        self.function(name).is_some() || self.constants.contains_key(name)
    }

    /// Evaluates a call through the table, checking arity.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::Eval`] on an arity mismatch. (Compilation
    /// already rejects these; the check keeps the table safe standalone.)
    pub fn call(&self, func: MathFn, args: &[f64]) -> Result<f64, ExprError> {
        if !func.accepts_arity(args.len()) {
            return Err(ExprError::Eval {
                message: format!(
                    "{}() takes {}, got {}",
                    func.name(),
                    func.arity_text(),
                    args.len()
                ),
            });
        }
        Ok(func.apply(args))
    }
}

impl Default for FunctionTable {
    fn default() -> Self {
        Self::standard()
    }
}
