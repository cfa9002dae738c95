//! Compiled payoff expressions.
//!
//! [`PayoffExpr`] is the artifact the rest of the workspace consumes:
//! built once from text, then evaluated once per simulated path as a pure
//! function of the terminal price.

use std::collections::{HashMap, HashSet};

use crate::ast::{Expr, ExprKind};
use crate::error::ExprError;
use crate::functions::FunctionTable;
use crate::lexer::tokenize;
use crate::parser::parse;

/// Maximum accepted source length in bytes.
///
/// Bound on untrusted input; the reference behaviour had no limit.
pub const MAX_SOURCE_LEN: usize = 4096;

/// A validated, immutable payoff expression.
///
/// The single argument of [`eval`](PayoffExpr::eval) is bound to every
/// declared variable simultaneously, so a terminal price known under
/// several aliases (`s`, `ST`, `S_T`) works without rewriting the source.
/// Injected constants supply additional named values such as a strike or
/// barrier level.
///
/// Name resolution precedence: whitelist entries (functions, `pi`, `e`),
/// then injected constants, then declared variables. A payoff can therefore
/// never shadow `max` or `pi`.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use pricer_expr::PayoffExpr;
///
/// let constants = HashMap::from([("K".to_string(), 100.0), ("cap".to_string(), 20.0)]);
/// let payoff = PayoffExpr::compile("min(max(S_T - K, 0), cap)", &["S_T"], &constants).unwrap();
///
/// assert_eq!(payoff.eval(150.0).unwrap(), 20.0);
/// assert_eq!(payoff.eval(110.0).unwrap(), 10.0);
/// assert_eq!(payoff.eval(90.0).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct PayoffExpr {
    source: String,
    tree: Expr,
    variables: HashSet<String>,
    constants: HashMap<String, f64>,
    table: FunctionTable,
}

impl PayoffExpr {
    /// Compiles payoff source text.
    ///
    /// # Arguments
    ///
    /// * `source` - The expression text, e.g. `"max(s - 100, 0)"`
    /// * `variables` - Names the terminal price is bound to (aliases)
    /// * `constants` - Additional named constants visible to the expression
    ///
    /// # Errors
    ///
    /// * [`ExprError::SourceTooLong`] past [`MAX_SOURCE_LEN`]
    /// * [`ExprError::Syntax`] if the text does not lex or parse
    /// * [`ExprError::TooDeep`] past the nesting bound
    /// * [`ExprError::Security`] on any construct, name or call outside
    ///   the whitelist
    pub fn compile(
        source: &str,
        variables: &[&str],
        constants: &HashMap<String, f64>,
    ) -> Result<Self, ExprError> {
        if source.len() > MAX_SOURCE_LEN {
            return Err(ExprError::SourceTooLong {
                len: source.len(),
                max: MAX_SOURCE_LEN,
            });
        }

        let tree = parse(tokenize(source)?)?;
        let table = FunctionTable::standard();

        let variables: HashSet<String> = variables.iter().map(|v| v.to_string()).collect();
        let constants = constants.clone();

        validate(&tree, &variables, &constants, &table)?;

        Ok(Self {
            source: source.to_string(),
            tree,
            variables,
            constants,
            table,
        })
    }

    /// The original source text.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates the payoff at a terminal price.
    ///
    /// Pure: repeated calls with the same argument return the same value.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::Eval`] on a runtime fault: a math-domain
    /// violation or any operation producing a non-finite intermediate
    /// (division by zero, overflowing power, `sqrt` of a negative, ...).
    pub fn eval(&self, terminal_price: f64) -> Result<f64, ExprError> {
        self.eval_node(&self.tree, terminal_price)
    }

    fn eval_node(&self, expr: &Expr, s: f64) -> Result<f64, ExprError> {
        let value = match &expr.kind {
            ExprKind::Number(value) => *value,
            ExprKind::Name(name) => self.resolve_name(name, s)?,
            ExprKind::Unary { op, operand } => op.apply(self.eval_node(operand, s)?),
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.eval_node(lhs, s)?;
                let rhs = self.eval_node(rhs, s)?;
                let value = op.apply(lhs, rhs);
                if !value.is_finite() {
                    return Err(ExprError::Eval {
                        message: format!(
                            "operator '{}' produced a non-finite value from {lhs} and {rhs}",
                            op.symbol()
                        ),
                    });
                }
                value
            }
            ExprKind::Call { name, args } => {
                // Validation guarantees the lookup succeeds.
                let func = self.table.function(name).ok_or_else(|| ExprError::Eval {
                    message: format!("'{name}' is not callable"),
                })?;
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval_node(arg, s)?);
                }
                let value = self.table.call(func, &values)?;
                if !value.is_finite() {
                    return Err(ExprError::Eval {
                        message: format!("{name}() produced a non-finite value"),
                    });
                }
                value
            }
        };
        Ok(value)
    }

    fn resolve_name(&self, name: &str, s: f64) -> Result<f64, ExprError> {
        if let Some(value) = self.table.constant(name) {
            return Ok(value);
        }
        if self.table.function(name).is_some() {
            // Validation admits whitelisted function names as references;
            // they only fault if actually used as a value.
            return Err(ExprError::Eval {
                message: format!("'{name}' is a function and has no numeric value"),
            });
        }
        if let Some(value) = self.constants.get(name) {
            return Ok(*value);
        }
        if self.variables.contains(name) {
            return Ok(s);
        }
        Err(ExprError::Eval {
            message: format!("unresolved name '{name}'"),
        })
    }
}

/// Walks the tree rejecting anything outside the whitelist.
fn validate(
    expr: &Expr,
    variables: &HashSet<String>,
    constants: &HashMap<String, f64>,
    table: &FunctionTable,
) -> Result<(), ExprError> {
    match &expr.kind {
        ExprKind::Number(_) => Ok(()),
        ExprKind::Name(name) => {
            if variables.contains(name) || constants.contains_key(name) || table.contains(name) {
                Ok(())
            } else {
                Err(ExprError::Security {
                    message: format!(
                        "unknown name '{name}': only payoff variables, \
                         provided constants and math functions are allowed"
                    ),
                    span: expr.span,
                })
            }
        }
        ExprKind::Unary { operand, .. } => validate(operand, variables, constants, table),
        ExprKind::Binary { lhs, rhs, .. } => {
            validate(lhs, variables, constants, table)?;
            validate(rhs, variables, constants, table)
        }
        ExprKind::Call { name, args } => {
            let func = table.function(name).ok_or_else(|| ExprError::Security {
                message: format!("call to non-whitelisted function '{name}'"),
                span: expr.span,
            })?;
            if !func.accepts_arity(args.len()) {
                return Err(ExprError::Security {
                    message: format!(
                        "{name}() takes {}, got {}",
                        func.arity_text(),
                        args.len()
                    ),
                    span: expr.span,
                });
            }
            for arg in args {
                validate(arg, variables, constants, table)?;
            }
            Ok(())
        }
    }
}
