//! Expression error types with span-based diagnostics.

use std::fmt;

use thiserror::Error;

/// Byte range into the expression source, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a span covering `start..end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Errors produced by the expression pipeline.
///
/// The taxonomy separates text that does not parse (`Syntax`), text that
/// parses but uses something outside the whitelist (`Security`), resource
/// bounds on untrusted input (`SourceTooLong`, `TooDeep`) and faults that
/// can only be detected while evaluating (`Eval`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    /// The source text cannot be tokenised or parsed.
    #[error("expression syntax error at {span}: {message}")]
    Syntax {
        /// What went wrong.
        message: String,
        /// Where in the source it went wrong.
        span: Span,
    },

    /// The source parses but contains a disallowed construct, name or call.
    #[error("expression security error at {span}: {message}")]
    Security {
        /// The disallowed construct or name.
        message: String,
        /// Where in the source it appears.
        span: Span,
    },

    /// The source exceeds the length bound for untrusted input.
    #[error("expression too long: {len} bytes (limit {max})")]
    SourceTooLong {
        /// Actual source length in bytes.
        len: usize,
        /// The configured limit.
        max: usize,
    },

    /// The expression nests deeper than the recursion bound.
    #[error("expression nested too deeply (limit {max})")]
    TooDeep {
        /// The configured limit.
        max: usize,
    },

    /// The compiled expression faulted during evaluation, e.g. a
    /// math-domain violation producing a non-finite value.
    #[error("payoff evaluation error: {message}")]
    Eval {
        /// Description of the fault.
        message: String,
    },
}

impl ExprError {
    /// Returns whether this is a compile-time error (anything but `Eval`).
    pub fn is_compile_error(&self) -> bool {
        !matches!(self, ExprError::Eval { .. })
    }
}
