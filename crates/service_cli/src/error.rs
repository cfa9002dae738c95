//! CLI error type.

use thiserror::Error;

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced to the terminal.
///
/// Engine errors pass through transparently so the user sees the pricing
/// library's own message text.
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid option specification or enum text.
    #[error(transparent)]
    Spec(#[from] pricer_core::SpecError),

    /// Lattice pricing failure.
    #[error(transparent)]
    Lattice(#[from] pricer_engines::LatticeError),

    /// Payoff expression compilation or evaluation failure.
    #[error(transparent)]
    Expr(#[from] pricer_expr::ExprError),

    /// Monte Carlo configuration or estimation failure.
    #[error(transparent)]
    Simulation(#[from] pricer_engines::SimulationError),

    /// Terminal input/output failure (interactive prompt).
    #[error("input error: {0}")]
    Io(#[from] std::io::Error),
}
