use thiserror::Error;

use sobox_constraints::ConstraintError;
use sobox_space::SpaceError;

/// A result type for optimizer errors
pub type Result<T> = std::result::Result<T, OptimError>;

/// An error raised by the ask/tell optimization loop
#[derive(Error, Debug)]
pub enum OptimError {
    /// When the optimizer configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// When a told evaluation violates the loop contract
    #[error("Invalid evaluation: {0}")]
    InvalidEvaluation(String),
    /// When a surrogate model cannot be trained or queried
    #[error("Surrogate error: {0}")]
    SurrogateError(String),
    /// When a search space error occurs
    #[error(transparent)]
    SpaceError(#[from] SpaceError),
    /// When a constraint error occurs, including infeasibility of the
    /// constrained candidate search
    #[error(transparent)]
    ConstraintError(#[from] ConstraintError),
}
