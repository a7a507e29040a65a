use thiserror::Error;

use sobox_space::SpaceError;

/// A result type for constraint errors
pub type Result<T> = std::result::Result<T, ConstraintError>;

/// An error raised when declaring constraints or sampling under them
#[derive(Error, Debug)]
pub enum ConstraintError {
    /// When a constraint references a dimension index outside the space
    #[error("Dimension index out of range: {0}")]
    DimensionIndex(String),
    /// When a constraint kind does not match the target dimension kind
    #[error("Kind mismatch: {0}")]
    KindMismatch(String),
    /// When two Single constraints pin the same dimension
    #[error("More than one Single constraint on dimension {0}")]
    DuplicateSingle(usize),
    /// When a constraint region exceeds the dimension domain
    #[error("Bounds out of domain: {0}")]
    BoundsOutOfDomain(String),
    /// When a pinned value lies outside the dimension domain
    #[error("Value out of domain: {0}")]
    ValueOutOfDomain(String),
    /// When a Sum constraint is malformed
    #[error("Invalid sum constraint: {0}")]
    InvalidSum(String),
    /// When the constrained sampler exhausts its attempt budget
    #[error("Infeasible constraint combination: {0}")]
    Infeasible(String),
    /// When a search space error occurs
    #[error(transparent)]
    Space(#[from] SpaceError),
}
