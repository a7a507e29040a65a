use thiserror::Error;

/// A result type for search space errors
pub type Result<T> = std::result::Result<T, SpaceError>;

/// An error raised when defining or using a search space
#[derive(Error, Debug)]
pub enum SpaceError {
    /// When a dimension specification is invalid
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),
    /// When a point component does not belong to its dimension
    #[error("Invalid point: {0}")]
    InvalidPoint(String),
    /// When a point or a warped sample has a wrong arity
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
}
