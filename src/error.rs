//! Errors for interpolation and the linear solves behind it.

use thiserror::Error;

/// Errors returned by the interpolation routine and the linear solvers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(InvalidInput),

    #[error("Singular system: {0}")]
    SingularSystem(Singularity),

    #[error("Jacobi iteration did not converge after {iterations} iterations (residual {residual:e})")]
    NotConverged { iterations: usize, residual: f64 },
}

/// Input rejected before any system is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("at least 4 points are required, got {0}")]
    TooFewPoints(usize),

    #[error("point {index} has a non-finite coordinate")]
    NonFinite { index: usize },

    #[error("expected {expected} values, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// Reason a linear system could not be solved.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Singularity {
    #[error("point {index} coincides with the next point")]
    ZeroChord { index: usize },

    #[error("pivot {pivot:e} in column {column} is below tolerance")]
    ZeroPivot { column: usize, pivot: f64 },

    #[error("diagonal entry in row {row} is zero")]
    ZeroDiagonal { row: usize },

    #[error("control points of segment {segment} are not finite")]
    NonFiniteControlPoint { segment: usize },
}

impl From<InvalidInput> for Error {
    fn from(value: InvalidInput) -> Self {
        Error::InvalidInput(value)
    }
}

impl From<Singularity> for Error {
    fn from(value: Singularity) -> Self {
        Error::SingularSystem(value)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
