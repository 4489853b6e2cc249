// Error types shared by every routine in the crate.

use ndarray::ShapeError;

/// Errors raised by the routines in this crate.
///
/// A zero-variance column on the correlation or standardized path produces
/// NaN matrix entries and is reported as `Eigendecomposition`. A singular
/// but finite covariance matrix is not an error: it yields zero eigenvalues.
#[derive(Debug, thiserror::Error)]
pub enum IdlError {
    /// The input array has the wrong number of dimensions.
    #[error("invalid input shape: expected {expected}, found {found} dimension(s)")]
    InvalidInputShape {
        /// Human readable description of the accepted rank(s).
        expected: &'static str,
        /// Rank of the array that was passed in.
        found: usize,
    },
    /// Any other argument the routine cannot work with.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The symmetric eigensolver reported a failure.
    #[error("eigendecomposition failed: {0}")]
    Eigendecomposition(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, IdlError>;

impl IdlError {
    /// Maps a failed `into_dimensionality` conversion onto `InvalidInputShape`.
    pub(crate) fn from_shape(_err: ShapeError, expected: &'static str, found: usize) -> Self {
        IdlError::InvalidInputShape { expected, found }
    }
}
