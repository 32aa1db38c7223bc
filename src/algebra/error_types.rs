use thiserror::Error;

/// Error type returned by dense matrix construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixFormatError {
    /// Data length does not match the requested matrix dimensions
    #[error("Matrix of size {m}x{n} cannot be built from {len} elements")]
    IncompatibleDimension { m: usize, n: usize, len: usize },
    /// Rows supplied with differing lengths
    #[error("Row {row} has length {len}, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// Error type returned by the dense factorization routines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DenseFactorizationError {
    /// Matrix is not square, or a vector argument has the wrong length
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    /// Pivot is zero or non-finite and could not be regularized
    #[error("Zero or non-finite pivot encountered in column {0}")]
    ZeroPivot(usize),
}
