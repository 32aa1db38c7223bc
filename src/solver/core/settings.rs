use crate::solver::implementations::default::{DefaultSettings, ProblemDataError};
use thiserror::Error;

/// Solver general core settings are the same as in the default solver.
///
/// Go [here](crate::solver::implementations::default::DefaultSettings)
/// to view the complete list.
///
pub type CoreSettings<T> = DefaultSettings<T>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// A field holds a value outside of its legal range
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
    /// Two fields hold mutually inconsistent values
    #[error("Inconsistent values for fields \"{0}\" and \"{1}\"")]
    InconsistentFields(&'static str, &'static str),
}

#[derive(Error, Debug)]
/// Error type returned when a solver cannot be constructed.
///
/// These are programming errors in the caller's inputs.  Numerical
/// outcomes of a solve (infeasibility, iteration limits, breakdowns)
/// are never reported here but through the
/// [`SolverStatus`](crate::solver::SolverStatus) of the solution.
pub enum SolverError {
    /// The problem data has inconsistent dimensions
    #[error("Bad problem data: {0}")]
    BadProblemData(#[from] ProblemDataError),
    /// The supplied starting point has the wrong length
    #[error("Bad starting point: expected length {expected}, got {len}")]
    BadStartingPoint { expected: usize, len: usize },
    /// The supplied settings are invalid
    #[error("Bad settings: {0}")]
    Settings(#[from] SettingsError),
}
