use super::CoreSettings;
use crate::algebra::*;

pub mod direct;

/// Statistics from the most recent KKT factorization and solves
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KKTDiagnostics<T> {
    /// reciprocal condition estimate min|D| / max|D| of the LDL factors
    pub rcond: T,
    /// number of positive pivots
    pub positive: usize,
    /// number of negative pivots
    pub negative: usize,
    /// number of pivots replaced by dynamic regularization
    pub regularized: usize,
    /// static regularization applied to the diagonal
    pub static_regularizer: T,
    /// infinity norm of the residual after iterative refinement
    pub refine_error: T,
    /// `false` if the most recent factorization was rejected
    pub valid: bool,
    /// number of factorizations performed
    pub factorizations: u32,
    /// number of linear solves performed
    pub solves: u32,
}

impl<T> Default for KKTDiagnostics<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self {
            rcond: T::nan(),
            positive: 0,
            negative: 0,
            regularized: 0,
            static_regularizer: T::zero(),
            refine_error: T::nan(),
            valid: false,
            factorizations: 0,
            solves: 0,
        }
    }
}

pub trait KKTSolver<T: FloatT> {
    /// Overwrite the primal block of the KKT matrix and refactor.
    fn update(&mut self, H: &Matrix<T>, settings: &CoreSettings<T>) -> bool;
    fn setrhs(&mut self, x: &[T], v: &[T]);
    fn solve(
        &mut self,
        x: Option<&mut [T]>,
        v: Option<&mut [T]>,
        settings: &CoreSettings<T>,
    ) -> bool;
    fn diagnostics(&self) -> &KKTDiagnostics<T>;
    fn reset_diagnostics(&mut self);
}
