#![allow(non_snake_case)]
use super::*;
use crate::algebra::*;

// ---------------
// Data type for default problem presolver
// ---------------

/// Presolver data for the standard solver implementation
///
/// Detects linearly dependent rows of the equality constraints with a
/// rank revealing QR factorization of Aᵀ.  Dependent rows are dropped
/// when their right hand side agrees with the rows they depend on, and
/// flag the problem as infeasible otherwise.

#[derive(Debug)]
pub struct Presolver<T> {
    // vector of length = original RHS.   Entries are false
    // for those rows that should be eliminated before solve
    pub(crate) keep_logical: Vec<bool>,

    // size of original and reduced RHS, respectively
    pub(crate) pfull: usize,
    pub(crate) preduced: usize,

    // largest mismatch found between a dependent row's RHS
    // and the combination of independent rows reproducing it
    pub(crate) max_inconsistency: T,
    pub(crate) infeasible: bool,
}

impl<T> Presolver<T>
where
    T: FloatT,
{
    pub fn new(A: &Matrix<T>, b: &[T], settings: &DefaultSettings<T>) -> Self {
        let pfull = b.len();
        let mut keep_logical = vec![true; pfull];
        let mut max_inconsistency = T::zero();
        let mut infeasible = false;

        if settings.presolve_enable && pfull > 0 {
            let qr = QRDecomposition::new(&A.transpose());
            let rank = qr.rank(settings.presolve_rank_tol);

            if rank < pfull {
                let W = qr.dependent_coefficients(rank);
                let perm = qr.permutation();

                for (k, &j) in perm[rank..].iter().enumerate() {
                    keep_logical[j] = false;

                    // b_j should equal the same combination of the
                    // independent RHS entries as A_j is of their rows
                    let mut bj = T::zero();
                    for (i, &w) in W.col_slice(k).iter().enumerate() {
                        bj += w * b[perm[i]];
                    }
                    let mismatch = T::abs(b[j] - bj);
                    let limit = settings.presolve_consistency_tol * T::max(T::one(), T::abs(b[j]));
                    max_inconsistency = T::max(max_inconsistency, mismatch);

                    if !(mismatch <= limit) {
                        log::debug!(
                            "equality row {} is dependent but inconsistent (mismatch {:e})",
                            j,
                            mismatch
                        );
                        infeasible = true;
                    }
                }
                log::debug!("presolve removed {} dependent equality rows", pfull - rank);
            }
        }

        let preduced = keep_logical.iter().filter(|&&k| k).count();

        Self {
            keep_logical,
            pfull,
            preduced,
            max_inconsistency,
            infeasible,
        }
    }

    pub fn is_reduced(&self) -> bool {
        self.preduced != self.pfull
    }

    pub fn count_reduced(&self) -> usize {
        self.pfull - self.preduced
    }

    pub fn is_infeasible(&self) -> bool {
        self.infeasible
    }

    /// Largest RHS mismatch over the eliminated rows
    pub fn max_inconsistency(&self) -> T {
        self.max_inconsistency
    }

    /// Reduced copies of the equality data with dependent rows removed
    pub(crate) fn presolve(&self, A: &Matrix<T>, b: &[T]) -> (Matrix<T>, Vec<T>) {
        if self.is_reduced() {
            (A.select_rows(&self.keep_logical), b.select(&self.keep_logical))
        } else {
            (A.clone(), b.to_vec())
        }
    }

    /// Expand reduced equality multipliers to the original row count.
    /// Dropped rows receive zero multipliers.
    pub(crate) fn reverse_presolve(&self, v: &mut [T], vreduced: &[T]) {
        assert_eq!(v.len(), self.pfull);
        assert_eq!(vreduced.len(), self.preduced);

        let mut src = vreduced.iter();
        for (vi, &keep) in v.iter_mut().zip(&self.keep_logical) {
            *vi = if keep {
                src.next().copied().unwrap_or_else(T::zero)
            } else {
                T::zero()
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presolve_duplicate_rows() {
        let settings = DefaultSettings::<f64>::default();
        let A = Matrix::from(&[[1., 1., 0.], [0., 1., 1.], [1., 1., 0.]]);
        let b = vec![1., 2., 1.];

        let presolver = Presolver::new(&A, &b, &settings);
        assert!(!presolver.is_infeasible());
        assert!(presolver.is_reduced());
        assert_eq!(presolver.count_reduced(), 1);

        let (Ar, br) = presolver.presolve(&A, &b);
        assert_eq!((Ar.m, Ar.n), (2, 3));
        assert_eq!(br.len(), 2);

        let mut v = vec![f64::NAN; 3];
        presolver.reverse_presolve(&mut v, &[1., 2.]);
        assert_eq!(v.iter().filter(|&&x| x == 0.).count(), 1);
        assert_eq!(v.iter().sum::<f64>(), 3.);
    }

    #[test]
    fn test_presolve_combination_rows() {
        // third row is the sum of the first two
        let settings = DefaultSettings::<f64>::default();
        let A = Matrix::from(&[[1., 0., 1.], [0., 1., 1.], [1., 1., 2.]]);

        let presolver = Presolver::new(&A, &[1., 2., 3.], &settings);
        assert_eq!(presolver.count_reduced(), 1);
        assert!(!presolver.is_infeasible());
        assert!(presolver.max_inconsistency < 1e-12);

        let presolver = Presolver::new(&A, &[1., 2., 4.], &settings);
        assert!(presolver.is_infeasible());
    }

    #[test]
    fn test_presolve_inconsistent() {
        let settings = DefaultSettings::<f64>::default();
        let A = Matrix::from(&[[1., 0.], [1., 0.]]);
        let b = vec![1., 2.];

        let presolver = Presolver::new(&A, &b, &settings);
        assert!(presolver.is_infeasible());
        assert_eq!(presolver.count_reduced(), 1);
    }

    #[test]
    fn test_presolve_disabled() {
        let settings = DefaultSettings::<f64> {
            presolve_enable: false,
            ..DefaultSettings::default()
        };
        let A = Matrix::from(&[[1., 0.], [1., 0.]]);
        let presolver = Presolver::new(&A, &[1., 2.], &settings);
        assert!(!presolver.is_reduced());
        assert!(!presolver.is_infeasible());
    }
}
