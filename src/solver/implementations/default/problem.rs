#![allow(non_snake_case)]

use crate::algebra::*;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Error type returned when problem data dimensions are inconsistent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProblemDataError {
    /// Q is not square
    #[error("Q must be square, got {m}x{n}")]
    QNotSquare { m: usize, n: usize },
    /// Q does not match the length of c
    #[error("Q has size {found} but c has length {expected}")]
    QSize { expected: usize, found: usize },
    /// A has the wrong number of columns
    #[error("A has {found} columns, expected {expected}")]
    AColumns { expected: usize, found: usize },
    /// b does not match the rows of A
    #[error("b has length {found}, expected {expected}")]
    BLength { expected: usize, found: usize },
    /// G has the wrong number of columns
    #[error("G has {found} columns, expected {expected}")]
    GColumns { expected: usize, found: usize },
    /// h does not match the rows of G
    #[error("h has length {found}, expected {expected}")]
    HLength { expected: usize, found: usize },
    /// An operand contains NaN or infinite entries
    #[error("{0} contains non-finite values")]
    NonFinite(&'static str),
}

/// A convex quadratic program
///
/// ```text
/// minimize    ½xᵀQx + cᵀx
/// subject to  Ax = b
///             Gx ≤ h
/// ```
///
/// with `Q` symmetric positive semidefinite, or absent for a linear
/// program.  Use [`QuadraticProgram::new`] or [`QuadraticProgram::linear`]
/// to construct a problem with checked dimensions.

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct QuadraticProgram<T = f64> {
    /// quadratic cost term (n x n), if any
    pub Q: Option<Matrix<T>>,
    /// linear cost term (n)
    pub c: Vec<T>,
    /// equality constraint matrix (p x n)
    pub A: Matrix<T>,
    /// equality right hand side (p)
    pub b: Vec<T>,
    /// inequality constraint matrix (m x n)
    pub G: Matrix<T>,
    /// inequality right hand side (m)
    pub h: Vec<T>,
}

impl<T> QuadraticProgram<T>
where
    T: FloatT,
{
    pub fn new(
        Q: Option<Matrix<T>>,
        c: Vec<T>,
        A: Matrix<T>,
        b: Vec<T>,
        G: Matrix<T>,
        h: Vec<T>,
    ) -> Result<Self, ProblemDataError> {
        let n = c.len();

        if let Some(Q) = &Q {
            if Q.m != Q.n {
                return Err(ProblemDataError::QNotSquare { m: Q.m, n: Q.n });
            }
            if Q.n != n {
                return Err(ProblemDataError::QSize {
                    expected: n,
                    found: Q.n,
                });
            }
            if !Q.is_finite() {
                return Err(ProblemDataError::NonFinite("Q"));
            }
        }
        if A.n != n {
            return Err(ProblemDataError::AColumns {
                expected: n,
                found: A.n,
            });
        }
        if b.len() != A.m {
            return Err(ProblemDataError::BLength {
                expected: A.m,
                found: b.len(),
            });
        }
        if G.n != n {
            return Err(ProblemDataError::GColumns {
                expected: n,
                found: G.n,
            });
        }
        if h.len() != G.m {
            return Err(ProblemDataError::HLength {
                expected: G.m,
                found: h.len(),
            });
        }

        for (name, ok) in [
            ("c", c.is_finite()),
            ("A", A.is_finite()),
            ("b", b.is_finite()),
            ("G", G.is_finite()),
            ("h", h.is_finite()),
        ] {
            if !ok {
                return Err(ProblemDataError::NonFinite(name));
            }
        }

        Ok(Self { Q, c, A, b, G, h })
    }

    /// Linear program with no quadratic cost term
    pub fn linear(
        c: Vec<T>,
        A: Matrix<T>,
        b: Vec<T>,
        G: Matrix<T>,
        h: Vec<T>,
    ) -> Result<Self, ProblemDataError> {
        Self::new(None, c, A, b, G, h)
    }

    /// number of variables
    pub fn n(&self) -> usize {
        self.c.len()
    }

    /// number of equality constraints
    pub fn p(&self) -> usize {
        self.b.len()
    }

    /// number of inequality constraints
    pub fn m(&self) -> usize {
        self.h.len()
    }

    /// ½xᵀQx + cᵀx
    pub fn objective(&self, x: &[T]) -> T {
        assert_eq!(x.len(), self.n());
        let quad = match &self.Q {
            Some(Q) => Q.quad_form(x, x) / (2.).as_T(),
            None => T::zero(),
        };
        quad + self.c.dot(x)
    }

    /// `true` if ‖Ax − b‖∞ < ε and max(Gx − h) < ε
    pub fn feasible(&self, x: &[T], ε: T) -> bool {
        assert_eq!(x.len(), self.n());

        let mut r = self.b.clone();
        self.A.gemv(&mut r, x, T::one(), -T::one());
        if !(r.norm_inf() < ε) {
            return false;
        }

        let mut s = self.h.clone();
        self.G.gemv(&mut s, x, T::one(), -T::one());
        s.maximum() < ε
    }

    /// Heuristic search for a point with `Gx < h`.
    ///
    /// Solves `Gx = h − t·1` in the least squares (or least norm) sense
    /// for a sequence of margins `t`, alternating between shrinking and
    /// growing values, and returns the first solution that is strictly
    /// feasible for the inequalities.  Equality constraints are ignored.
    pub fn make_strictly_feasible(&self) -> Option<Vec<T>> {
        let (n, m) = (self.n(), self.m());
        if m == 0 {
            return Some(vec![T::zero(); n]);
        }

        let γ: T = (0.3).as_T();
        let ntrials = 100;

        // G'G for overdetermined systems, GG' otherwise
        let overdetermined = m >= n;
        let Gt = self.G.transpose();
        let k = if overdetermined { n } else { m };
        let mut N = Matrix::zeros((k, k));
        for j in 0..k {
            for i in 0..=j {
                let v = if overdetermined {
                    self.G.col_slice(i).dot(self.G.col_slice(j))
                } else {
                    Gt.col_slice(i).dot(Gt.col_slice(j))
                };
                N[(i, j)] = v;
                N[(j, i)] = v;
            }
        }
        let maxdiag = (0..k).fold(T::zero(), |acc, i| T::max(acc, N[(i, i)]));
        let δ = T::epsilon().sqrt() * T::max(T::one(), maxdiag);
        for i in 0..k {
            N[(i, i)] += δ;
        }

        let mut ldl = LDLFactorization::new(k, None);
        ldl.factor(&N).ok()?;

        let mut rhs = vec![T::zero(); m];
        let mut w = vec![T::zero(); k];
        let mut x = vec![T::zero(); n];
        let mut s = vec![T::zero(); m];

        for trial in 0..ntrials {
            let t = if trial % 2 == 0 {
                T::powi(γ, trial / 2)
            } else {
                T::powi(γ, -(trial / 2) - 1)
            };

            rhs.copy_from(&self.h);
            rhs.scalarop(|h| h - t);

            if overdetermined {
                // (G'G + δI) x = G'(h - t1)
                self.G.t().gemv(&mut w, &rhs, T::one(), T::zero());
                ldl.solve(&mut w);
                x.copy_from(&w);
            } else {
                // x = G'(GG' + δI)⁻¹(h - t1)
                w.copy_from(&rhs);
                ldl.solve(&mut w);
                self.G.t().gemv(&mut x, &w, T::one(), T::zero());
            }

            s.copy_from(&self.h);
            self.G.gemv(&mut s, &x, T::one(), -T::one());
            if x.is_finite() && s.maximum() < T::zero() {
                log::trace!("strictly feasible point found with margin {:e}", t);
                return Some(x);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_problem() -> QuadraticProgram<f64> {
        // -1 ≤ x ≤ 1 in two dimensions, x1 + x2 = 1
        let G = Matrix::from(&[[1., 0.], [0., 1.], [-1., 0.], [0., -1.]]);
        let A = Matrix::from(&[[1., 1.]]);
        QuadraticProgram::linear(vec![1., 1.], A, vec![1.], G, vec![1.; 4]).unwrap()
    }

    #[test]
    fn test_problem_dimensions() {
        let qp = box_problem();
        assert_eq!((qp.n(), qp.p(), qp.m()), (2, 1, 4));

        let bad = QuadraticProgram::linear(
            vec![1., 1.],
            Matrix::from(&[[1., 1., 1.]]),
            vec![1.],
            Matrix::zeros((0, 2)),
            vec![],
        );
        assert_eq!(
            bad,
            Err(ProblemDataError::AColumns {
                expected: 2,
                found: 3
            })
        );

        let bad = QuadraticProgram::new(
            Some(Matrix::zeros((2, 3))),
            vec![1., 1.],
            Matrix::zeros((0, 2)),
            vec![],
            Matrix::zeros((0, 2)),
            vec![],
        );
        assert_eq!(bad, Err(ProblemDataError::QNotSquare { m: 2, n: 3 }));
    }

    #[test]
    fn test_feasible_and_objective() {
        let qp = box_problem();
        assert!(qp.feasible(&[0.5, 0.5], 1e-9));
        assert!(!qp.feasible(&[0.5, 0.6], 1e-9));
        assert!(!qp.feasible(&[2.0, -1.0], 1e-9));
        assert_eq!(qp.objective(&[0.5, 0.5]), 1.0);
    }

    #[test]
    fn test_make_strictly_feasible() {
        let qp = box_problem();
        let x = qp.make_strictly_feasible().unwrap();
        let mut s = qp.h.clone();
        qp.G.gemv(&mut s, &x, 1.0, -1.0);
        assert!(s.maximum() < 0.0);

        // underdetermined: a single halfspace in three dimensions
        let G = Matrix::from(&[[1., 2., -1.]]);
        let qp = QuadraticProgram::linear(
            vec![0.; 3],
            Matrix::zeros((0, 3)),
            vec![],
            G.clone(),
            vec![-4.],
        )
        .unwrap();
        let x = qp.make_strictly_feasible().unwrap();
        let mut s = vec![-4.];
        G.gemv(&mut s, &x, 1.0, -1.0);
        assert!(s[0] < 0.0);
    }

    #[test]
    fn test_no_strictly_feasible_point() {
        // x ≤ 0 and -x ≤ 0 has no interior
        let G = Matrix::from(&[[1.], [-1.]]);
        let qp = QuadraticProgram::linear(
            vec![1.],
            Matrix::zeros((0, 1)),
            vec![],
            G,
            vec![0., 0.],
        )
        .unwrap();
        assert!(qp.make_strictly_feasible().is_none());
    }
}
