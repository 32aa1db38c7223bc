#![allow(non_snake_case)]
use crate::algebra::*;
use derive_builder::Builder;

/// Required settings for [`LDLFactorization`](LDLFactorization)

#[derive(Builder, Debug, Clone)]
pub struct LDLSettings<T: FloatT> {
    /// expected signs of the pivots.  Required for dynamic regularization.
    #[builder(default = "None", setter(strip_option))]
    pub Dsigns: Option<Vec<i8>>,
    #[builder(default = "true")]
    pub regularize_enable: bool,
    #[builder(default = "(1e-12).as_T()")]
    pub regularize_eps: T,
    #[builder(default = "(1e-7).as_T()")]
    pub regularize_delta: T,
}

impl<T> Default for LDLSettings<T>
where
    T: FloatT,
{
    fn default() -> LDLSettings<T> {
        LDLSettingsBuilder::<T>::default().build().unwrap()
    }
}

/// Performs dense $LDL^T$ factorization of a symmetric quasidefinite matrix
///
/// Only the upper triangle of the input matrix is read.  Pivots whose sign
/// disagrees with `Dsigns`, or whose magnitude falls below `regularize_eps`,
/// are replaced with `regularize_delta` in the expected direction.

#[derive(Debug)]
pub struct LDLFactorization<T: FloatT = f64> {
    n: usize,
    // strictly lower triangular part of the unit factor L
    pub L: Matrix<T>,
    // D and its inverse for A = LDL^T
    pub D: Vec<T>,
    pub Dinv: Vec<T>,
    Dsigns: Vec<i8>,
    settings: LDLSettings<T>,
    regularize_count: usize,
    positive_inertia: usize,
    fwork: Vec<T>,
}

impl<T> LDLFactorization<T>
where
    T: FloatT,
{
    pub fn new(n: usize, opts: Option<LDLSettings<T>>) -> Self {
        let settings = opts.unwrap_or_default();
        let Dsigns = match settings.Dsigns {
            Some(ref ds) => {
                assert_eq!(ds.len(), n);
                ds.clone()
            }
            None => vec![1_i8; n],
        };

        Self {
            n,
            L: Matrix::zeros((n, n)),
            D: vec![T::zero(); n],
            Dinv: vec![T::zero(); n],
            Dsigns,
            settings,
            regularize_count: 0,
            positive_inertia: 0,
            fwork: vec![T::zero(); n],
        }
    }

    pub fn positive_inertia(&self) -> usize {
        self.positive_inertia
    }

    pub fn negative_inertia(&self) -> usize {
        self.n - self.positive_inertia
    }

    pub fn regularize_count(&self) -> usize {
        self.regularize_count
    }

    /// Estimate of the reciprocal condition number, min|D| / max|D|.
    pub fn rcond(&self) -> T {
        if self.n == 0 {
            return T::one();
        }
        let dmax = self.D.iter().fold(T::zero(), |acc, &d| T::max(acc, d.abs()));
        let dmin = self.D.iter().fold(T::infinity(), |acc, &d| T::min(acc, d.abs()));
        if dmax == T::zero() {
            T::zero()
        } else {
            dmin / dmax
        }
    }

    /// Numeric factorization of `A`, which must be `n x n`.
    pub fn factor(&mut self, A: &Matrix<T>) -> Result<(), DenseFactorizationError> {
        if A.m != self.n || A.n != self.n {
            return Err(DenseFactorizationError::IncompatibleDimension);
        }

        let n = self.n;
        let (eps, delta) = (self.settings.regularize_eps, self.settings.regularize_delta);
        let y = &mut self.fwork;
        let L = &mut self.L;
        let D = &mut self.D;
        let Dinv = &mut self.Dinv;

        self.regularize_count = 0;
        self.positive_inertia = 0;
        L.data_mut().set(T::zero());

        for k in 0..n {
            // y = L(0:k,0:k) \ A(0:k,k), column oriented
            y[0..k].copy_from(&A.col_slice(k)[0..k]);
            D[k] = A[(k, k)];

            for c in 0..k {
                let yc = y[c];
                let Lcol = &L.col_slice(c)[(c + 1)..k];
                for (yr, &lrc) in y[(c + 1)..k].iter_mut().zip(Lcol) {
                    *yr -= lrc * yc;
                }
                let lkc = yc * Dinv[c];
                L[(k, c)] = lkc;
                D[k] -= yc * lkc;
            }

            // apply dynamic regularization
            if self.settings.regularize_enable {
                let sign: T = (self.Dsigns[k] as f64).as_T();
                if D[k] * sign < eps {
                    D[k] = delta * sign;
                    self.regularize_count += 1;
                }
            }

            if D[k] == T::zero() || !D[k].is_finite() {
                return Err(DenseFactorizationError::ZeroPivot(k));
            }
            if D[k] > T::zero() {
                self.positive_inertia += 1;
            }
            Dinv[k] = T::recip(D[k]);
        }
        Ok(())
    }

    /// Solves Ax = b using the LDL factors of A.
    /// Solves in place (x replaces b)
    pub fn solve(&self, b: &mut [T]) {
        assert_eq!(b.len(), self.n);
        let n = self.n;
        let L = &self.L;

        // forward substitution with unit L
        for c in 0..n {
            let bc = b[c];
            if bc == T::zero() {
                continue;
            }
            for (br, &lrc) in b[(c + 1)..].iter_mut().zip(&L.col_slice(c)[(c + 1)..]) {
                *br -= lrc * bc;
            }
        }

        b.hadamard(&self.Dinv);

        // backward substitution with unit L^T
        for c in (0..n).rev() {
            let s = L.col_slice(c)[(c + 1)..].dot(&b[(c + 1)..]);
            b[c] -= s;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_matrix_4x4() -> Matrix<f64> {
        Matrix::from(&[
            [8., -3., 2., 0.],
            [-3., 8., -1., 0.],
            [2., -1., 8., -1.],
            [0., 0., -1., 1.],
        ])
    }

    #[test]
    fn test_ldl_solve() {
        let A = test_matrix_4x4();
        let mut ldl = LDLFactorization::new(4, None);
        ldl.factor(&A).unwrap();

        let x = vec![1., -2., 3., -4.];
        let mut b = vec![0.; 4];
        A.gemv(&mut b, &x, 1.0, 0.0);
        ldl.solve(&mut b);

        assert!(b.norm_inf_diff(&x) <= 1e-10);
        assert_eq!(ldl.positive_inertia(), 4);
        assert_eq!(ldl.regularize_count(), 0);
    }

    #[test]
    fn test_ldl_single_precision() {
        let A = Matrix::<f32>::from(&[[4., 1.], [1., 3.]]);
        let mut ldl = LDLFactorization::<f32>::new(2, None);
        ldl.factor(&A).unwrap();

        let mut b = vec![5.0_f32, 4.0];
        ldl.solve(&mut b);
        assert!(b.norm_inf_diff(&[1., 1.]) <= 1e-5);
    }

    #[test]
    fn test_ldl_quasidefinite() {
        // [I  a; a' 0] with a = [1,1]
        let A = Matrix::from(&[[1., 0., 1.], [0., 1., 1.], [1., 1., 0.]]);
        let settings = LDLSettingsBuilder::default()
            .Dsigns(vec![1, 1, -1])
            .build()
            .unwrap();
        let mut ldl = LDLFactorization::new(3, Some(settings));
        ldl.factor(&A).unwrap();

        assert_eq!(ldl.positive_inertia(), 2);
        assert_eq!(ldl.negative_inertia(), 1);

        let mut b = vec![0., 0., 1.];
        ldl.solve(&mut b);
        assert!(b.norm_inf_diff(&[0.5, 0.5, -0.5]) <= 1e-12);
    }

    #[test]
    fn test_ldl_dynamic_regularization() {
        // singular matrix gets a regularized pivot in place of zero
        let A = Matrix::from(&[[1., 1.], [1., 1.]]);
        let mut ldl = LDLFactorization::new(2, None);
        ldl.factor(&A).unwrap();
        assert_eq!(ldl.regularize_count(), 1);
        assert!(ldl.rcond() < 1e-6);

        // ...and fails outright without it
        let settings = LDLSettingsBuilder::default()
            .regularize_enable(false)
            .build()
            .unwrap();
        let mut ldl = LDLFactorization::new(2, Some(settings));
        assert_eq!(
            ldl.factor(&A),
            Err(DenseFactorizationError::ZeroPivot(1))
        );
    }

    #[test]
    fn test_ldl_bad_dimension() {
        let mut ldl = LDLFactorization::<f64>::new(3, None);
        let A = Matrix::identity(2);
        assert!(ldl.factor(&A).is_err());
    }
}
