use crate::algebra::{Adjoint, FloatT, Matrix, MatrixMath, MatrixVectorMultiply, VectorMath};
use std::iter::zip;

impl<T: FloatT> MatrixVectorMultiply for Matrix<T> {
    type T = T;

    // implements y = αA*x + βy
    fn gemv(&self, y: &mut [T], x: &[T], α: T, β: T) {
        assert!(self.n == x.len() && self.m == y.len());

        if β == T::zero() {
            y.set(T::zero());
        } else {
            y.scale(β);
        }
        for (col, &xj) in x.iter().enumerate() {
            if xj == T::zero() {
                continue;
            }
            let αxj = α * xj;
            for (yi, &aij) in zip(y.iter_mut(), self.col_slice(col)) {
                *yi += αxj * aij;
            }
        }
    }
}

impl<T: FloatT> MatrixVectorMultiply for Adjoint<'_, Matrix<T>> {
    type T = T;

    // implements y = αA'*x + βy
    fn gemv(&self, y: &mut [T], x: &[T], α: T, β: T) {
        let A = self.src;
        assert!(A.m == x.len() && A.n == y.len());

        for (col, yj) in y.iter_mut().enumerate() {
            let ax = α * A.col_slice(col).dot(x);
            *yj = if β == T::zero() { ax } else { β * (*yj) + ax };
        }
    }
}

impl<T: FloatT> MatrixMath for Matrix<T> {
    type T = T;

    fn col_norms(&self, norms: &mut [T]) {
        norms.set(T::zero());
        self.col_norms_no_reset(norms);
    }

    fn col_norms_no_reset(&self, norms: &mut [T]) {
        assert_eq!(norms.len(), self.n);
        for (col, v) in norms.iter_mut().enumerate() {
            *v = T::max(*v, self.col_slice(col).norm_inf());
        }
    }

    fn row_norms(&self, norms: &mut [T]) {
        assert_eq!(norms.len(), self.m);
        norms.set(T::zero());
        for col in 0..self.n {
            for (v, &a) in zip(norms.iter_mut(), self.col_slice(col)) {
                *v = T::max(*v, T::abs(a));
            }
        }
    }

    fn scale(&mut self, c: T) {
        self.data.scale(c);
    }

    fn lscale(&mut self, l: &[T]) {
        assert_eq!(l.len(), self.m);
        for col in 0..self.n {
            self.col_slice_mut(col).hadamard(l);
        }
    }

    fn rscale(&mut self, r: &[T]) {
        assert_eq!(r.len(), self.n);
        for (col, &rc) in r.iter().enumerate() {
            self.col_slice_mut(col).scale(rc);
        }
    }

    fn lrscale(&mut self, l: &[T], r: &[T]) {
        self.lscale(l);
        self.rscale(r);
    }

    fn quad_form(&self, y: &[T], x: &[T]) -> T {
        assert!(self.m == y.len() && self.n == x.len());
        let mut out = T::zero();
        for (col, &xj) in x.iter().enumerate() {
            out += xj * self.col_slice(col).dot(y);
        }
        out
    }
}
