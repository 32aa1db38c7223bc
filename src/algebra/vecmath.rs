use super::{AsFloatT, FloatT, ScalarMath, VectorMath};
use itertools::izip;
use std::iter::zip;

impl<T: FloatT> VectorMath for [T] {
    type T = T;
    fn copy_from(&mut self, src: &[T]) -> &mut Self {
        self.copy_from_slice(src);
        self
    }

    fn select(&self, index: &[bool]) -> Vec<T> {
        assert_eq!(self.len(), index.len());
        zip(self, index)
            .filter(|(_x, &b)| b)
            .map(|(&x, _b)| x)
            .collect()
    }

    fn scalarop(&mut self, op: impl Fn(T) -> T) -> &mut Self {
        for x in &mut *self {
            *x = op(*x);
        }
        self
    }

    fn scalarop_from(&mut self, op: impl Fn(T) -> T, v: &[T]) -> &mut Self {
        for (x, v) in zip(&mut *self, v) {
            *x = op(*v);
        }
        self
    }

    fn set(&mut self, c: T) -> &mut Self {
        self.scalarop(|_x| c)
    }

    fn scale(&mut self, c: T) -> &mut Self {
        self.scalarop(|x| x * c)
    }

    fn recip(&mut self) -> &mut Self {
        self.scalarop(T::recip)
    }

    fn rsqrt(&mut self) -> &mut Self {
        self.scalarop(|x| T::recip(T::sqrt(x)))
    }

    fn negate(&mut self) -> &mut Self {
        self.scalarop(|x| -x)
    }

    fn hadamard(&mut self, y: &[T]) -> &mut Self {
        zip(&mut *self, y).for_each(|(x, y)| *x *= *y);
        self
    }

    fn clip(&mut self, min_thresh: T, max_thresh: T) -> &mut Self {
        self.scalarop(|x| x.clip(min_thresh, max_thresh))
    }

    fn dot(&self, y: &[T]) -> T {
        assert_eq!(self.len(), y.len());
        let iter = zip(self, y);
        let op = |(&x, &y)| x * y;
        accumulate_pairwise(iter, op)
    }

    fn dot_shifted(z: &[T], s: &[T], dz: &[T], ds: &[T], α: T) -> T {
        assert_eq!(z.len(), s.len());
        assert_eq!(z.len(), dz.len());
        assert_eq!(s.len(), ds.len());

        let iter = izip!(s, ds, z, dz);
        let op = |(&s, &ds, &z, &dz)| {
            let si = s + α * ds;
            let zi = z + α * dz;
            si * zi
        };
        accumulate_pairwise(iter, op)
    }

    fn sum(&self) -> T {
        accumulate_pairwise(self.iter(), |&x| x)
    }

    fn sumsq(&self) -> T {
        self.dot(self)
    }

    // 2-norm
    fn norm(&self) -> T {
        T::sqrt(self.sumsq())
    }

    //two-norm of elementwise product self.*v
    fn norm_scaled(&self, v: &[T]) -> T {
        assert_eq!(self.len(), v.len());

        let iter = zip(self, v);
        let op = |(&x, &y)| {
            let prod = x * y;
            prod * prod
        };

        let total = accumulate_pairwise(iter, op);
        T::sqrt(total)
    }

    // NaN propagates so that divergence is never masked
    fn norm_inf(&self) -> T {
        let mut out = T::zero();
        for v in self.iter().map(|v| v.abs()) {
            if v.is_nan() {
                return T::nan();
            }
            out = if v > out { v } else { out };
        }
        out
    }

    fn norm_inf_scaled(&self, v: &[T]) -> T {
        assert_eq!(self.len(), v.len());
        let mut out = T::zero();
        for (&x, &y) in zip(self, v) {
            let p = T::abs(x * y);
            if p.is_nan() {
                return T::nan();
            }
            out = T::max(out, p);
        }
        out
    }

    fn norm_inf_diff(&self, b: &[T]) -> T {
        zip(self, b).fold(T::zero(), |acc, (x, y)| T::max(acc, T::abs(*x - *y)))
    }

    fn minimum(&self) -> T {
        self.iter().fold(T::infinity(), |r, &s| T::min(r, s))
    }

    fn maximum(&self) -> T {
        self.iter().fold(-T::infinity(), |r, &s| T::max(r, s))
    }

    fn mean(&self) -> T {
        if self.is_empty() {
            T::zero()
        } else {
            self.sum() / self.len().as_T()
        }
    }

    fn is_finite(&self) -> bool {
        self.iter().all(|&x| T::is_finite(x))
    }

    fn axpby(&mut self, a: T, x: &[T], b: T) -> &mut Self {
        assert_eq!(self.len(), x.len());

        zip(&mut *self, x).for_each(|(y, x)| *y = a * (*x) + b * (*y));
        self
    }

    fn waxpby(&mut self, a: T, x: &[T], b: T, y: &[T]) -> &mut Self {
        assert_eq!(self.len(), x.len());
        assert_eq!(self.len(), y.len());

        for (w, (x, y)) in zip(&mut *self, zip(x, y)) {
            *w = a * (*x) + b * (*y);
        }
        self
    }
}

// ---------------------------------------------------------------------
// pairwise accumulation for sums and dot products

fn accumulate_pairwise<T, I, A, F>(x: I, op: F) -> T
where
    T: FloatT,
    I: IntoIterator<Item = A> + Clone,
    I::IntoIter: ExactSizeIterator,
    F: Fn(A) -> T,
{
    const BASE_CASE_DIM: usize = 16;

    let n = x.clone().into_iter().len();
    return if n == 0 {
        T::zero()
    } else {
        accumulate_pairwise_inner(x, &op, 0, n)
    };

    fn accumulate_pairwise_inner<T, I, A, F>(x: I, op: &F, i1: usize, n: usize) -> T
    where
        T: FloatT,
        I: IntoIterator<Item = A> + Clone,
        I::IntoIter: ExactSizeIterator,
        F: Fn(A) -> T,
    {
        if n < BASE_CASE_DIM {
            x.into_iter()
                .skip(i1)
                .take(n)
                .fold(T::zero(), |acc, x| acc + op(x))
        } else {
            let n2 = n / 2;
            accumulate_pairwise_inner(x.clone(), op, i1, n2)
                + accumulate_pairwise_inner(x, op, i1 + n2, n - n2)
        }
    }
}
