#![allow(non_snake_case)]
use crate::algebra::*;

/// Householder QR factorization with column pivoting, $AP = QR$.
///
/// Columns are pivoted greedily by largest remaining norm, so the
/// diagonal of R is non-increasing in magnitude and the numerical rank
/// of A can be read from it.  R is kept in the upper triangle of the
/// internal storage; the Householder vectors are not retained since
/// only R and the column permutation are used.

#[derive(Debug, Clone)]
pub struct QRDecomposition<T = f64> {
    m: usize,
    n: usize,
    R: Matrix<T>,
    perm: Vec<usize>,
}

impl<T> QRDecomposition<T>
where
    T: FloatT,
{
    pub fn new(A: &Matrix<T>) -> Self {
        let (m, n) = (A.m, A.n);
        let mut R = A.clone();
        let mut perm: Vec<usize> = (0..n).collect();
        let mut v = vec![T::zero(); m];
        let mut colnorms = vec![T::zero(); n];

        for k in 0..usize::min(m, n) {
            // squared norms of the trailing part of the remaining columns
            for j in k..n {
                colnorms[j] = R.col_slice(j)[k..].sumsq();
            }

            // pivot column with the largest trailing norm into place
            let mut p = k;
            for j in (k + 1)..n {
                if colnorms[j] > colnorms[p] {
                    p = j;
                }
            }
            if p != k {
                swap_columns(&mut R, k, p);
                perm.swap(k, p);
            }

            // householder reflector annihilating R[k+1..m, k]
            let x = &R.col_slice(k)[k..];
            let normx = x.norm();
            if normx == T::zero() {
                continue;
            }
            let α = if x[0] >= T::zero() { -normx } else { normx };
            let vk = &mut v[k..m];
            vk.copy_from(x);
            vk[0] -= α;
            let vnorm2 = vk.sumsq();

            let col = R.col_slice_mut(k);
            col[k] = α;
            col[(k + 1)..].set(T::zero());

            if vnorm2 == T::zero() {
                continue;
            }
            let two: T = (2.0).as_T();
            let τ = two / vnorm2;

            for j in (k + 1)..n {
                let colj = &mut R.col_slice_mut(j)[k..];
                let w = τ * vk.dot(colj);
                colj.axpby(-w, vk, T::one());
            }
        }

        Self { m, n, R, perm }
    }

    /// column permutation, i.e. column `k` of AP is column `perm[k]` of A
    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }

    /// Diagonal entry `k` of the triangular factor
    pub fn rdiag(&self, k: usize) -> T {
        self.R[(k, k)]
    }

    /// Numerical rank: the number of leading diagonal entries of R
    /// with magnitude above `rtol * |R[0,0]|`.
    pub fn rank(&self, rtol: T) -> usize {
        let kmax = usize::min(self.m, self.n);
        if kmax == 0 {
            return 0;
        }
        let r00 = T::abs(self.rdiag(0));
        if r00 == T::zero() {
            return 0;
        }
        (0..kmax)
            .take_while(|&k| T::abs(self.rdiag(k)) > rtol * r00)
            .count()
    }

    /// Coefficients expressing the trailing `n - rank` pivoted columns as
    /// combinations of the leading `rank` pivoted columns, `W = R11 \ R12`.
    ///
    /// Column `j` of the returned `rank x (n - rank)` matrix holds the
    /// weights for pivoted column `rank + j`.
    pub fn dependent_coefficients(&self, rank: usize) -> Matrix<T> {
        assert!(rank <= usize::min(self.m, self.n));
        let nd = self.n - rank;
        let mut W = Matrix::zeros((rank, nd));

        for j in 0..nd {
            let w = W.col_slice_mut(j);
            w.copy_from(&self.R.col_slice(rank + j)[0..rank]);

            // back substitution with R11
            for i in (0..rank).rev() {
                let mut s = w[i];
                for l in (i + 1)..rank {
                    s -= self.R[(i, l)] * w[l];
                }
                w[i] = s / self.R[(i, i)];
            }
        }
        W
    }
}

fn swap_columns<T: FloatT>(A: &mut Matrix<T>, i: usize, j: usize) {
    if i == j {
        return;
    }
    let m = A.m;
    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
    let (left, right) = A.data_mut().split_at_mut(hi * m);
    left[(lo * m)..(lo + 1) * m].swap_with_slice(&mut right[0..m]);
}
