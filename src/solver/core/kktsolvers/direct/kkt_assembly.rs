#![allow(non_snake_case)]

use crate::algebra::*;

// Dense KKT matrix of the form
//
//   [ H   A' ]
//   [ A   0  ]
//
// with H (n x n) and A (p x n).  Both triangles are populated so
// that the matrix can be used directly in residual computations,
// although the factorization reads only the upper triangle.

pub(crate) fn assemble_kkt_matrix<T: FloatT>(A: &Matrix<T>, n: usize) -> Matrix<T> {
    let p = A.m;
    assert_eq!(A.n, n);
    let mut KKT = Matrix::zeros((n + p, n + p));

    for col in 0..n {
        for (row, &a) in A.col_slice(col).iter().enumerate() {
            KKT[(n + row, col)] = a;
            KKT[(col, n + row)] = a;
        }
    }
    KKT
}

// overwrite the leading n x n block with H
pub(crate) fn update_primal_block<T: FloatT>(KKT: &mut Matrix<T>, H: &Matrix<T>) {
    let n = H.n;
    assert!(H.m == n && KKT.m >= n);
    for col in 0..n {
        KKT.col_slice_mut(col)[0..n].copy_from(H.col_slice(col));
    }
}

// shift the diagonal by `eps` in the direction of the expected pivot signs
pub(crate) fn offset_diagonal<T: FloatT>(KKT: &mut Matrix<T>, eps: T, signs: &[i8]) {
    for (i, &sign) in signs.iter().enumerate() {
        if sign > 0 {
            KKT[(i, i)] += eps;
        } else {
            KKT[(i, i)] -= eps;
        }
    }
}

pub(crate) fn fill_signs(signs: &mut [i8], n: usize) {
    signs.fill(1);
    signs[n..].fill(-1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_kkt() {
        let A = Matrix::from(&[[1., 2.]]);
        let H = Matrix::from(&[[4., 1.], [1., 3.]]);
        let mut KKT = assemble_kkt_matrix(&A, 2);
        update_primal_block(&mut KKT, &H);

        let expected = Matrix::from(&[[4., 1., 1.], [1., 3., 2.], [1., 2., 0.]]);
        assert_eq!(KKT, expected);
        assert!(KKT.is_symmetric());

        let mut signs = vec![0i8; 3];
        fill_signs(&mut signs, 2);
        assert_eq!(signs, vec![1, 1, -1]);

        offset_diagonal(&mut KKT, 0.5, &signs);
        assert_eq!(KKT[(0, 0)], 4.5);
        assert_eq!(KKT[(2, 2)], -0.5);
    }
}
