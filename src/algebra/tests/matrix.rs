#![allow(non_snake_case)]
use crate::algebra::*;

fn test_matrix_2x3() -> Matrix<f64> {
    // A =
    //[ 1.0  2.0  3.0]
    //[ 4.0  5.0  6.0]
    Matrix::from(&[[1., 2., 3.], [4., 5., 6.]])
}

#[test]
fn test_from_rows() {
    let A = test_matrix_2x3();
    let B = Matrix::from_rows(&[vec![1., 2., 3.], vec![4., 5., 6.]]).unwrap();
    assert_eq!(A, B);
    assert_eq!(A.data, vec![1., 4., 2., 5., 3., 6.]);

    let bad = Matrix::from_rows(&[vec![1., 2.], vec![3.]]);
    assert!(matches!(bad, Err(MatrixFormatError::RaggedRows { row: 1, .. })));

    assert!(Matrix::try_new((2, 2), vec![1., 2., 3.]).is_err());
}

#[test]
fn test_gemv() {
    let A = test_matrix_2x3();

    let x = vec![1., 2., 3.];
    let mut y = vec![-1., -2.];
    A.gemv(&mut y, &x, 2.0, 3.0);
    assert_eq!(y, [25.0, 58.0]);

    let x = vec![1., 2.];
    let mut y = vec![-1., -2., -3.];
    A.t().gemv(&mut y, &x, 2.0, 3.0);
    assert_eq!(y, [15.0, 18.0, 21.0]);

    // β = 0 overwrites garbage in y
    let mut y = vec![f64::NAN, f64::NAN];
    A.gemv(&mut y, &[1., 0., 0.], 1.0, 0.0);
    assert_eq!(y, [1.0, 4.0]);
}

#[test]
fn test_norms_and_scaling() {
    let mut A = test_matrix_2x3();

    let mut cn = vec![0.; 3];
    A.col_norms(&mut cn);
    assert_eq!(cn, [4., 5., 6.]);

    let mut rn = vec![0.; 2];
    A.row_norms(&mut rn);
    assert_eq!(rn, [3., 6.]);

    A.lrscale(&[2., 0.5], &[1., -1., 0.]);
    assert_eq!(A, Matrix::from(&[[2., -4., 0.], [2., -2.5, 0.]]));
}

#[test]
fn test_select_rows_and_transpose() {
    let A = test_matrix_2x3();
    let B = A.select_rows(&[false, true]);
    assert_eq!(B, Matrix::from(&[[4., 5., 6.]]));
    assert_eq!(A.row(0), vec![1., 2., 3.]);

    let At = A.transpose();
    assert_eq!(At.size(), (3, 2));
    assert_eq!(At[(2, 1)], A.t()[(2, 1)]);
}

#[test]
fn test_quad_form() {
    let Q = Matrix::from(&[[2., 1.], [1., 3.]]);
    assert_eq!(Q.quad_form(&[1., 2.], &[1., 2.]), 18.);
    assert!(Q.is_symmetric());
    assert!(!test_matrix_2x3().is_symmetric());
}
