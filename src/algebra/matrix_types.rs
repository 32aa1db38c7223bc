#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dense matrix in column-major format
///
/// __Example usage__ : To construct the 3 x 3 matrix
/// ```text
/// A = [1.  3.  5.]
///     [2.  0.  6.]
///     [0.  4.  7.]
/// ```
///
/// ```
/// use ipqp::algebra::Matrix;
///
/// let A : Matrix<f64> = Matrix::new_from_slice(
///        (3, 3),                                  // size as tuple
///        &[1., 2., 0., 3., 0., 4., 5., 6., 7.],  // data in column-major order
///     );
///
/// // optional correctness check
/// assert_eq!(A[(2, 1)], 4.);
///
/// ```
/// The same matrix can be written row by row using the
/// `From` implementation on nested arrays:
/// ```
/// use ipqp::algebra::Matrix;
///
/// let A = Matrix::from(&[
///     [1., 3., 5.],
///     [2., 0., 6.],
///     [0., 4., 7.],
/// ]);
/// assert_eq!(A[(1, 2)], 6.);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Matrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// vector of data in column-major order
    pub data: Vec<T>,
}

/// Matrix orientation marker
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum MatrixShape {
    /// Normal matrix orientation
    N,
    /// Transposed matrix orientation
    T,
}

/// Adjoint of a matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Adjoint<'a, M> {
    pub src: &'a M,
}

/// Dimension queries shared by matrices and their adjoints
pub trait ShapedMatrix {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn size(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }
    fn shape(&self) -> MatrixShape;
    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }
}
