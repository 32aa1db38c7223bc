use crate::algebra::{
    Adjoint, FloatT, Matrix, MatrixFormatError, MatrixShape, ShapedMatrix, VectorMath,
};
use std::ops::{Index, IndexMut};

impl<T> Matrix<T>
where
    T: FloatT,
{
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        let data = vec![T::zero(); m * n];
        Self { m, n, data }
    }

    pub fn identity(n: usize) -> Self {
        let mut mat = Matrix::zeros((n, n));
        mat.set_identity();
        mat
    }

    pub fn set_identity(&mut self) {
        assert!(self.m == self.n);
        self.data.set(T::zero());
        for i in 0..self.n {
            self[(i, i)] = T::one();
        }
    }

    pub fn new_from_slice(size: (usize, usize), src: &[T]) -> Self {
        let (m, n) = size;
        assert!(m * n == src.len());
        Self {
            m,
            n,
            data: src.to_vec(),
        }
    }

    /// Checked construction from data in column-major order.
    pub fn try_new(size: (usize, usize), data: Vec<T>) -> Result<Self, MatrixFormatError> {
        let (m, n) = size;
        if m * n != data.len() {
            return Err(MatrixFormatError::IncompatibleDimension {
                m,
                n,
                len: data.len(),
            });
        }
        Ok(Self { m, n, data })
    }

    /// Construct an `m x n` matrix from `m` rows of equal length `n`.
    ///
    /// An empty slice of rows produces a `0 x n` matrix only through
    /// [`Matrix::zeros`], since the column count cannot be inferred.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, MatrixFormatError> {
        let m = rows.len();
        let n = rows.first().map_or(0, |r| r.len());
        let mut out = Matrix::zeros((m, n));
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(MatrixFormatError::RaggedRows {
                    row: i,
                    len: row.len(),
                    expected: n,
                });
            }
            for (j, &v) in row.iter().enumerate() {
                out[(i, j)] = v;
            }
        }
        Ok(out)
    }

    pub fn copy_from_slice(&mut self, src: &[T]) -> &mut Self {
        self.data.copy_from_slice(src);
        self
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn t(&self) -> Adjoint<'_, Self> {
        Adjoint { src: self }
    }

    pub fn col_slice(&self, col: usize) -> &[T] {
        assert!(col < self.n);
        &self.data[(col * self.m)..(col + 1) * self.m]
    }

    pub fn col_slice_mut(&mut self, col: usize) -> &mut [T] {
        assert!(col < self.n);
        &mut self.data[(col * self.m)..(col + 1) * self.m]
    }

    /// Copy of row `row` as a vector
    pub fn row(&self, row: usize) -> Vec<T> {
        assert!(row < self.m);
        (0..self.n).map(|j| self[(row, j)]).collect()
    }

    /// New matrix containing only the rows flagged in `keep`
    pub fn select_rows(&self, keep: &[bool]) -> Self {
        assert_eq!(keep.len(), self.m);
        let rows: Vec<usize> = (0..self.m).filter(|&i| keep[i]).collect();
        let mut out = Matrix::zeros((rows.len(), self.n));
        for j in 0..self.n {
            for (inew, &i) in rows.iter().enumerate() {
                out[(inew, j)] = self[(i, j)];
            }
        }
        out
    }

    /// Dense transpose as a new matrix
    pub fn transpose(&self) -> Self {
        let mut out = Matrix::zeros((self.n, self.m));
        for j in 0..self.n {
            for i in 0..self.m {
                out[(j, i)] = self[(i, j)];
            }
        }
        out
    }

    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        for c in 0..self.n {
            for r in (c + 1)..self.m {
                if self[(r, c)] != self[(c, r)] {
                    return false;
                }
            }
        }
        true
    }

    pub fn is_finite(&self) -> bool {
        self.data.is_finite()
    }

    #[inline]
    fn index_linear(&self, idx: (usize, usize)) -> usize {
        debug_assert!(idx.0 < self.m && idx.1 < self.n);
        idx.0 + self.m * idx.1
    }
}

impl<T, const M: usize, const N: usize> From<&[[T; N]; M]> for Matrix<T>
where
    T: FloatT,
{
    fn from(rows: &[[T; N]; M]) -> Self {
        let mut out = Matrix::zeros((M, N));
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                out[(i, j)] = v;
            }
        }
        out
    }
}

impl<T> Index<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        &self.data[self.index_linear(idx)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
        let lidx = self.index_linear(idx);
        &mut self.data[lidx]
    }
}

impl<T> Index<(usize, usize)> for Adjoint<'_, Matrix<T>>
where
    T: FloatT,
{
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        &self.src[(idx.1, idx.0)]
    }
}

impl<T> ShapedMatrix for Matrix<T>
where
    T: FloatT,
{
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
    fn shape(&self) -> MatrixShape {
        MatrixShape::N
    }
}

impl<T> ShapedMatrix for Adjoint<'_, Matrix<T>>
where
    T: FloatT,
{
    fn nrows(&self) -> usize {
        self.src.n
    }
    fn ncols(&self) -> usize {
        self.src.m
    }
    fn shape(&self) -> MatrixShape {
        MatrixShape::T
    }
}

impl<T> std::fmt::Display for Matrix<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f)?;
        for i in 0..self.nrows() {
            write!(f, "[ ")?;
            for j in 0..self.ncols() {
                write!(f, " {:?}", self[(i, j)])?;
            }
            writeln!(f, "]")?;
        }
        writeln!(f)?;
        Ok(())
    }
}
