//! Dense complex matrices.
//!
//! [`Matrix`] is a value type over an owned `Array2<Complex64>`: cloning
//! copies the buffer, nothing is shared between two matrix variables. All
//! arithmetic returns a new matrix and reports shape problems as
//! [`MatrixError`] instead of producing a wrongly sized result.

use crate::core::complex::ONE;
use crate::core::errors::MatrixError;
use nalgebra::DMatrix;
use ndarray::{Array1, Array2, Axis};
use num_complex::Complex64;
use std::fmt;
use std::ops::Index;

#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: Array2<Complex64>,
}

impl Matrix {
    /// Creates a `rows x cols` matrix seeded as the identity: ones on the
    /// main diagonal, zeros elsewhere.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut data = Array2::<Complex64>::zeros((rows, cols));
        for i in 0..rows.min(cols) {
            data[[i, i]] = ONE;
        }
        Self { data }
    }

    /// Square identity of size `n`.
    pub fn identity(n: usize) -> Self {
        Self::new(n, n)
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Builds a matrix from row-major values.
    pub fn from_shape_vec(
        rows: usize,
        cols: usize,
        values: Vec<Complex64>,
    ) -> Result<Self, MatrixError> {
        let len = values.len();
        Array2::from_shape_vec((rows, cols), values)
            .map(Self::from)
            .map_err(|_| MatrixError::DimensionMismatch {
                op: "from_shape_vec",
                left: (rows, cols),
                right: (len, 1),
            })
    }

    /// Builds an `n x 1` column vector.
    pub fn column_vector(values: Vec<Complex64>) -> Self {
        Self {
            data: Array1::from(values).insert_axis(Axis(1)),
        }
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    pub fn as_array(&self) -> &Array2<Complex64> {
        &self.data
    }

    pub fn into_array(self) -> Array2<Complex64> {
        self.data
    }

    fn check_index(&self, row: usize, col: usize) -> Result<(), MatrixError> {
        let (rows, cols) = self.dim();
        if row >= rows || col >= cols {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }
        Ok(())
    }

    /// Reads the element at `(row, col)` (0-based).
    pub fn get(&self, row: usize, col: usize) -> Result<Complex64, MatrixError> {
        self.check_index(row, col)?;
        Ok(self.data[[row, col]])
    }

    /// Writes the element at `(row, col)` (0-based).
    pub fn set(&mut self, row: usize, col: usize, value: Complex64) -> Result<(), MatrixError> {
        self.check_index(row, col)?;
        self.data[[row, col]] = value;
        Ok(())
    }

    pub fn transpose(&self) -> Matrix {
        Self {
            data: self.data.t().to_owned(),
        }
    }

    /// Conjugate transpose, U†.
    pub fn adjoint(&self) -> Matrix {
        Self {
            data: self.data.t().mapv(|x| x.conj()),
        }
    }

    pub fn scale(&self, factor: Complex64) -> Matrix {
        Self {
            data: self.data.mapv(|x| x * factor),
        }
    }

    fn check_same_shape(&self, other: &Matrix, op: &'static str) -> Result<(), MatrixError> {
        if self.dim() != other.dim() {
            return Err(MatrixError::DimensionMismatch {
                op,
                left: self.dim(),
                right: other.dim(),
            });
        }
        Ok(())
    }

    /// Elementwise sum. Both operands must have identical dimensions.
    pub fn checked_add(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        self.check_same_shape(other, "add")?;
        Ok(Self {
            data: &self.data + &other.data,
        })
    }

    /// Elementwise difference. Both operands must have identical dimensions.
    pub fn checked_sub(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        self.check_same_shape(other, "sub")?;
        Ok(Self {
            data: &self.data - &other.data,
        })
    }

    /// Matrix product `self * other`; requires `self.cols() == other.rows()`.
    pub fn checked_mul(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols() != other.rows() {
            return Err(MatrixError::DimensionMismatch {
                op: "mul",
                left: self.dim(),
                right: other.dim(),
            });
        }
        Ok(Self {
            data: self.data.dot(&other.data),
        })
    }

    /// Kronecker product `self ⊗ other`.
    ///
    /// For `self` of size `(m, n)` and `other` of size `(p, q)` the result is
    /// `(m*p, n*q)`, with element `(i, j)` of `self` scaling the whole
    /// `other` block at rows `i*p..(i+1)*p`, columns `j*q..(j+1)*q`. The
    /// left operand ends up in the most significant part of the index.
    pub fn tensor_product(&self, other: &Matrix) -> Matrix {
        let (m, n) = self.dim();
        let (p, q) = other.dim();
        let a = &self.data;
        let b = &other.data;

        Self {
            data: Array2::from_shape_fn((m * p, n * q), |(r, c)| {
                a[[r / p, c / q]] * b[[r % p, c % q]]
            }),
        }
    }

    /// Copy of the matrix with `row` and `col` removed.
    pub fn minor(&self, row: usize, col: usize) -> Result<Matrix, MatrixError> {
        self.check_index(row, col)?;
        let (rows, cols) = self.dim();
        let src = &self.data;

        Ok(Self {
            data: Array2::from_shape_fn((rows - 1, cols - 1), |(i, j)| {
                let si = if i < row { i } else { i + 1 };
                let sj = if j < col { j } else { j + 1 };
                src[[si, sj]]
            }),
        })
    }

    /// Determinant of a square matrix (LU decomposition through nalgebra).
    pub fn determinant(&self) -> Result<Complex64, MatrixError> {
        let (rows, cols) = self.dim();
        if rows != cols {
            return Err(MatrixError::NotSquare { rows, cols });
        }
        if rows == 0 {
            return Ok(ONE);
        }

        let na_mat = DMatrix::from_fn(rows, cols, |r, c| self.data[[r, c]]);
        Ok(na_mat.determinant())
    }

    /// Elementwise comparison within `tol`. Matrices of different shape are
    /// never equal.
    pub fn approx_eq(&self, other: &Matrix, tol: f64) -> bool {
        self.dim() == other.dim()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).norm() < tol)
    }

    /// Checks `U U† = I` within `tol`.
    pub fn is_unitary(&self, tol: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        let product = self.data.dot(&self.data.t().mapv(|x| x.conj()));
        let eye = Array2::<Complex64>::eye(self.rows());

        product
            .iter()
            .zip(eye.iter())
            .all(|(a, b)| (a - b).norm() < tol)
    }

    /// Iterates over the values of column `col`, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = Complex64> + '_ {
        self.data.column(col).into_iter().copied()
    }

    /// Number of nonzero (beyond `tol`) entries.
    pub fn count_nonzero(&self, tol: f64) -> usize {
        self.data.iter().filter(|z| z.norm() >= tol).count()
    }
}

impl From<Array2<Complex64>> for Matrix {
    fn from(data: Array2<Complex64>) -> Self {
        Self { data }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Complex64;

    fn index(&self, (row, col): (usize, usize)) -> &Complex64 {
        &self.data[[row, col]]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.rows() {
            let cells: Vec<String> = row.iter().map(|z| z.to_string()).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}
