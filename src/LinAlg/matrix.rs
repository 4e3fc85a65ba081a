//! # Generic Exact Matrix Module
//!
//! ## Aim
//! This module provides a dense 2D matrix over any field-like numeric type with the
//! elementary operations needed for stoichiometric calculations: construction, row and
//! column manipulation, reduction to reduced row echelon form, rank and nullity,
//! determinants and Gauss-Jordan inversion.
//!
//! ## Main Data Structures and Logic
//! - `Matrix<T>`: dense row-major container; row and column counts are always derived
//!   from the backing storage and never stored separately
//! - `MatrixElement`: blanket trait alias over num-traits bounds (`Signed` gives the
//!   four arithmetic operations, zero, one and absolute value; `PartialOrd` gives the
//!   pivot comparison; equality is exact)
//! - `MatrixError`: dimension and invertibility failures
//! - the element accessor takes (column, row) order - x before y - everywhere
//!
//! ## Key Methods
//! - `reduced_row_echelon_form()`: pivot-by-pivot reduction; a pivot column is skipped
//!   when the sum of its entries at or below the pivot row is exactly zero, otherwise
//!   the entry of greatest absolute value is swapped in as the pivot
//! - `rank()` / `nullity()`: derived from the reduction
//! - `inverse()`: Gauss-Jordan elimination run in parallel on a working copy and an
//!   identity matrix
//! - `determinant()`: cofactor expansion along the first row
//!
//! ## Usage
//! ```rust, ignore
//! let m = Matrix::from_vec(vec![vec![2.0, 0.0, 2.0], vec![0.0, 2.0, 1.0]])?;
//! let reduced = m.reduced_row_echelon_form();
//! assert_eq!(m.nullity(), 1);
//! ```
use num_traits::Signed;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};
use thiserror::Error;

/// Field-like element type: closed under +, -, *, /, with additive and multiplicative
/// identities, absolute value and exact equality. Implemented by BigRational and f64
/// among others; the balancing pipeline only ever instantiates the exact rational.
pub trait MatrixElement: Clone + PartialEq + PartialOrd + Signed {}
impl<T: Clone + PartialEq + PartialOrd + Signed> MatrixElement for T {}

/// error types for matrix construction and manipulation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Wrong matrix dimensions: expected length {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("{axis} index {index} out of bounds (length {len})")]
    OutOfBounds {
        axis: &'static str,
        index: usize,
        len: usize,
    },
    #[error("The matrix must have the same length in both directions")]
    NotSquare,
    #[error("The matrix is singular")]
    Singular,
}

/// Dense matrix over a field-like numeric type. Rows are stored as vectors of equal
/// length; the rectangular invariant is checked by every constructor and mutator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    values: Vec<Vec<T>>,
}

impl<T: MatrixElement> Matrix<T> {
    /// Makes a zero-filled matrix with the given number of columns and rows
    pub fn new(col_num: usize, row_num: usize) -> Self {
        let values = (0..row_num)
            .map(|_| (0..col_num).map(|_| T::zero()).collect())
            .collect();
        Matrix { values }
    }

    /// Builds a matrix from a grid of rows, checking that all rows have the same length
    pub fn from_vec(grid: Vec<Vec<T>>) -> Result<Self, MatrixError> {
        if let Some(first) = grid.first() {
            let width = first.len();
            for row in grid.iter().skip(1) {
                if row.len() != width {
                    return Err(MatrixError::DimensionMismatch {
                        expected: width,
                        found: row.len(),
                    });
                }
            }
        }
        Ok(Matrix { values: grid })
    }

    /// Makes an identity matrix of the given size
    pub fn identity(len: usize) -> Self {
        let mut matrix = Matrix::new(len, len);
        for i in 0..len {
            matrix.values[i][i] = T::one();
        }
        matrix
    }

    /// Makes a matrix filled with ones
    pub fn ones(col_num: usize, row_num: usize) -> Self {
        let values = (0..row_num)
            .map(|_| (0..col_num).map(|_| T::one()).collect())
            .collect();
        Matrix { values }
    }

    /// Number of rows, always recomputed from the backing storage
    pub fn row_number(&self) -> usize {
        self.values.len()
    }

    /// Number of columns, always recomputed from the backing storage
    pub fn column_number(&self) -> usize {
        self.values.first().map_or(0, |row| row.len())
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&T> {
        self.values.get(row).and_then(|r| r.get(column))
    }

    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut T> {
        self.values.get_mut(row).and_then(|r| r.get_mut(column))
    }

    /// Gets a row with a certain index as a 1-row matrix
    pub fn get_row(&self, index: usize) -> Result<Matrix<T>, MatrixError> {
        let row = self
            .values
            .get(index)
            .ok_or(MatrixError::OutOfBounds {
                axis: "row",
                index,
                len: self.row_number(),
            })?
            .clone();
        Ok(Matrix { values: vec![row] })
    }

    /// Gets a column with a certain index as a 1-column matrix
    pub fn get_column(&self, index: usize) -> Result<Matrix<T>, MatrixError> {
        if index >= self.column_number() {
            return Err(MatrixError::OutOfBounds {
                axis: "column",
                index,
                len: self.column_number(),
            });
        }
        let values = self
            .values
            .iter()
            .map(|row| vec![row[index].clone()])
            .collect();
        Ok(Matrix { values })
    }

    /// The entries of one column as a plain vector, top to bottom
    pub fn column_values(&self, index: usize) -> Result<Vec<T>, MatrixError> {
        if index >= self.column_number() {
            return Err(MatrixError::OutOfBounds {
                axis: "column",
                index,
                len: self.column_number(),
            });
        }
        Ok(self.values.iter().map(|row| row[index].clone()).collect())
    }

    /// Reduces the matrix to a flat vector, row by row
    pub fn to_flat_vec(&self) -> Vec<T> {
        self.values.iter().flatten().cloned().collect()
    }

    pub fn replace_row(&mut self, index: usize, row: &Matrix<T>) -> Result<(), MatrixError> {
        if row.column_number() != self.column_number() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.column_number(),
                found: row.column_number(),
            });
        }
        if index >= self.row_number() {
            return Err(MatrixError::OutOfBounds {
                axis: "row",
                index,
                len: self.row_number(),
            });
        }
        self.values[index] = row.values[0].clone();
        Ok(())
    }

    pub fn replace_column(&mut self, index: usize, column: &Matrix<T>) -> Result<(), MatrixError> {
        if column.row_number() != self.row_number() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.row_number(),
                found: column.row_number(),
            });
        }
        if index >= self.column_number() {
            return Err(MatrixError::OutOfBounds {
                axis: "column",
                index,
                len: self.column_number(),
            });
        }
        for (row, entry) in self.values.iter_mut().zip(column.values.iter()) {
            row[index] = entry[0].clone();
        }
        Ok(())
    }

    /// Inserts a zero-filled row before the given index
    pub fn add_row(&mut self, index: usize) -> Result<(), MatrixError> {
        if index > self.row_number() {
            return Err(MatrixError::OutOfBounds {
                axis: "row",
                index,
                len: self.row_number(),
            });
        }
        let width = self.column_number();
        self.values
            .insert(index, (0..width).map(|_| T::zero()).collect());
        Ok(())
    }

    /// Inserts a filled row before the given index
    pub fn add_row_from(&mut self, index: usize, row: &Matrix<T>) -> Result<(), MatrixError> {
        self.add_row(index)?;
        self.replace_row(index, row)
    }

    /// Inserts a zero-filled column before the given index
    pub fn add_column(&mut self, index: usize) -> Result<(), MatrixError> {
        if index > self.column_number() {
            return Err(MatrixError::OutOfBounds {
                axis: "column",
                index,
                len: self.column_number(),
            });
        }
        for row in self.values.iter_mut() {
            row.insert(index, T::zero());
        }
        Ok(())
    }

    /// Inserts a filled column before the given index
    pub fn add_column_from(&mut self, index: usize, column: &Matrix<T>) -> Result<(), MatrixError> {
        self.add_column(index)?;
        self.replace_column(index, column)
    }

    pub fn remove_row(&mut self, index: usize) -> Result<(), MatrixError> {
        if index >= self.row_number() {
            return Err(MatrixError::OutOfBounds {
                axis: "row",
                index,
                len: self.row_number(),
            });
        }
        self.values.remove(index);
        Ok(())
    }

    pub fn remove_column(&mut self, index: usize) -> Result<(), MatrixError> {
        if index >= self.column_number() {
            return Err(MatrixError::OutOfBounds {
                axis: "column",
                index,
                len: self.column_number(),
            });
        }
        for row in self.values.iter_mut() {
            row.remove(index);
        }
        Ok(())
    }

    /// Appends the rows of another matrix below this one; both must have the same width
    pub fn append_rows(&mut self, other: &Matrix<T>) -> Result<(), MatrixError> {
        if other.row_number() == 0 {
            return Ok(());
        }
        if self.row_number() > 0 && other.column_number() != self.column_number() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.column_number(),
                found: other.column_number(),
            });
        }
        self.values.extend(other.values.iter().cloned());
        Ok(())
    }

    /// Appends the columns of another matrix to the right of this one; both must have
    /// the same height
    pub fn append_columns(&mut self, other: &Matrix<T>) -> Result<(), MatrixError> {
        if other.row_number() != self.row_number() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.row_number(),
                found: other.row_number(),
            });
        }
        for (row, extra) in self.values.iter_mut().zip(other.values.iter()) {
            row.extend(extra.iter().cloned());
        }
        Ok(())
    }

    /// "Cuts" a submatrix out of the matrix, given its extent and origin
    pub fn submatrix(
        &self,
        col_len: usize,
        row_len: usize,
        col_origin: usize,
        row_origin: usize,
    ) -> Result<Matrix<T>, MatrixError> {
        if col_origin + col_len > self.column_number() {
            return Err(MatrixError::OutOfBounds {
                axis: "column",
                index: col_origin + col_len,
                len: self.column_number(),
            });
        }
        if row_origin + row_len > self.row_number() {
            return Err(MatrixError::OutOfBounds {
                axis: "row",
                index: row_origin + row_len,
                len: self.row_number(),
            });
        }
        let values = self.values[row_origin..row_origin + row_len]
            .iter()
            .map(|row| row[col_origin..col_origin + col_len].to_vec())
            .collect();
        Ok(Matrix { values })
    }

    /// Flips the matrix around its diagonal
    pub fn transpose(&self) -> Matrix<T> {
        let mut result = Matrix::new(self.row_number(), self.column_number());
        for (i, row) in self.values.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                result.values[j][i] = value.clone();
            }
        }
        result
    }

    /// Scales a row by a scalar. Type 1 elementary row operation
    pub fn scale_row(&mut self, scalar: &T, row_index: usize) {
        for value in self.values[row_index].iter_mut() {
            *value = value.clone() * scalar.clone();
        }
    }

    /// Swaps two rows. Type 2 elementary row operation
    pub fn swap_rows(&mut self, row_index_1: usize, row_index_2: usize) {
        if row_index_1 != row_index_2 {
            self.values.swap(row_index_1, row_index_2);
        }
    }

    /// Adds a scaled copy of the source row to the target row. Type 3 elementary row
    /// operation
    pub fn scale_and_add_row(&mut self, scalar: &T, source_row: usize, target_row: usize) {
        let scaled: Vec<T> = self.values[source_row]
            .iter()
            .map(|value| value.clone() * scalar.clone())
            .collect();
        for (value, addend) in self.values[target_row].iter_mut().zip(scaled) {
            *value = value.clone() + addend;
        }
    }

    // Sum of one column's entries at or below the given row. This sum deciding whether
    // a pivot column is skipped is inherited behavior: cancellation between positive
    // and negative entries can zero the sum of a column that is not all zeros.
    fn column_sum_below(&self, column: usize, from_row: usize) -> T {
        self.values[from_row..]
            .iter()
            .fold(T::zero(), |acc, row| acc + row[column].clone())
    }

    // Index of the entry of greatest absolute value in one column, at or below the
    // given row
    fn max_abs_index_below(&self, column: usize, from_row: usize) -> usize {
        let mut max = -T::one();
        let mut max_index = from_row;
        for (i, row) in self.values.iter().enumerate().skip(from_row) {
            let abs = row[column].abs();
            if max < abs {
                max = abs;
                max_index = i;
            }
        }
        max_index
    }

    /// Finds the reduced row echelon form of the matrix using Gauss-Jordan elimination.
    ///
    /// One pivot column is processed at a time, left to right. A column whose entries
    /// at or below the current pivot row sum to exactly zero is skipped; otherwise the
    /// entry of greatest absolute value at or below the pivot row is swapped into the
    /// pivot row, scaled to exactly 1, and used to eliminate the column everywhere
    /// else. The loop ends when either counter reaches its bound.
    pub fn reduced_row_echelon_form(&self) -> Matrix<T> {
        let mut reduced = self.clone();
        reduced.rref_in_place();
        reduced
    }

    fn rref_in_place(&mut self) {
        let mut rows_completed = 0;
        let mut columns_completed = 0;
        while rows_completed < self.row_number() && columns_completed < self.column_number() {
            if self
                .column_sum_below(columns_completed, rows_completed)
                .is_zero()
            {
                columns_completed += 1;
                continue;
            }

            let pivot_index = self.max_abs_index_below(columns_completed, rows_completed);
            self.swap_rows(pivot_index, rows_completed);

            let pivot = self.values[rows_completed][columns_completed].clone();
            self.scale_row(&(T::one() / pivot), rows_completed);

            for i in 0..self.row_number() {
                if i == rows_completed {
                    continue;
                }
                let factor = -self.values[i][columns_completed].clone();
                if factor.is_zero() {
                    continue;
                }
                self.scale_and_add_row(&factor, rows_completed, i);
            }

            rows_completed += 1;
            columns_completed += 1;
        }
    }

    /// The rank of the matrix: the number of nonzero rows left after reduction
    pub fn rank(&self) -> usize {
        self.reduced_row_echelon_form()
            .values
            .iter()
            .filter(|row| row.iter().any(|value| !value.is_zero()))
            .count()
    }

    /// The nullity of the matrix: column count minus rank
    pub fn nullity(&self) -> usize {
        self.column_number() - self.rank()
    }

    /// Finds the determinant by cofactor expansion along the first row
    pub fn determinant(&self) -> Result<T, MatrixError> {
        if self.column_number() != self.row_number() {
            return Err(MatrixError::NotSquare);
        }
        let length = self.row_number();
        if length == 1 {
            return Ok(self.values[0][0].clone());
        }
        if length == 2 {
            return Ok(self.values[0][0].clone() * self.values[1][1].clone()
                - self.values[1][0].clone() * self.values[0][1].clone());
        }

        let mut determinant = T::zero();
        for i in 0..length {
            let mut minor = self.clone();
            minor.remove_row(0)?;
            minor.remove_column(i)?;

            let sign = if i % 2 == 0 { T::one() } else { -T::one() };
            determinant = determinant + self.values[0][i].clone() * sign * minor.determinant()?;
        }
        Ok(determinant)
    }

    pub fn is_invertible(&self) -> bool {
        matches!(self.determinant(), Ok(d) if !d.is_zero())
    }

    /// Finds the inverse of the matrix using Gauss-Jordan elimination: the same pivot
    /// rule as `reduced_row_echelon_form`, with every elementary operation applied in
    /// parallel to an identity matrix. Elimination factors are read before either
    /// matrix is touched. Fails on non-square and singular matrices.
    pub fn inverse(&self) -> Result<Matrix<T>, MatrixError> {
        if self.column_number() != self.row_number() {
            return Err(MatrixError::NotSquare);
        }
        let length = self.row_number();
        let mut work = self.clone();
        let mut inverse = Matrix::identity(length);

        let mut rows_completed = 0;
        let mut columns_completed = 0;
        while rows_completed < length && columns_completed < length {
            if work
                .column_sum_below(columns_completed, rows_completed)
                .is_zero()
            {
                columns_completed += 1;
                continue;
            }

            let pivot_index = work.max_abs_index_below(columns_completed, rows_completed);
            work.swap_rows(pivot_index, rows_completed);
            inverse.swap_rows(pivot_index, rows_completed);

            let scale = T::one() / work.values[rows_completed][columns_completed].clone();
            work.scale_row(&scale, rows_completed);
            inverse.scale_row(&scale, rows_completed);

            for i in 0..length {
                if i == rows_completed {
                    continue;
                }
                let factor = -work.values[i][columns_completed].clone();
                if factor.is_zero() {
                    continue;
                }
                work.scale_and_add_row(&factor, rows_completed, i);
                inverse.scale_and_add_row(&factor, rows_completed, i);
            }

            rows_completed += 1;
            columns_completed += 1;
        }

        if work != Matrix::identity(length) {
            return Err(MatrixError::Singular);
        }
        Ok(inverse)
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    /// Indexing takes (column, row) order
    fn index(&self, (column, row): (usize, usize)) -> &Self::Output {
        &self.values[row][column]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (column, row): (usize, usize)) -> &mut Self::Output {
        &mut self.values[row][column]
    }
}

impl<T: MatrixElement> Mul<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(mut self, scalar: T) -> Matrix<T> {
        for row in self.values.iter_mut() {
            for value in row.iter_mut() {
                *value = value.clone() * scalar.clone();
            }
        }
        self
    }
}

impl<T: MatrixElement> Div<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn div(self, scalar: T) -> Matrix<T> {
        self * (T::one() / scalar)
    }
}

impl<T: MatrixElement> Add for Matrix<T> {
    type Output = Matrix<T>;

    fn add(mut self, other: Matrix<T>) -> Matrix<T> {
        assert_eq!(self.row_number(), other.row_number(), "row count mismatch");
        assert_eq!(
            self.column_number(),
            other.column_number(),
            "column count mismatch"
        );
        for (row, other_row) in self.values.iter_mut().zip(other.values) {
            for (value, addend) in row.iter_mut().zip(other_row) {
                *value = value.clone() + addend;
            }
        }
        self
    }
}

impl<T: MatrixElement> Sub for Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, other: Matrix<T>) -> Matrix<T> {
        self + (-other)
    }
}

impl<T: MatrixElement> Neg for Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self * (-T::one())
    }
}

impl<T: Display> Display for Matrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.values.iter() {
            let line: Vec<String> = row.iter().map(|value| value.to_string()).collect();
            writeln!(f, "{}", line.join("\t"))?;
        }
        Ok(())
    }
}

impl<T: Display> Matrix<T> {
    /// Prints the matrix to stdout as a bordered table
    pub fn pretty_print(&self) {
        let mut table = Table::new();
        for row in self.values.iter() {
            let cells: Vec<Cell> = row.iter().map(|value| Cell::new(&value.to_string())).collect();
            table.add_row(Row::new(cells));
        }
        table.printstd();
    }
}
