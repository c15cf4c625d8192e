/// Fixed-size row-major matrices built from `Vector` rows
use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub};

use crate::error::{Error, Result};
use crate::vector::{format_list, Real, Vector};

pub type Mat33 = Matrix<3, 3>;
pub type Mat44 = Matrix<4, 4>;

/// `M` row vectors of length `N`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<const M: usize, const N: usize> {
    rows: [Vector<N>; M],
}

impl<const M: usize, const N: usize> Matrix<M, N> {
    pub fn new(rows: [[Real; N]; M]) -> Self {
        Self {
            rows: rows.map(Vector::new),
        }
    }

    pub const fn from_vectors(rows: [Vector<N>; M]) -> Self {
        Self { rows }
    }

    /// Build from a list of rows. Missing rows are zero-filled; extra rows are rejected.
    pub fn from_rows(rows: &[Vector<N>]) -> Result<Self> {
        if rows.len() > M {
            return Err(Error::SizeMismatch {
                expected: M,
                found: rows.len(),
            });
        }
        let mut m = Self::zeros();
        m.rows[..rows.len()].copy_from_slice(rows);
        Ok(m)
    }

    pub fn zeros() -> Self {
        Self::filled(0.0)
    }

    pub fn filled(value: Real) -> Self {
        Self {
            rows: [Vector::filled(value); M],
        }
    }

    /// The "not invertible" sentinel: every entry NaN
    pub fn nan() -> Self {
        Self::filled(Real::NAN)
    }

    pub const fn rows(&self) -> usize {
        M
    }

    pub const fn cols(&self) -> usize {
        N
    }

    /// Bounds-checked row access
    pub fn at(&self, i: usize) -> Result<Vector<N>> {
        self.rows
            .get(i)
            .copied()
            .ok_or(Error::IndexOutOfRange { index: i, len: M })
    }

    /// Bounds-checked element access
    pub fn element(&self, i: usize, j: usize) -> Result<Real> {
        self.at(i)?.at(j)
    }

    pub fn element_mut(&mut self, i: usize, j: usize) -> Result<&mut Real> {
        self.rows
            .get_mut(i)
            .ok_or(Error::IndexOutOfRange { index: i, len: M })?
            .at_mut(j)
    }

    pub fn column(&self, j: usize) -> Vector<M> {
        Vector::new(std::array::from_fn(|i| self.rows[i][j]))
    }

    pub fn transpose(&self) -> Matrix<N, M> {
        Matrix {
            rows: std::array::from_fn(|j| self.column(j)),
        }
    }

    pub fn is_nan(&self) -> bool {
        self.rows.iter().any(Vector::is_nan)
    }

    pub fn nearly_equal(&self, other: &Self) -> bool {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .all(|(a, b)| a.nearly_equal(b))
    }

    fn to_nested(&self) -> Vec<Vec<Real>> {
        self.rows.iter().map(|r| r.as_array().to_vec()).collect()
    }
}

impl<const N: usize> Matrix<N, N> {
    pub fn identity() -> Self {
        Self {
            rows: std::array::from_fn(|i| {
                let mut row = Vector::zeros();
                row[i] = 1.0;
                row
            }),
        }
    }

    /// Determinant by recursive cofactor expansion along the first row.
    ///
    /// Grows factorially with `N`; `inverse` does not use it.
    pub fn determinant(&self) -> Real {
        determinant_of(&self.to_nested())
    }

    /// Matrix of signed minors `(-1)^(i+j) * det(sub_matrix(i, j))`
    pub fn cofactor_matrix(&self) -> Self {
        let nested = self.to_nested();
        if N == 1 {
            return Self::filled(1.0);
        }
        let mut result = Self::zeros();
        for i in 0..N {
            for j in 0..N {
                result.rows[i][j] = cofactor(&nested, i, j);
            }
        }
        result
    }

    /// Gauss-Jordan inverse with partial pivoting.
    ///
    /// Returns a NaN-filled matrix when a pivot column is entirely zero;
    /// callers must check `is_nan` before using the result.
    pub fn inverse(&self) -> Self {
        let mut a = *self;
        let mut inv = Self::identity();

        for j in 0..N {
            let mut pivot = j;
            for r in (j + 1)..N {
                if a.rows[r][j].abs() > a.rows[pivot][j].abs() {
                    pivot = r;
                }
            }

            let p = a.rows[pivot][j];
            if p == 0.0 {
                return Self::nan();
            }

            a.rows.swap(j, pivot);
            inv.rows.swap(j, pivot);

            a.rows[j] = a.rows[j] * (1.0 / p);
            inv.rows[j] = inv.rows[j] * (1.0 / p);

            for r in 0..N {
                if r == j {
                    continue;
                }
                let factor = a.rows[r][j];
                if factor != 0.0 {
                    a.rows[r] = a.rows[r] - a.rows[j] * factor;
                    inv.rows[r] = inv.rows[r] - inv.rows[j] * factor;
                }
            }
        }

        inv
    }
}

/// Copy of `m` without `row` and `col`
pub fn sub_matrix(m: &[Vec<Real>], row: usize, col: usize) -> Vec<Vec<Real>> {
    m.iter()
        .enumerate()
        .filter(|(i, _)| *i != row)
        .map(|(_, r)| {
            r.iter()
                .enumerate()
                .filter(|(j, _)| *j != col)
                .map(|(_, v)| *v)
                .collect()
        })
        .collect()
}

fn cofactor(m: &[Vec<Real>], i: usize, j: usize) -> Real {
    let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
    sign * determinant_of(&sub_matrix(m, i, j))
}

fn determinant_of(m: &[Vec<Real>]) -> Real {
    match m.len() {
        0 => 1.0,
        1 => m[0][0],
        2 => m[0][0] * m[1][1] - m[0][1] * m[1][0],
        n => (0..n).map(|j| m[0][j] * cofactor(m, 0, j)).sum(),
    }
}

impl<const M: usize, const N: usize> Default for Matrix<M, N> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<const M: usize, const N: usize> From<nalgebra::SMatrix<Real, M, N>> for Matrix<M, N> {
    fn from(m: nalgebra::SMatrix<Real, M, N>) -> Self {
        Self::new(std::array::from_fn(|i| std::array::from_fn(|j| m[(i, j)])))
    }
}

impl<const M: usize, const N: usize> From<Matrix<M, N>> for nalgebra::SMatrix<Real, M, N> {
    fn from(m: Matrix<M, N>) -> Self {
        nalgebra::SMatrix::from_fn(|i, j| m.rows[i][j])
    }
}

impl<const M: usize, const N: usize> Index<usize> for Matrix<M, N> {
    type Output = Vector<N>;

    fn index(&self, i: usize) -> &Vector<N> {
        &self.rows[i]
    }
}

impl<const M: usize, const N: usize> IndexMut<usize> for Matrix<M, N> {
    fn index_mut(&mut self, i: usize) -> &mut Vector<N> {
        &mut self.rows[i]
    }
}

impl<const M: usize, const N: usize> Index<(usize, usize)> for Matrix<M, N> {
    type Output = Real;

    fn index(&self, (i, j): (usize, usize)) -> &Real {
        &self.rows[i][j]
    }
}

impl<const M: usize, const N: usize> IndexMut<(usize, usize)> for Matrix<M, N> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Real {
        &mut self.rows[i][j]
    }
}

impl<const M: usize, const N: usize> Add for Matrix<M, N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            rows: std::array::from_fn(|i| self.rows[i] + rhs.rows[i]),
        }
    }
}

impl<const M: usize, const N: usize> AddAssign for Matrix<M, N> {
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.rows.iter_mut().zip(rhs.rows) {
            *a += b;
        }
    }
}

impl<const M: usize, const N: usize> Neg for Matrix<M, N> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            rows: self.rows.map(|r| -r),
        }
    }
}

impl<const M: usize, const N: usize> Sub for Matrix<M, N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            rows: std::array::from_fn(|i| self.rows[i] - rhs.rows[i]),
        }
    }
}

impl<const M: usize, const N: usize> Mul<Real> for Matrix<M, N> {
    type Output = Self;

    fn mul(self, s: Real) -> Self {
        Self {
            rows: self.rows.map(|r| r * s),
        }
    }
}

impl<const M: usize, const N: usize> Mul<Matrix<M, N>> for Real {
    type Output = Matrix<M, N>;

    fn mul(self, m: Matrix<M, N>) -> Matrix<M, N> {
        m * self
    }
}

/// Division by zero yields a NaN-filled matrix.
impl<const M: usize, const N: usize> Div<Real> for Matrix<M, N> {
    type Output = Self;

    fn div(self, s: Real) -> Self {
        Self {
            rows: self.rows.map(|r| r / s),
        }
    }
}

impl<const M: usize, const N: usize> Mul<Vector<N>> for Matrix<M, N> {
    type Output = Vector<M>;

    fn mul(self, v: Vector<N>) -> Vector<M> {
        Vector::new(std::array::from_fn(|i| self.rows[i].dot(&v)))
    }
}

impl<const M: usize, const N: usize, const O: usize> Mul<Matrix<N, O>> for Matrix<M, N> {
    type Output = Matrix<M, O>;

    fn mul(self, rhs: Matrix<N, O>) -> Matrix<M, O> {
        let columns: [Vector<N>; O] = std::array::from_fn(|j| rhs.column(j));
        Matrix {
            rows: std::array::from_fn(|i| {
                Vector::new(std::array::from_fn(|j| self.rows[i].dot(&columns[j])))
            }),
        }
    }
}

impl<const M: usize, const N: usize> fmt::Display for Matrix<M, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_list(f, self.rows.iter())
    }
}
