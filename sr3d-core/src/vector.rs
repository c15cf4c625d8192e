/// Fixed-size vectors over `Real`
use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub};

use crate::error::{Error, Result};

pub type Real = f64;

/// Relative tolerance used by the `nearly_equal` family
pub const EPSILON: Real = f32::EPSILON as Real;

pub type Vec2 = Vector<2>;
pub type Vec3 = Vector<3>;
pub type Vec4 = Vector<4>;

/// An ordered tuple of `N` real components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const N: usize> {
    elements: [Real; N],
}

impl<const N: usize> Vector<N> {
    pub const fn new(elements: [Real; N]) -> Self {
        Self { elements }
    }

    pub fn zeros() -> Self {
        Self::filled(0.0)
    }

    pub fn filled(value: Real) -> Self {
        Self {
            elements: [value; N],
        }
    }

    /// A vector whose every component is NaN, the "no result" sentinel
    pub fn nan() -> Self {
        Self::filled(Real::NAN)
    }

    /// Unit vector along axis `i`
    pub fn basis(i: usize) -> Result<Self> {
        let mut v = Self::zeros();
        *v.at_mut(i)? = 1.0;
        Ok(v)
    }

    /// Build from a slice. Shorter slices are zero-padded; longer ones are rejected.
    pub fn from_slice(values: &[Real]) -> Result<Self> {
        if values.len() > N {
            return Err(Error::SizeMismatch {
                expected: N,
                found: values.len(),
            });
        }
        let mut v = Self::zeros();
        v.elements[..values.len()].copy_from_slice(values);
        Ok(v)
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn as_array(&self) -> &[Real; N] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = &Real> {
        self.elements.iter()
    }

    /// Bounds-checked component access
    pub fn at(&self, i: usize) -> Result<Real> {
        self.elements
            .get(i)
            .copied()
            .ok_or(Error::IndexOutOfRange { index: i, len: N })
    }

    pub fn at_mut(&mut self, i: usize) -> Result<&mut Real> {
        self.elements
            .get_mut(i)
            .ok_or(Error::IndexOutOfRange { index: i, len: N })
    }

    pub fn dot(&self, other: &Self) -> Real {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Cross product of the first three components; any further components are zero.
    pub fn cross(&self, other: &Self) -> Result<Self> {
        if N < 3 {
            return Err(Error::SizeMismatch {
                expected: 3,
                found: N,
            });
        }
        let (u, v) = (&self.elements, &other.elements);
        let mut result = Self::zeros();
        result.elements[0] = u[1] * v[2] - u[2] * v[1];
        result.elements[1] = u[2] * v[0] - u[0] * v[2];
        result.elements[2] = u[0] * v[1] - u[1] * v[0];
        Ok(result)
    }

    pub fn sq_norm(&self) -> Real {
        self.dot(self)
    }

    /// Euclidean norm
    pub fn norm(&self) -> Real {
        self.sq_norm().sqrt()
    }

    /// The normalized vector; NaN-filled for the zero vector.
    pub fn unit_vector(&self) -> Self {
        *self / self.norm()
    }

    pub fn is_unit(&self) -> bool {
        nearly_equal_scalar(self.norm(), 1.0)
    }

    pub fn is_nan(&self) -> bool {
        self.elements.iter().any(|c| c.is_nan())
    }

    /// Component-wise comparison with a tolerance relative to the larger magnitude.
    ///
    /// `1.0000001 ~ 1.0` and `67329.234 ~ 67329.242`, but `1.234 !~ 1.242`.
    pub fn nearly_equal(&self, other: &Self) -> bool {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .all(|(a, b)| nearly_equal_scalar(*a, *b))
    }
}

/// Relative comparison of two scalars.
///
/// Magnitudes below one share the tolerance of one, so values that should be
/// zero but carry rounding residue (e.g. `1e-17`) still compare equal to zero.
pub fn nearly_equal_scalar(a: Real, b: Real) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    let largest = a.abs().max(b.abs());
    diff <= largest.max(1.0) * EPSILON
}

impl Vector<2> {
    pub const fn xy(x: Real, y: Real) -> Self {
        Self::new([x, y])
    }
}

impl Vector<3> {
    pub const fn xyz(x: Real, y: Real, z: Real) -> Self {
        Self::new([x, y, z])
    }

    /// Homogeneous extension with weight `w`
    pub fn extend(&self, w: Real) -> Vec4 {
        let [x, y, z] = self.elements;
        Vector::new([x, y, z, w])
    }
}

impl Vector<4> {
    pub const fn xyzw(x: Real, y: Real, z: Real, w: Real) -> Self {
        Self::new([x, y, z, w])
    }

    /// Drops the homogeneous component without dividing by it
    pub fn xyz(&self) -> Vec3 {
        let [x, y, z, _] = self.elements;
        Vector::new([x, y, z])
    }
}

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<const N: usize> From<[Real; N]> for Vector<N> {
    fn from(elements: [Real; N]) -> Self {
        Self::new(elements)
    }
}

impl<const N: usize> From<nalgebra::SVector<Real, N>> for Vector<N> {
    fn from(v: nalgebra::SVector<Real, N>) -> Self {
        Self::new(std::array::from_fn(|i| v[i]))
    }
}

impl<const N: usize> From<Vector<N>> for nalgebra::SVector<Real, N> {
    fn from(v: Vector<N>) -> Self {
        nalgebra::SVector::from(v.elements)
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = Real;

    fn index(&self, i: usize) -> &Real {
        &self.elements[i]
    }
}

impl<const N: usize> IndexMut<usize> for Vector<N> {
    fn index_mut(&mut self, i: usize) -> &mut Real {
        &mut self.elements[i]
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(std::array::from_fn(|i| self.elements[i] + rhs.elements[i]))
    }
}

impl<const N: usize> AddAssign for Vector<N> {
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.elements.iter_mut().zip(rhs.elements) {
            *a += b;
        }
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(self.elements.map(|c| -c))
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(std::array::from_fn(|i| self.elements[i] - rhs.elements[i]))
    }
}

impl<const N: usize> Mul<Real> for Vector<N> {
    type Output = Self;

    fn mul(self, s: Real) -> Self {
        Self::new(self.elements.map(|c| c * s))
    }
}

impl<const N: usize> Mul<Vector<N>> for Real {
    type Output = Vector<N>;

    fn mul(self, v: Vector<N>) -> Vector<N> {
        v * self
    }
}

/// Division by zero yields a NaN-filled vector.
impl<const N: usize> Div<Real> for Vector<N> {
    type Output = Self;

    fn div(self, s: Real) -> Self {
        if s == 0.0 {
            return Self::nan();
        }
        Self::new(self.elements.map(|c| c / s))
    }
}

impl<const N: usize> fmt::Display for Vector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_list(f, self.elements.iter())
    }
}

/// Writes any sequence of displayable items as `(a, b, c)`.
pub fn format_list<I>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    write!(f, "(")?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, ")")
}
