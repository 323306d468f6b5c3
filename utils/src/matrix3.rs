//! 3x3 matrix stored as three row vectors. Doubles as a direction cosine matrix (body -> inertial) and as a general
//! tensor (inertia and its inverse).
use std::{
    fmt::Display,
    ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign},
};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::{LinalgError, Scalar, Vector3};

/// Row-major 3x3 matrix.
#[derive(Debug, Default, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix3<T> {
    pub rows: [Vector3<T>; 3],
}

impl<T: Scalar> Matrix3<T> {
    pub const fn from_rows(r0: Vector3<T>, r1: Vector3<T>, r2: Vector3<T>) -> Self {
        Self { rows: [r0, r1, r2] }
    }

    pub fn from_cols(c0: Vector3<T>, c1: Vector3<T>, c2: Vector3<T>) -> Self {
        Self::from_rows(c0, c1, c2).transpose()
    }

    pub fn from_array(a: [[T; 3]; 3]) -> Self {
        let [r0, r1, r2] = a;
        Self::from_rows(
            Vector3::from_array(r0),
            Vector3::from_array(r1),
            Vector3::from_array(r2),
        )
    }

    pub const fn zeros() -> Self {
        Self::from_rows(Vector3::zeros(), Vector3::zeros(), Vector3::zeros())
    }

    pub const fn identity() -> Self {
        Self::from_rows(Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z())
    }

    pub fn from_diagonal(d: Vector3<T>) -> Self {
        Self::from_rows(
            Vector3::new(d.x, T::ZERO, T::ZERO),
            Vector3::new(T::ZERO, d.y, T::ZERO),
            Vector3::new(T::ZERO, T::ZERO, d.z),
        )
    }

    pub fn skew(w: &Vector3<T>) -> Self {
        //! cross-product matrix: skew(w) * v == w.cross(&v) for every v.
        Self::from_rows(
            Vector3::new(T::ZERO, -w.z, w.y),
            Vector3::new(w.z, T::ZERO, -w.x),
            Vector3::new(-w.y, w.x, T::ZERO),
        )
    }

    pub fn row(&self, index: usize) -> Result<Vector3<T>, LinalgError> {
        self.rows
            .get(index)
            .copied()
            .ok_or(LinalgError::IndexOutOfRange { index, len: 3 })
    }

    pub fn col(&self, index: usize) -> Result<Vector3<T>, LinalgError> {
        let [r0, r1, r2] = self.rows;
        Ok(Vector3::new(r0.get(index)?, r1.get(index)?, r2.get(index)?))
    }

    pub fn get(&self, row: usize, col: usize) -> Result<T, LinalgError> {
        self.row(row)?.get(col)
    }

    pub fn transpose(&self) -> Self {
        let [a, b, c] = self.rows;
        Self::from_rows(
            Vector3::new(a.x, b.x, c.x),
            Vector3::new(a.y, b.y, c.y),
            Vector3::new(a.z, b.z, c.z),
        )
    }

    pub fn trace(&self) -> T {
        let [a, b, c] = self.rows;
        a.x + b.y + c.z
    }

    pub fn determinant(&self) -> T {
        //! cofactor expansion along the first row.
        let [a, b, c] = self.rows;
        a.x * (b.y * c.z - b.z * c.y) - a.y * (b.x * c.z - b.z * c.x)
            + a.z * (b.x * c.y - b.y * c.x)
    }

    pub fn adjugate(&self) -> Self {
        //! transpose of the cofactor matrix. Rows of the cofactor matrix are b×c, c×a, a×b for rows a, b, c.
        let [a, b, c] = self.rows;
        Self::from_rows(b.cross(&c), c.cross(&a), a.cross(&b)).transpose()
    }

    pub fn inverse(&self) -> Result<Self, LinalgError> {
        //! adjugate / determinant, refusing anything [`is_singular`](Self::is_singular) at
        //! `T::SINGULARITY_EPSILON`.
        self.inverse_with_epsilon(T::SINGULARITY_EPSILON)
    }

    pub fn inverse_with_epsilon(&self, epsilon: T) -> Result<Self, LinalgError> {
        let det = self.determinant();
        if self.is_singular_at(det, epsilon) {
            return Err(LinalgError::Singular {
                determinant: det.to_f64(),
            });
        }
        Ok(self.adjugate() / det)
    }

    pub fn is_singular(&self, epsilon: T) -> bool {
        //! true when |det| <= epsilon * |r0| |r1| |r2|. The row-norm product bounds |det| from above (Hadamard), so
        //! the test is independent of the matrix's overall scale: `m` and `m * k` are judged alike.
        self.is_singular_at(self.determinant(), epsilon)
    }

    fn is_singular_at(&self, det: T, epsilon: T) -> bool {
        let [a, b, c] = self.rows;
        det.abs() <= epsilon * a.norm() * b.norm() * c.norm()
    }

    pub fn orthonormalized(&self) -> Result<Self, LinalgError> {
        //! Gram-Schmidt over the rows, keeping the first row's direction and right-handedness.
        //! Used to pull a drifting DCM back onto SO(3) between integration steps.
        let singular = |_: LinalgError| LinalgError::Singular {
            determinant: self.determinant().to_f64(),
        };
        let [a, b, _] = self.rows;
        let r0 = a.normalized().map_err(singular)?;
        let r1 = (b - r0 * r0.dot(&b)).normalized().map_err(singular)?;
        Ok(Self::from_rows(r0, r1, r0.cross(&r1)))
    }

    pub fn scale(&self, scale_factor: T) -> Self {
        let [a, b, c] = self.rows;
        Self::from_rows(a * scale_factor, b * scale_factor, c * scale_factor)
    }

    pub fn clear(&mut self) {
        *self = Self::zeros();
    }
}

/// Indexed by (row, col). Out-of-range access aborts; see [`Matrix3::get`] for a checked read.
impl<T: Scalar> Index<(usize, usize)> for Matrix3<T> {
    type Output = T;

    #[allow(clippy::panic)] // out-of-range access is unrecoverable by contract.
    fn index(&self, (row, col): (usize, usize)) -> &T {
        match self.rows.get(row) {
            Some(r) => &r[col],
            None => panic!("{}", LinalgError::IndexOutOfRange { index: row, len: 3 }),
        }
    }
}

impl<T: Scalar> IndexMut<(usize, usize)> for Matrix3<T> {
    #[allow(clippy::panic)] // see Index.
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        match self.rows.get_mut(row) {
            Some(r) => &mut r[col],
            None => panic!("{}", LinalgError::IndexOutOfRange { index: row, len: 3 }),
        }
    }
}

impl<T: Scalar> Add for Matrix3<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let ([a, b, c], [d, e, f]) = (self.rows, rhs.rows);
        Self::from_rows(a + d, b + e, c + f)
    }
}

impl<T: Scalar> Sub for Matrix3<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let ([a, b, c], [d, e, f]) = (self.rows, rhs.rows);
        Self::from_rows(a - d, b - e, c - f)
    }
}

impl<T: Scalar> Neg for Matrix3<T> {
    type Output = Self;

    fn neg(self) -> Self {
        let [a, b, c] = self.rows;
        Self::from_rows(-a, -b, -c)
    }
}

impl<T: Scalar> Mul<T> for Matrix3<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        self.scale(rhs)
    }
}

impl<T: Scalar> Div<T> for Matrix3<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        let [a, b, c] = self.rows;
        Self::from_rows(a / rhs, b / rhs, c / rhs)
    }
}

/// Row-dot-column. Not commutative.
impl<T: Scalar> Mul for Matrix3<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let t = rhs.transpose();
        let [a, b, c] = self.rows;
        let row = |r: Vector3<T>| {
            let [c0, c1, c2] = t.rows;
            Vector3::new(r.dot(&c0), r.dot(&c1), r.dot(&c2))
        };
        Self::from_rows(row(a), row(b), row(c))
    }
}

impl<T: Scalar> Mul<Vector3<T>> for Matrix3<T> {
    type Output = Vector3<T>;

    fn mul(self, v: Vector3<T>) -> Vector3<T> {
        let [a, b, c] = self.rows;
        Vector3::new(a.dot(&v), b.dot(&v), c.dot(&v))
    }
}

impl<T: Scalar> AddAssign for Matrix3<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar> SubAssign for Matrix3<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar> MulAssign<T> for Matrix3<T> {
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

impl<T: Scalar> Display for Matrix3<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.rows;
        write!(f, "[{a}, {b}, {c}]")
    }
}

impl<T: Scalar + AbsDiffEq<Epsilon = T>> AbsDiffEq for Matrix3<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: Scalar + RelativeEq<Epsilon = T>> RelativeEq for Matrix3<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
