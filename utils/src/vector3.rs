//! basic 3D vector. Used for positions, velocities, forces, torques and angular rates.
//! Which frame a vector lives in is tracked by the field it's stored in, not by the type.
use std::{
    fmt::Display,
    ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign},
};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::{LinalgError, Scalar};

/// Cartesian triple (x, y, z).
#[derive(Debug, Default, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Scalar> Vector3<T> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    pub const fn zeros() -> Self {
        Self::new(T::ZERO, T::ZERO, T::ZERO)
    }

    pub const fn unit_x() -> Self {
        Self::new(T::ONE, T::ZERO, T::ZERO)
    }

    pub const fn unit_y() -> Self {
        Self::new(T::ZERO, T::ONE, T::ZERO)
    }

    pub const fn unit_z() -> Self {
        Self::new(T::ZERO, T::ZERO, T::ONE)
    }

    pub fn from_array(a: [T; 3]) -> Self {
        let [x, y, z] = a;
        Self { x, y, z }
    }

    pub fn to_array(self) -> [T; 3] {
        [self.x, self.y, self.z]
    }

    pub fn dot(&self, other: &Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        //! right-handed: unit_x × unit_y == unit_z. Parallel operands give the zero vector.
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn norm_squared(&self) -> T {
        self.dot(self)
    }

    pub fn norm(&self) -> T {
        //! returns the magnitude of the current vector e.g Vector3::new(3, 4, 0).norm() == 5.
        self.norm_squared().sqrt()
    }

    pub fn normalized(&self) -> Result<Self, LinalgError> {
        let n = self.norm();
        if n == T::ZERO {
            return Err(LinalgError::ZeroLength);
        }
        Ok(*self / n)
    }

    pub fn scale(&self, scale_factor: T) -> Self {
        //! scales the vector by a given magnitude.
        Self::new(
            self.x * scale_factor,
            self.y * scale_factor,
            self.z * scale_factor,
        )
    }

    pub fn clear(&mut self) {
        //! zeroes every component in place.
        *self = Self::zeros();
    }

    pub fn get(&self, index: usize) -> Result<T, LinalgError> {
        //! checked component access; 0 => x, 1 => y, 2 => z.
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(LinalgError::IndexOutOfRange { index, len: 3 }),
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, LinalgError> {
        match index {
            0 => Ok(&mut self.x),
            1 => Ok(&mut self.y),
            2 => Ok(&mut self.z),
            _ => Err(LinalgError::IndexOutOfRange { index, len: 3 }),
        }
    }
}

/// Indexing outside 0..3 is a programming error and aborts the caller. Use [`Vector3::get`] for a checked read.
impl<T: Scalar> Index<usize> for Vector3<T> {
    type Output = T;

    #[allow(clippy::panic)] // out-of-range access is unrecoverable by contract.
    fn index(&self, index: usize) -> &T {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("{}", LinalgError::IndexOutOfRange { index, len: 3 }),
        }
    }
}

impl<T: Scalar> IndexMut<usize> for Vector3<T> {
    #[allow(clippy::panic)] // see Index.
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(c) => c,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T: Scalar> Add for Vector3<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Scalar> Sub for Vector3<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Scalar> Neg for Vector3<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<T: Scalar> Mul<T> for Vector3<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        self.scale(rhs)
    }
}

impl<T: Scalar> Div<T> for Vector3<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl<T: Scalar> AddAssign for Vector3<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar> SubAssign for Vector3<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar> MulAssign<T> for Vector3<T> {
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

impl<T: Scalar> DivAssign<T> for Vector3<T> {
    fn div_assign(&mut self, rhs: T) {
        *self = *self / rhs;
    }
}

impl<T: Scalar> Display for Vector3<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl<T: Scalar + AbsDiffEq<Epsilon = T>> AbsDiffEq for Vector3<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl<T: Scalar + RelativeEq<Epsilon = T>> RelativeEq for Vector3<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
