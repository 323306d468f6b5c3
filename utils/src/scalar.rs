//! Floating-point scalar abstraction. Lets the vector and matrix types run in single or double precision from one
//! generic implementation.
use std::{
    fmt::{Debug, Display},
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// Scalar type usable by [`Vector3`](crate::Vector3) and [`Matrix3`](crate::Matrix3).
///
/// Implemented for `f32` and `f64`.
pub trait Scalar:
    Copy
    + Debug
    + Display
    + Default
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + 'static
{
    /// additive identity.
    const ZERO: Self;
    /// multiplicative identity.
    const ONE: Self;
    /// 2.
    const TWO: Self;
    /// Default relative singularity threshold: a matrix is singular when |det| is at most this fraction of the
    /// product of its row norms. See [`Matrix3::is_singular`](crate::Matrix3::is_singular).
    const SINGULARITY_EPSILON: Self;

    /// square root.
    fn sqrt(self) -> Self;
    /// absolute value.
    fn abs(self) -> Self;
    /// lossy conversion from f64 (exact for f64).
    fn from_f64(v: f64) -> Self;
    /// widening conversion to f64.
    fn to_f64(self) -> f64;
}

macro_rules! impl_scalar_float {
    ($t:ty, $eps:expr) => {
        impl Scalar for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const TWO: Self = 2.0;
            const SINGULARITY_EPSILON: Self = $eps;

            #[inline]
            fn sqrt(self) -> Self {
                <$t>::sqrt(self)
            }
            #[inline]
            fn abs(self) -> Self {
                <$t>::abs(self)
            }
            #[allow(clippy::as_conversions)] // narrowing to f32 is the documented intent.
            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }
            #[inline]
            fn to_f64(self) -> f64 {
                f64::from(self)
            }
        }
    };
}

impl_scalar_float!(f32, 1e-6);
impl_scalar_float!(f64, 1e-12);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants() {
        assert_eq!(f64::ZERO, 0.0);
        assert_eq!(f64::ONE + f64::ONE, f64::TWO);
        assert_eq!(f32::TWO, 2.0f32);
        assert!(f32::SINGULARITY_EPSILON > f64::SINGULARITY_EPSILON.to_f64() as f32);
    }

    #[test]
    fn conversions() {
        assert_eq!(<f32 as Scalar>::from_f64(0.5), 0.5f32);
        assert_eq!(0.25f32.to_f64(), 0.25f64);
        assert_eq!(Scalar::sqrt(16.0f64), 4.0);
        assert_eq!(Scalar::abs(-3.0f32), 3.0);
    }
}
