//! Scalar trait, matrix aliases and numerical constants.
//!
//! Every operation in this crate is generic over [`Scalar`], which is
//! implemented for `f32` and `f64`. The trait carries the per-precision
//! tolerances used by the geometry routines so that the same code path can
//! be exercised in single and double precision.

use nalgebra::{RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used in geometric computations (f32 or f64).
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Below this geometry-weighted norm a tangent vector is treated as zero
    /// by the exponential map.
    const TANGENT_NORM_TOLERANCE: Self;

    /// Stabilising constant added to the radicands of the distance gradients.
    const STABILIZER: Self;

    /// How far an `arccos`/`arccosh` argument or a Klein norm may drift
    /// outside its valid domain before the input is rejected.
    const DOMAIN_TOLERANCE: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Convert from usize (for batch sizes and iteration counts).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails.
    fn from_usize(v: usize) -> Self {
        <Self as FromPrimitive>::from_usize(v).expect("Failed to convert from usize")
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const TANGENT_NORM_TOLERANCE: Self = 1e-8;
    const STABILIZER: Self = 1e-10;
    const DOMAIN_TOLERANCE: Self = 1e-4;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const TANGENT_NORM_TOLERANCE: Self = 1e-8;
    const STABILIZER: Self = 1e-10;
    const DOMAIN_TOLERANCE: Self = 1e-8;
}

/// Dynamically-sized column vector: a single point or tangent vector.
pub type DVector<T> = nalgebra::DVector<T>;

/// Dynamically-sized matrix: a batch of points stored as columns.
pub type DMatrix<T> = nalgebra::DMatrix<T>;

/// Numerical constants for different precision levels.
pub mod constants {
    use super::Scalar;

    /// Get machine epsilon for the given scalar type.
    pub fn epsilon<T: Scalar>() -> T {
        T::EPSILON
    }

    /// Get the zero-norm threshold used by the exponential map.
    pub fn tangent_norm_tolerance<T: Scalar>() -> T {
        T::TANGENT_NORM_TOLERANCE
    }

    /// Get the radicand stabiliser used by the distance gradients.
    pub fn stabilizer<T: Scalar>() -> T {
        T::STABILIZER
    }

    /// Get the inverse-trig domain tolerance.
    pub fn domain_tolerance<T: Scalar>() -> T {
        T::DOMAIN_TOLERANCE
    }

    /// Pi constant.
    pub fn pi<T: Scalar>() -> T {
        <T as Scalar>::from_f64(std::f64::consts::PI)
    }
}
