//! Domain clamping and guarded square roots.
//!
//! The inverse trigonometric and hyperbolic functions used by the distance
//! formulas only accept arguments in `[-1, 1]` and `[1, ∞)`. Rounding pushes
//! arguments slightly outside when points coincide or are antipodal, so small
//! excursions are clamped back; large excursions mean the inputs are not on the
//! manifold and are reported as [`GeometryError::DomainError`].

use crate::error::{GeometryError, Result};
use crate::types::{DVector, Scalar};
use num_traits::Float;

/// Clamps an `arccos` argument to `[-1, 1]`.
pub fn clamp_acos_argument<T: Scalar>(x: T) -> Result<T> {
    let one = T::one();
    let tol = T::DOMAIN_TOLERANCE;
    if !Float::is_finite(x) || x > one + tol || x < -one - tol {
        return Err(GeometryError::domain_error(format!(
            "arccos argument {} outside [-1, 1]",
            x
        )));
    }
    Ok(<T as Float>::max(<T as Float>::min(x, one), -one))
}

/// Clamps an `arccosh` argument to `[1, ∞)`.
pub fn clamp_acosh_argument<T: Scalar>(x: T) -> Result<T> {
    let one = T::one();
    if !Float::is_finite(x) || x < one - T::DOMAIN_TOLERANCE {
        return Err(GeometryError::domain_error(format!(
            "arccosh argument {} below 1",
            x
        )));
    }
    Ok(<T as Float>::max(x, one))
}

/// Square root that treats small negative rounding as zero.
pub fn clamped_sqrt<T: Scalar>(x: T) -> Result<T> {
    if !Float::is_finite(x) || x < -T::DOMAIN_TOLERANCE {
        return Err(GeometryError::domain_error(format!(
            "square root of negative value {}",
            x
        )));
    }
    Ok(<T as Float>::sqrt(<T as Float>::max(x, T::zero())))
}

/// Returns `true` if `|x|` is below `tolerance`.
#[inline]
pub fn is_negligible<T: Scalar>(x: T, tolerance: T) -> bool {
    <T as Float>::abs(x) < tolerance
}

/// Fails with `NumericalInstability` if any entry is NaN or infinite.
pub fn check_finite<T: Scalar>(v: &DVector<T>, what: &str) -> Result<()> {
    if v.iter().all(|x| Float::is_finite(*x)) {
        Ok(())
    } else {
        Err(GeometryError::numerical_instability(format!(
            "{} contains non-finite entries",
            what
        )))
    }
}
