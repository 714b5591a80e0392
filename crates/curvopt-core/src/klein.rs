//! Beltrami-Klein projections of the hyperboloid.
//!
//! A hyperboloid point `x` (with `x_last > 0`) maps to `k = x / x_last`, a
//! point of the open unit ball `{‖k_spatial‖ < 1}` lifted to the affine plane
//! `k_last = 1`. The inverse is
//!
//! ```text
//! x = γ(k) · k,    γ(k) = 1 / sqrt(1 − ‖k_spatial‖²)
//! ```
//!
//! where γ is the Lorentz factor. Straight lines of the Klein model are
//! geodesics, which is what makes affine averaging there meaningful.

use crate::error::{GeometryError, Result};
use crate::numerical::ensure_nonempty;
use crate::types::{DMatrix, DVector, Scalar};
use nalgebra::{storage::Storage, Dyn, Matrix, U1};
use num_traits::Float;

/// Projects each hyperboloid column to the Klein model.
///
/// # Errors
///
/// `DomainError` if a column has a non-positive (or non-finite) last coordinate.
pub fn project_to_klein<T: Scalar>(points: &DMatrix<T>) -> Result<DMatrix<T>> {
    ensure_nonempty(points.nrows())?;
    let mut result = points.clone();
    for (j, column) in points.column_iter().enumerate() {
        result.set_column(j, &column_to_klein(&column)?);
    }
    Ok(result)
}

/// Lifts each Klein column back onto the hyperboloid.
///
/// # Errors
///
/// `DomainError` if a column lies outside the open unit ball.
pub fn project_from_klein<T: Scalar>(klein_points: &DMatrix<T>) -> Result<DMatrix<T>> {
    ensure_nonempty(klein_points.nrows())?;
    let mut result = klein_points.clone();
    for (j, column) in klein_points.column_iter().enumerate() {
        let gamma = lorentz_factor(&column)?;
        result.set_column(j, &(column * gamma));
    }
    Ok(result)
}

/// Klein image of a single hyperboloid point.
pub fn to_klein<T: Scalar>(point: &DVector<T>) -> Result<DVector<T>> {
    ensure_nonempty(point.len())?;
    column_to_klein(point)
}

/// Hyperboloid preimage of a single Klein point.
pub fn from_klein<T: Scalar>(klein_point: &DVector<T>) -> Result<DVector<T>> {
    ensure_nonempty(klein_point.len())?;
    Ok(klein_point * lorentz_factor(klein_point)?)
}

/// Lorentz factor `1 / sqrt(1 − ‖k_spatial‖²)` of a Klein point.
///
/// Only the spatial (non-last) coordinates enter the norm.
///
/// # Errors
///
/// - `InvalidParameter`: if the point is empty
/// - `DomainError`: if ‖k_spatial‖ ≥ 1
/// - `NumericalInstability`: if the radicand is positive but below machine epsilon
pub fn lorentz_factor<T, S>(klein_point: &Matrix<T, Dyn, U1, S>) -> Result<T>
where
    T: Scalar,
    S: Storage<T, Dyn>,
{
    ensure_nonempty(klein_point.nrows())?;
    let spatial = klein_point.rows(0, klein_point.nrows() - 1);
    let radicand = T::one() - spatial.norm_squared();
    if !Float::is_finite(radicand) || radicand <= T::zero() {
        return Err(GeometryError::domain_error(format!(
            "Klein point outside the open unit ball: |k|² = {}",
            T::one() - radicand
        )));
    }
    if radicand < T::EPSILON {
        return Err(GeometryError::numerical_instability(format!(
            "Lorentz factor radicand {} is too close to zero",
            radicand
        )));
    }
    Ok(T::one() / <T as Float>::sqrt(radicand))
}

fn column_to_klein<T, S>(point: &Matrix<T, Dyn, U1, S>) -> Result<DVector<T>>
where
    T: Scalar,
    S: Storage<T, Dyn>,
{
    let time = point[point.nrows() - 1];
    if !Float::is_finite(time) || time <= T::zero() {
        return Err(GeometryError::domain_error(format!(
            "Klein projection needs a positive last coordinate, got {}",
            time
        )));
    }
    let mut klein = point / time;
    let last = klein.len() - 1;
    klein[last] = T::one();
    Ok(klein)
}
