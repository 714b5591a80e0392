//! Shape preconditions and manifold membership checks.

use crate::error::{GeometryError, Result};
use crate::geometry::Geometry;
use crate::metric::dot;
use crate::types::{DMatrix, DVector, Scalar};
use num_traits::Float;

/// Fails with `InvalidParameter` for zero-length operands.
pub fn ensure_nonempty(len: usize) -> Result<()> {
    if len == 0 {
        return Err(GeometryError::invalid_parameter(
            "ambient dimension must be positive",
        ));
    }
    Ok(())
}

/// Both vectors must be non-empty and of equal length.
pub fn ensure_same_len<T: Scalar>(u: &DVector<T>, v: &DVector<T>) -> Result<()> {
    ensure_nonempty(u.len())?;
    if u.len() != v.len() {
        return Err(GeometryError::dimension_mismatch(u.len(), v.len()));
    }
    Ok(())
}

/// Both batches must be non-empty and of identical shape.
pub fn ensure_same_shape<T: Scalar>(u: &DMatrix<T>, v: &DMatrix<T>) -> Result<()> {
    ensure_nonempty(u.nrows())?;
    if u.shape() != v.shape() {
        return Err(GeometryError::dimension_mismatch(
            format!("{:?}", u.shape()),
            format!("{:?}", v.shape()),
        ));
    }
    Ok(())
}

/// Checks the manifold constraint of `geometry` within `tolerance`.
///
/// Hyperbolic points must additionally lie on the upper sheet (`x_last > 0`).
pub fn is_on_manifold<T: Scalar>(point: &DVector<T>, geometry: Geometry, tolerance: T) -> bool {
    if point.is_empty() {
        return false;
    }
    let Some(target) = geometry.self_inner_product::<T>() else {
        return point.iter().all(|x| Float::is_finite(*x));
    };
    if geometry == Geometry::Hyperbolic && point[point.len() - 1] <= T::zero() {
        return false;
    }
    match dot(point, point, geometry) {
        Ok(value) => <T as Float>::abs(value - target) < tolerance,
        Err(_) => false,
    }
}

/// Validates that `point` satisfies the constraint of `geometry`.
///
/// # Errors
///
/// - `InvalidParameter`: If the point is empty
/// - `DomainError`: If ⟨x,x⟩ differs from ±1, or a hyperbolic point lies on the lower sheet
pub fn check_point<T: Scalar>(point: &DVector<T>, geometry: Geometry) -> Result<()> {
    ensure_nonempty(point.len())?;
    if is_on_manifold(point, geometry, T::DOMAIN_TOLERANCE) {
        return Ok(());
    }
    let norm = dot(point, point, geometry)?;
    Err(GeometryError::domain_error(format!(
        "point is not on the {} manifold: <x,x> = {}, last coordinate = {}",
        geometry,
        norm,
        point[point.len() - 1]
    )))
}

/// Checks ⟨p,v⟩ ≈ 0 under the metric of `geometry`.
pub fn is_tangent<T: Scalar>(
    point: &DVector<T>,
    vector: &DVector<T>,
    geometry: Geometry,
    tolerance: T,
) -> bool {
    match dot(point, vector, geometry) {
        Ok(value) => <T as Float>::abs(value) < tolerance,
        Err(_) => false,
    }
}
