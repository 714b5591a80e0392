//! Projection of ambient displacements onto the tangent space.
//!
//! # Mathematical Formula
//!
//! ```text
//! P_p(w) = w − (⟨p,w⟩ / ⟨p,p⟩) p
//! ```
//!
//! so that ⟨p, P_p(w)⟩ = 0 under the metric of the geometry. On the sphere
//! and the hyperboloid ⟨p,p⟩ is ±1, which [`ProjectionMode::OnManifold`]
//! substitutes instead of recomputing it.

use crate::error::{GeometryError, Result};
use crate::geometry::Geometry;
use crate::metric::column_dot;
use crate::numerical::{ensure_same_len, ensure_same_shape};
use crate::types::{DMatrix, DVector, Scalar};
use num_traits::Float;

/// How ⟨p,p⟩ is obtained during tangent projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectionMode {
    /// Recompute ⟨p,p⟩ from `p`. Correct for any base point.
    #[default]
    Exact,
    /// Use the constant ±1 of the manifold.
    ///
    /// Only valid when `p` is known to satisfy its constraint exactly; points
    /// drifting off the manifold during refinement must use [`ProjectionMode::Exact`].
    OnManifold,
}

/// Projects `w` onto the tangent space at `p`, recomputing ⟨p,p⟩.
///
/// # Errors
///
/// - `UnsupportedOperation`: for Euclidean geometry
/// - `DimensionMismatch`: if `p` and `w` differ in length
/// - `NumericalInstability`: if ⟨p,p⟩ is numerically zero
pub fn project_to_tangent<T: Scalar>(
    p: &DVector<T>,
    w: &DVector<T>,
    geometry: Geometry,
) -> Result<DVector<T>> {
    project_to_tangent_with(p, w, geometry, ProjectionMode::Exact)
}

/// Projects `w` onto the tangent space at `p` using the given mode.
pub fn project_to_tangent_with<T: Scalar>(
    p: &DVector<T>,
    w: &DVector<T>,
    geometry: Geometry,
    mode: ProjectionMode,
) -> Result<DVector<T>> {
    ensure_same_len(p, w)?;
    let pp = self_inner_product(p, geometry, mode)?;
    let coefficient = column_dot(p, w, geometry) / pp;
    Ok(w - p * coefficient)
}

/// Column-wise tangent projection of a batch of displacements.
pub fn project_to_tangent_batch<T: Scalar>(
    p: &DMatrix<T>,
    w: &DMatrix<T>,
    geometry: Geometry,
    mode: ProjectionMode,
) -> Result<DMatrix<T>> {
    ensure_same_shape(p, w)?;
    let mut result = w.clone();
    for (j, (pj, wj)) in p.column_iter().zip(w.column_iter()).enumerate() {
        let pp = self_inner_product(&pj.clone_owned(), geometry, mode)?;
        let coefficient = column_dot(&pj, &wj, geometry) / pp;
        result.set_column(j, &(wj - pj * coefficient));
    }
    Ok(result)
}

fn self_inner_product<T: Scalar>(p: &DVector<T>, geometry: Geometry, mode: ProjectionMode) -> Result<T> {
    let Some(constant) = geometry.self_inner_product::<T>() else {
        return Err(GeometryError::unsupported("tangent projection", geometry));
    };
    let pp = match mode {
        ProjectionMode::Exact => column_dot(p, p, geometry),
        ProjectionMode::OnManifold => constant,
    };
    if <T as Float>::abs(pp) < T::EPSILON {
        return Err(GeometryError::numerical_instability(format!(
            "<p,p> = {} is zero, base point is a null vector",
            pp
        )));
    }
    Ok(pp)
}
