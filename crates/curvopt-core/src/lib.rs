//! Ambient-coordinate geometry on constant-curvature manifolds.
//!
//! This crate provides the geometric primitives used for Riemannian
//! optimisation and aggregation on the unit sphere, the hyperboloid model of
//! hyperbolic space, and flat Euclidean space. All points are represented in
//! embedding coordinates of dimension `d+1`, singly as a [`DVector`] or
//! batched as the columns of a [`DMatrix`].
//!
//! # Modules
//!
//! - [`geometry`]: The closed [`Geometry`](geometry::Geometry) tag
//! - [`metric`]: Diagonal metric and the inner product it induces
//! - [`tangent`]: Projection onto tangent spaces
//! - [`exponential`]: Exponential maps
//! - [`distance`]: Geodesic distances
//! - [`klein`]: Beltrami-Klein projections of the hyperboloid
//! - [`aggregation`]: Einstein midpoint
//! - [`numerical`]: Domain clamping and validation
//! - [`sampling`]: Random points and tangent vectors
//! - [`error`]: Error types
//! - [`types`]: Scalar trait and aliases
//!
//! [`DVector`]: types::DVector
//! [`DMatrix`]: types::DMatrix

pub mod aggregation;
pub mod distance;
pub mod error;
pub mod exponential;
pub mod geometry;
pub mod klein;
pub mod metric;
pub mod numerical;
pub mod sampling;
pub mod tangent;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{GeometryError, OptimizerError, OptimizerResult, Result};
pub use geometry::Geometry;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use curvopt_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::aggregation::{einstein_midpoint, einstein_midpoint_in, weighted_einstein_midpoint};
    pub use crate::distance::{distance, distance_batch};
    pub use crate::error::{GeometryError, OptimizerError, OptimizerResult, Result};
    pub use crate::exponential::{exponential_map, exponential_map_batch};
    pub use crate::geometry::Geometry;
    pub use crate::klein::{from_klein, lorentz_factor, project_from_klein, project_to_klein, to_klein};
    pub use crate::metric::{dot, dot_batch, get_metric, norm, Metric};
    pub use crate::numerical::{check_point, is_on_manifold, is_tangent};
    pub use crate::tangent::{
        project_to_tangent, project_to_tangent_batch, project_to_tangent_with, ProjectionMode,
    };
    pub use crate::types::{constants, DMatrix, DVector, Scalar};
}
