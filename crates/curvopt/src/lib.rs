//! Geometry and first-order optimisation on constant-curvature manifolds.
//!
//! `curvopt` bundles [`curvopt_core`], the ambient-coordinate geometry of the
//! unit sphere, the hyperboloid and flat space, with [`curvopt_optim`], the
//! Riemannian gradient descent built on it.
//!
//! # Example
//!
//! ```rust
//! use curvopt::prelude::*;
//!
//! let geometry: Geometry = "hyperbolic".parse()?;
//! let a = DVector::from_vec(vec![0.0, 0.0, 1.0]);
//! let b = DVector::from_vec(vec![1.0_f64.sinh(), 0.0, 1.0_f64.cosh()]);
//! assert!((distance(&a, &b, geometry)? - 1.0).abs() < 1e-10);
//!
//! let m = einstein_midpoint(&DMatrix::from_columns(&[a.clone(), b.clone()]))?;
//! assert!(distance(&a, &m, geometry)? < 1.0);
//! # Ok::<(), curvopt::GeometryError>(())
//! ```

pub use curvopt_core;
pub use curvopt_optim;

pub use curvopt_core::{Geometry, GeometryError, OptimizerError, OptimizerResult, Result};
pub use nalgebra;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use curvopt_core::prelude::*;
    pub use curvopt_optim::{
        error_differential_eucl, frechet_diff, gradient_descent, gradient_descent_observed,
        gradient_descent_with_vectors, karcher_mean, karcher_mean_with, DescentConfig,
        DescentResult, DescentStep, NoOpObserver, RecordingObserver, RiemannianDescent,
        StepObserver, StepSizeSchedule, TerminationReason, TracingObserver,
    };
}
