//! Riemannian gradient descent on constant-curvature manifolds.
//!
//! This crate builds the first-order optimisation layer on top of
//! `curvopt-core`: distance differentials, a single gradient step, an
//! iterated driver with step size schedules, and the Karcher mean.
//!
//! # Examples
//!
//! ```rust
//! use curvopt_core::geometry::Geometry;
//! use curvopt_optim::{error_differential_eucl, gradient_descent};
//! use nalgebra::DVector;
//!
//! let u = DVector::from_vec(vec![0.0, 0.0, 1.0]);
//! let v = DVector::from_vec(vec![1.0, 0.0, 0.0]);
//! let next = gradient_descent(&u, &v, error_differential_eucl, Geometry::Spherical, 1.0)?;
//! assert!((next[0] - 1.0_f64.sin()).abs() < 1e-6);
//! # Ok::<(), curvopt_core::error::GeometryError>(())
//! ```

pub mod callback;
pub mod differential;
pub mod driver;
pub mod frechet;
pub mod gradient_descent;
pub mod step_size;

pub use callback::{
    DescentProgress, NoOpObserver, RecordingObserver, StepObserver, StepRecord, StepTrace,
    TracingObserver,
};
pub use differential::{error_differential_eucl, frechet_diff};
pub use driver::{DescentConfig, DescentResult, RiemannianDescent, TerminationReason};
pub use frechet::{default_karcher_config, karcher_mean, karcher_mean_with};
pub use gradient_descent::{
    gradient_descent, gradient_descent_observed, gradient_descent_with_vectors, DescentStep,
};
pub use step_size::StepSizeSchedule;
