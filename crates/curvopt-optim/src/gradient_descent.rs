//! Single Riemannian gradient step.
//!
//! ```text
//! g  = differential_fn(p, target, geometry)
//! ĝ  = proj_p(g)                      (ĝ = g in Euclidean space)
//! p' = exp_p(−η ĝ)
//! ```
//!
//! The step never prints. Intermediate vectors are either returned
//! ([`gradient_descent_with_vectors`]) or handed to a
//! [`StepObserver`](crate::callback::StepObserver).

use crate::callback::{NoOpObserver, StepObserver, StepTrace};
use curvopt_core::{
    error::{GeometryError, Result},
    exponential::exponential_map,
    geometry::Geometry,
    numerical::{check_finite, ensure_same_len},
    tangent::project_to_tangent,
    types::{DVector, Scalar},
};
use num_traits::Float;

/// Result of one step together with its intermediate vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct DescentStep<T: Scalar> {
    /// Updated point `exp_p(−η ĝ)`
    pub point: DVector<T>,
    /// Raw differential `g`
    pub gradient: DVector<T>,
    /// Projected gradient `ĝ`
    pub projection: DVector<T>,
}

/// Performs one gradient step from `point` and returns the new point.
///
/// `differential_fn` supplies the ambient differential of the objective at
/// `point`, for example [`error_differential_eucl`](crate::differential::error_differential_eucl)
/// with a target point or [`frechet_diff`](crate::differential::frechet_diff)
/// with a batch of points.
///
/// # Errors
///
/// - `InvalidParameter`: if `learning_rate` is not positive and finite
/// - `DimensionMismatch`: if the differential has a different length than `point`
/// - any error raised by `differential_fn`, the projection or the exponential map
pub fn gradient_descent<T, Tgt, F>(
    point: &DVector<T>,
    target: &Tgt,
    differential_fn: F,
    geometry: Geometry,
    learning_rate: T,
) -> Result<DVector<T>>
where
    T: Scalar,
    Tgt: ?Sized,
    F: Fn(&DVector<T>, &Tgt, Geometry) -> Result<DVector<T>>,
{
    gradient_descent_with_vectors(point, target, differential_fn, geometry, learning_rate)
        .map(|step| step.point)
}

/// Like [`gradient_descent`], also returning the differential and its projection.
pub fn gradient_descent_with_vectors<T, Tgt, F>(
    point: &DVector<T>,
    target: &Tgt,
    differential_fn: F,
    geometry: Geometry,
    learning_rate: T,
) -> Result<DescentStep<T>>
where
    T: Scalar,
    Tgt: ?Sized,
    F: Fn(&DVector<T>, &Tgt, Geometry) -> Result<DVector<T>>,
{
    gradient_descent_observed(
        point,
        target,
        differential_fn,
        geometry,
        learning_rate,
        &mut NoOpObserver,
    )
}

/// Like [`gradient_descent_with_vectors`], reporting the step to `observer`.
pub fn gradient_descent_observed<T, Tgt, F, O>(
    point: &DVector<T>,
    target: &Tgt,
    differential_fn: F,
    geometry: Geometry,
    learning_rate: T,
    observer: &mut O,
) -> Result<DescentStep<T>>
where
    T: Scalar,
    Tgt: ?Sized,
    F: Fn(&DVector<T>, &Tgt, Geometry) -> Result<DVector<T>>,
    O: StepObserver<T> + ?Sized,
{
    if !(learning_rate > T::zero()) || !Float::is_finite(learning_rate) {
        return Err(GeometryError::invalid_parameter(format!(
            "learning rate must be positive and finite, got {}",
            learning_rate
        )));
    }

    let gradient = differential_fn(point, target, geometry)?;
    ensure_same_len(point, &gradient)?;
    check_finite(&gradient, "differential")?;

    let projection = match geometry {
        Geometry::Euclidean => gradient.clone(),
        _ => project_to_tangent(point, &gradient, geometry)?,
    };
    let next_point = exponential_map(&(&projection * -learning_rate), point, geometry)?;

    observer.on_step(&StepTrace {
        geometry,
        learning_rate,
        point,
        gradient: &gradient,
        projection: &projection,
        next_point: &next_point,
    });

    Ok(DescentStep {
        point: next_point,
        gradient,
        projection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::RecordingObserver;
    use crate::differential::error_differential_eucl;
    use approx::assert_relative_eq;
    use curvopt_core::distance::distance;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_spherical_step_moves_along_geodesic() {
        let u = DVector::from_vec(vec![0.0, 0.0, 1.0]);
        let v = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        let next = gradient_descent(&u, &v, error_differential_eucl, Geometry::Spherical, 1.0).unwrap();
        let expected = DVector::from_vec(vec![1.0_f64.sin(), 0.0, 1.0_f64.cos()]);
        assert_relative_eq!(next, expected, epsilon = 1e-6);
        let before = distance(&u, &v, Geometry::Spherical).unwrap();
        let after = distance(&next, &v, Geometry::Spherical).unwrap();
        assert!(after < before);
    }

    #[test]
    fn test_euclidean_step_is_plain_gradient_step() {
        let u = DVector::from_vec(vec![3.0, 4.0]);
        let v = DVector::zeros(2);
        let next = gradient_descent(&u, &v, error_differential_eucl, Geometry::Euclidean, 1.0).unwrap();
        assert_relative_eq!(next, DVector::from_vec(vec![2.4, 3.2]), epsilon = 1e-12);
    }

    #[test]
    fn test_coincident_target_is_a_fixed_point() {
        let u = DVector::from_vec(vec![0.0, 0.0, 1.0]);
        let next = gradient_descent(&u, &u, error_differential_eucl, Geometry::Hyperbolic, 1.0).unwrap();
        assert_eq!(next, u);
    }

    #[test]
    fn test_invalid_learning_rate() {
        let u = DVector::from_vec(vec![0.0, 0.0, 1.0]);
        for lr in [0.0, -1.0, f64::INFINITY] {
            assert!(matches!(
                gradient_descent(&u, &u, error_differential_eucl, Geometry::Spherical, lr),
                Err(GeometryError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_differential_errors_propagate() {
        let u = DVector::from_vec(vec![0.0, 0.0, 1.0]);
        let short = DVector::from_vec(vec![1.0, 0.0]);
        assert!(matches!(
            gradient_descent(&u, &short, error_differential_eucl, Geometry::Spherical, 0.5),
            Err(GeometryError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_observer_sees_returned_vectors() {
        let u = DVector::from_vec(vec![0.0, 0.0, 1.0]);
        let v = DVector::from_vec(vec![0.0, 1.0, 0.0]);
        let mut observer = RecordingObserver::new();
        let step = gradient_descent_observed(
            &u,
            &v,
            error_differential_eucl,
            Geometry::Spherical,
            0.5,
            &mut observer,
        )
        .unwrap();
        assert_eq!(observer.steps().len(), 1);
        let record = &observer.steps()[0];
        assert_eq!(record.learning_rate, 0.5);
        assert_eq!(
            DescentStep {
                point: record.next_point.clone(),
                gradient: record.gradient.clone(),
                projection: record.projection.clone(),
            },
            step
        );
    }
}
