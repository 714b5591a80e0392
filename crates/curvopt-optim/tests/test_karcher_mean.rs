//! Karcher mean behaviour and its agreement with the Einstein midpoint.

use approx::assert_relative_eq;
use curvopt_core::{
    aggregation::einstein_midpoint,
    geometry::Geometry,
    metric::norm,
    numerical::is_on_manifold,
    sampling::random_point,
    tangent::project_to_tangent,
    test_utils::{batch, hyperboloid_geodesic_point, hyperboloid_point, sphere_point},
    types::DVector,
};
use curvopt_optim::{frechet_diff, karcher_mean, karcher_mean_with, DescentConfig};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn test_two_point_mean_matches_einstein_midpoint() {
    let a = hyperboloid_geodesic_point(3, 0, 0.0);
    let b = hyperboloid_geodesic_point(3, 0, 1.0_f64);
    let points = batch(&[a, b]);

    let karcher = karcher_mean(&points, Geometry::Hyperbolic).unwrap();
    assert!(karcher.converged());
    let einstein = einstein_midpoint(&points).unwrap();

    let expected = DVector::from_vec(vec![0.5_f64.sinh(), 0.0, 0.5_f64.cosh()]);
    assert_relative_eq!(karcher.point, expected, epsilon = 1e-8);
    assert_relative_eq!(einstein, expected, epsilon = 1e-10);
}

#[test]
fn test_hyperbolic_mean_is_stationary() {
    let points = batch(&[
        hyperboloid_point(&[0.3, -0.2]),
        hyperboloid_point(&[-0.1, 0.4]),
        hyperboloid_point(&[0.2, 0.1]),
    ]);
    let config = DescentConfig::new().with_constant_step_size(1.0 / 6.0).with_max_iterations(200);
    let result = karcher_mean_with(&points, Geometry::Hyperbolic, &config, None).unwrap();
    assert!(result.converged());
    assert!(is_on_manifold(&result.point, Geometry::Hyperbolic, 1e-9));

    let gradient = frechet_diff(&result.point, &points, Geometry::Hyperbolic).unwrap();
    let riemannian = project_to_tangent(&result.point, &gradient, Geometry::Hyperbolic).unwrap();
    assert!(norm(&riemannian, Geometry::Hyperbolic).unwrap() < 1e-6);
}

#[test]
fn test_default_config_converges_on_scattered_batches() {
    let hyperbolic = batch(&[
        hyperboloid_point(&[0.8, -0.1, 0.3]),
        hyperboloid_point(&[-0.4, 0.6, 0.0]),
        hyperboloid_point(&[0.1, 0.2, -0.7]),
        hyperboloid_point(&[0.5, 0.5, 0.5]),
    ]);
    let sphere_coords = [[0.1, 0.2, 1.0], [-0.3, 0.1, 1.0], [0.2, -0.25, 1.0], [0.4, 0.3, 1.0]];
    let spherical = batch(
        &sphere_coords
            .iter()
            .map(|c| DVector::from_column_slice(c).normalize())
            .collect::<Vec<_>>(),
    );

    for (points, geometry) in [(hyperbolic, Geometry::Hyperbolic), (spherical, Geometry::Spherical)] {
        let result = karcher_mean(&points, geometry).unwrap();
        assert!(result.converged(), "{geometry}: {:?}", result.termination_reason);
        assert!(result.iterations < 100);

        let gradient = frechet_diff(&result.point, &points, geometry).unwrap();
        let riemannian = project_to_tangent(&result.point, &gradient, geometry).unwrap();
        assert!(norm(&riemannian, geometry).unwrap() < 1e-6);
    }
}

#[test]
fn test_start_point_does_not_change_the_mean() {
    let points = batch(&[
        sphere_point::<f64>(3, 0.1),
        sphere_point(3, 0.5),
        sphere_point(3, 0.6),
    ]);
    let config = DescentConfig::new().with_constant_step_size(1.0 / 6.0).with_max_iterations(200);
    let from_first = karcher_mean_with(&points, Geometry::Spherical, &config, None).unwrap();
    let start = sphere_point(3, 0.9);
    let from_other = karcher_mean_with(&points, Geometry::Spherical, &config, Some(&start)).unwrap();
    assert_relative_eq!(from_first.point, from_other.point, epsilon = 1e-8);
    // Points on one great circle: the mean is the average angle.
    assert_relative_eq!(from_first.point, sphere_point(3, 0.4), epsilon = 1e-8);
}

#[test]
fn test_single_point_is_its_own_mean() {
    let mut rng = StdRng::seed_from_u64(3);
    for geometry in Geometry::ALL {
        let p = random_point::<f64, _>(4, geometry, &mut rng).unwrap();
        let result = karcher_mean(&batch(&[p.clone()]), geometry).unwrap();
        assert_eq!(result.iterations, 1);
        assert_eq!(result.point, p);
    }
}

proptest! {
    #[test]
    fn prop_euclidean_mean_is_arithmetic_mean(
        coords in prop::collection::vec(-10.0..10.0f64, 12)
    ) {
        let points = nalgebra::DMatrix::from_column_slice(3, 4, &coords);
        let result = karcher_mean(&points, Geometry::Euclidean).unwrap();
        let mean = points.column_mean();
        for i in 0..3 {
            prop_assert!((result.point[i] - mean[i]).abs() < 1e-9);
        }
    }
}
